//! JSON-RPC backed [`token_metadata::ContractReader`], plus the
//! configuration and logging setup of the `token-metadata` binary.
mod config;
mod reader;

pub use config::{Args, Config, DEFAULT_CALL_TIMEOUT_MS, RPC_URL_ENV_VAR_NAME};
pub use reader::{outcome_from_response, ProviderReader};

/// Installs a `tracing` subscriber writing to stderr.
///
/// The level defaults to `info` and can be overridden with `RUST_LOG`.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
