//! Command-line and environment configuration.
use std::time::Duration;

use alloy::transports::http::reqwest::Url;
use clap::Parser;
use eyre::Context;
use token_metadata::ContractAddress;

/// Environment variable holding the JSON-RPC endpoint.
pub const RPC_URL_ENV_VAR_NAME: &str = "RPC_URL";

/// Default timeout for a single contract call, in milliseconds.
pub const DEFAULT_CALL_TIMEOUT_MS: u64 = 10_000;

/// Fetch sanitized ERC-20 metadata for one or more token contracts.
#[derive(Debug, Clone, Parser)]
#[command(name = "token-metadata", version)]
pub struct Args {
    /// JSON-RPC endpoint of the chain.
    #[arg(long, env = RPC_URL_ENV_VAR_NAME)]
    pub rpc_url: String,

    /// Timeout for each contract call, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_CALL_TIMEOUT_MS)]
    pub call_timeout_ms: u64,

    /// Token contract addresses, as hex.
    #[arg(required = true)]
    pub addresses: Vec<String>,
}

/// Validated configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON-RPC endpoint of the chain.
    pub rpc_url: Url,
    /// Timeout for each contract call.
    pub call_timeout: Duration,
    /// Token contracts to query.
    pub addresses: Vec<ContractAddress>,
}

impl TryFrom<Args> for Config {
    type Error = eyre::Report;

    fn try_from(args: Args) -> eyre::Result<Self> {
        let rpc_url = args
            .rpc_url
            .parse()
            .wrap_err_with(|| format!("invalid rpc url `{}`", args.rpc_url))?;

        if args.call_timeout_ms == 0 {
            eyre::bail!("call timeout must be positive");
        }

        let addresses = args
            .addresses
            .iter()
            .map(|address| {
                address
                    .parse()
                    .wrap_err_with(|| format!("invalid address `{address}`"))
            })
            .collect::<eyre::Result<_>>()?;

        Ok(Self {
            rpc_url,
            call_timeout: Duration::from_millis(args.call_timeout_ms),
            addresses,
        })
    }
}
