//! Prints the sanitized metadata of token contracts as JSON lines.
use alloy::providers::ProviderBuilder;
use clap::Parser;
use eyre::Context;
use serde::Serialize;
use token_metadata::{
    fetch_metadata_batch, ContractAddress, TokenMetadataPartial,
};
use token_metadata_provider::{init_tracing, Args, Config, ProviderReader};

#[derive(Serialize)]
struct Line<'a> {
    address: &'a ContractAddress,
    metadata: &'a TokenMetadataPartial,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    init_tracing();
    let config = Config::try_from(Args::parse())?;

    tracing::info!(
        rpc_url = %config.rpc_url,
        tokens = config.addresses.len(),
        "fetching token metadata"
    );

    let provider = ProviderBuilder::new()
        .disable_recommended_fillers()
        .connect_http(config.rpc_url);
    let reader = ProviderReader::new(provider, config.call_timeout);

    for (address, metadata) in
        fetch_metadata_batch(&reader, &config.addresses).await
    {
        if metadata.is_empty() {
            tracing::warn!(%address, "no metadata could be read");
        }
        let line = serde_json::to_string(&Line {
            address: &address,
            metadata: &metadata,
        })
        .wrap_err("failed to serialize metadata")?;
        println!("{line}");
    }

    Ok(())
}
