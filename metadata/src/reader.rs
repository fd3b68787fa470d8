//! Contract-call executor seam and the fetch drivers built on it.
use alloy_primitives::U256;
use async_trait::async_trait;
use futures::future::join_all;

use crate::{
    abi::{
        FunctionCall, FunctionFragment, ERC20_METADATA_ABI, METADATA_CALLS,
        TOTAL_SUPPLY_CALLS,
    },
    address::ContractAddress,
    assemble::{assemble, TokenMetadataPartial},
    call::RawResults,
};

/// Executes read-only calls against a contract.
///
/// Implementations never fail as a whole: a call that reverts, times out or
/// returns undecodable data is reported as
/// [`crate::CallOutcome::Failed`] under its function name. Functions that
/// were not attempted may be left out of the result.
#[async_trait]
pub trait ContractReader: Send + Sync {
    /// Calls each function of `calls` on `address`, encoding the call and
    /// decoding results with the matching fragment of `abi`.
    async fn read(
        &self,
        address: &ContractAddress,
        abi: &[FunctionFragment],
        calls: &[FunctionCall],
    ) -> RawResults;
}

/// Fetches and assembles the metadata of the token at `address`.
pub async fn fetch_metadata<R: ContractReader + ?Sized>(
    reader: &R,
    address: &ContractAddress,
) -> TokenMetadataPartial {
    let raw = reader.read(address, ERC20_METADATA_ABI, METADATA_CALLS).await;
    let metadata = assemble(raw, address);
    tracing::debug!(
        %address,
        fields = metadata.len(),
        "fetched token metadata"
    );
    metadata
}

/// Fetches only the total supply of the token at `address`.
pub async fn fetch_total_supply<R: ContractReader + ?Sized>(
    reader: &R,
    address: &ContractAddress,
) -> Option<U256> {
    let raw =
        reader.read(address, ERC20_METADATA_ABI, TOTAL_SUPPLY_CALLS).await;
    assemble(raw, address).total_supply()
}

/// Fetches the metadata of several tokens concurrently.
///
/// Results are returned in the order of `addresses`.
pub async fn fetch_metadata_batch<R: ContractReader + ?Sized>(
    reader: &R,
    addresses: &[ContractAddress],
) -> Vec<(ContractAddress, TokenMetadataPartial)> {
    let fetches = addresses.iter().map(|address| async move {
        (*address, fetch_metadata(reader, address).await)
    });
    join_all(fetches).await
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, sync::Mutex};

    use super::*;
    use crate::{call::CallOutcome, field::Field};

    /// Serves canned results and records what was asked for.
    #[derive(Default)]
    struct StaticReader {
        results: HashMap<ContractAddress, RawResults>,
        requested: Mutex<Vec<(ContractAddress, Vec<&'static str>)>>,
    }

    impl StaticReader {
        fn with(mut self, address: ContractAddress, raw: RawResults) -> Self {
            self.results.insert(address, raw);
            self
        }
    }

    #[async_trait]
    impl ContractReader for StaticReader {
        async fn read(
            &self,
            address: &ContractAddress,
            abi: &[FunctionFragment],
            calls: &[FunctionCall],
        ) -> RawResults {
            assert_eq!(abi, ERC20_METADATA_ABI);
            self.requested
                .lock()
                .unwrap()
                .push((*address, calls.iter().map(|c| c.function).collect()));

            let known = self.results.get(address).cloned().unwrap_or_default();
            calls
                .iter()
                .map(|call| {
                    let outcome = known
                        .get(call.function)
                        .cloned()
                        .unwrap_or(CallOutcome::Failed);
                    (call.function.to_owned(), outcome)
                })
                .collect()
        }
    }

    fn weth() -> ContractAddress {
        "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2".parse().unwrap()
    }

    fn usdc() -> ContractAddress {
        "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".parse().unwrap()
    }

    fn weth_results() -> RawResults {
        RawResults::from([
            ("name".to_owned(), CallOutcome::single("Wrapped Ether")),
            ("symbol".to_owned(), CallOutcome::single("WETH")),
            ("decimals".to_owned(), CallOutcome::single(18_u8)),
            ("totalSupply".to_owned(), CallOutcome::Failed),
        ])
    }

    #[tokio::test]
    async fn fetch_matches_direct_assembly() {
        let reader = StaticReader::default().with(weth(), weth_results());

        let fetched = fetch_metadata(&reader, &weth()).await;
        let direct = assemble(weth_results(), &weth());

        assert_eq!(fetched, direct);
        assert_eq!(
            fetched.fields().collect::<Vec<_>>(),
            [Field::Name, Field::Symbol, Field::Decimals]
        );
        let requested = reader.requested.lock().unwrap();
        assert_eq!(
            requested[0].1,
            ["name", "symbol", "decimals", "totalSupply"]
        );
    }

    #[tokio::test]
    async fn unknown_contract_gives_empty_record() {
        let reader = StaticReader::default();
        let fetched = fetch_metadata(&reader, &usdc()).await;
        assert!(fetched.is_empty());
    }

    #[tokio::test]
    async fn total_supply_only_asks_for_total_supply() {
        let supply = U256::from(3_000_000_u64);
        let reader = StaticReader::default().with(
            usdc(),
            RawResults::from([
                ("name".to_owned(), CallOutcome::single("USD Coin")),
                ("totalSupply".to_owned(), CallOutcome::single(supply)),
            ]),
        );

        assert_eq!(fetch_total_supply(&reader, &usdc()).await, Some(supply));
        let requested = reader.requested.lock().unwrap();
        assert_eq!(requested[0].1, ["totalSupply"]);
    }

    #[tokio::test]
    async fn batch_keeps_input_order() {
        let reader = StaticReader::default()
            .with(weth(), weth_results())
            .with(
                usdc(),
                RawResults::from([(
                    "symbol".to_owned(),
                    CallOutcome::single("USDC"),
                )]),
            );

        let batch = fetch_metadata_batch(&reader, &[usdc(), weth()]).await;

        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].0, usdc());
        assert_eq!(batch[0].1.symbol().unwrap(), "USDC");
        assert_eq!(batch[1].0, weth());
        assert_eq!(batch[1].1.name().unwrap(), "Wrapped Ether");
    }

    #[tokio::test]
    async fn works_through_a_trait_object() {
        let reader: Box<dyn ContractReader> =
            Box::new(StaticReader::default().with(weth(), weth_results()));
        let fetched = fetch_metadata(reader.as_ref(), &weth()).await;
        assert_eq!(fetched.decimals(), Some(18));
    }
}
