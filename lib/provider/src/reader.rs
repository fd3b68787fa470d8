//! [`ContractReader`] backed by a JSON-RPC provider.
use std::{fmt, time::Duration};

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes},
    providers::Provider,
    rpc::types::TransactionRequest,
};
use async_trait::async_trait;
use futures::future::join_all;
use token_metadata::{
    abi::find_fragment, CallOutcome, ContractAddress, ContractReader,
    FunctionCall, FunctionFragment, RawResults,
};

/// Reads contracts with one `eth_call` per function.
///
/// Calls for the same contract run concurrently, each bounded by
/// `call_timeout`. Nothing is retried.
#[derive(Debug, Clone)]
pub struct ProviderReader<P> {
    provider: P,
    call_timeout: Duration,
}

impl<P: Provider> ProviderReader<P> {
    /// Creates a reader issuing calls through `provider`.
    pub fn new(provider: P, call_timeout: Duration) -> Self {
        Self { provider, call_timeout }
    }

    async fn call(
        &self,
        to: Address,
        abi: &[FunctionFragment],
        call: &FunctionCall,
    ) -> CallOutcome {
        let Some(fragment) = find_fragment(abi, call.function) else {
            tracing::debug!(function = call.function, "function not in abi");
            return CallOutcome::Failed;
        };
        let calldata = match fragment.calldata(call.arguments) {
            Ok(calldata) => calldata,
            Err(err) => {
                tracing::debug!(function = call.function, %err, "bad call");
                return CallOutcome::Failed;
            }
        };

        let tx = TransactionRequest::default().with_to(to).with_input(calldata);
        let request = async { self.provider.call(tx).await };
        match tokio::time::timeout(self.call_timeout, request).await {
            Ok(response) => outcome_from_response(fragment, response),
            Err(elapsed) => {
                tracing::debug!(
                    function = fragment.name,
                    %elapsed,
                    "call timed out"
                );
                CallOutcome::Failed
            }
        }
    }
}

#[async_trait]
impl<P: Provider> ContractReader for ProviderReader<P> {
    async fn read(
        &self,
        address: &ContractAddress,
        abi: &[FunctionFragment],
        calls: &[FunctionCall],
    ) -> RawResults {
        let to = address.address();
        let outcomes =
            join_all(calls.iter().map(|call| self.call(to, abi, call))).await;

        calls
            .iter()
            .map(|call| call.function.to_owned())
            .zip(outcomes)
            .collect()
    }
}

/// Converts the response to an `eth_call` into a [`CallOutcome`].
///
/// Transport errors, reverts, empty return data (e.g. the address has no
/// code) and undecodable return data all become [`CallOutcome::Failed`].
pub fn outcome_from_response<E: fmt::Display>(
    fragment: &FunctionFragment,
    response: Result<Bytes, E>,
) -> CallOutcome {
    let data = match response {
        Ok(data) => data,
        Err(err) => {
            tracing::debug!(function = fragment.name, %err, "call failed");
            return CallOutcome::Failed;
        }
    };
    if data.is_empty() && !fragment.outputs.is_empty() {
        tracing::debug!(function = fragment.name, "empty return data");
        return CallOutcome::Failed;
    }

    match fragment.decode_output(&data) {
        Ok(values) => CallOutcome::Ok(values),
        Err(err) => {
            tracing::debug!(
                function = fragment.name,
                %err,
                "undecodable output"
            );
            CallOutcome::Failed
        }
    }
}
