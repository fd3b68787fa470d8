/*!
# Token Metadata

Normalizes the metadata of an ERC-20 token contract into a record that is
safe to store.

The token is queried with a fixed batch of read-only calls (`name`, `symbol`,
`decimals`, `totalSupply`), described by the static query descriptor in
[`abi`]. Any of those calls may revert or return garbage. [`assemble()`] turns
whatever came back into a [`TokenMetadataPartial`] holding only the usable
fields:

- failed calls, and calls without exactly one output, leave their field out;
- an undecodable `name` becomes the first six characters of the contract
  address, while an undecodable `symbol` is left out;
- null characters are stripped from `name` and `symbol`, which are then cut to
  [`MAX_TEXT_BYTES`] bytes;
- `decimals` and `total_supply` are kept as returned.

Assembly never fails: a token whose calls all failed yields an empty record.

## Usage

Calls are executed by a [`ContractReader`]. The `token-metadata-provider`
crate implements one on top of an `alloy` provider.

```ignore
use token_metadata::{fetch_metadata, ContractAddress};

let address: ContractAddress =
    "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2".parse()?;
let metadata = fetch_metadata(&reader, &address).await;
if let Some(symbol) = metadata.symbol() {
    println!("{symbol}");
}
```

Results obtained elsewhere can be assembled directly:

```ignore
use token_metadata::{assemble, CallOutcome, RawResults};

let raw = RawResults::from([
    ("name".to_owned(), CallOutcome::single("Wrapped Ether")),
    ("totalSupply".to_owned(), CallOutcome::Failed),
]);
let metadata = assemble(raw, &address);
```
*/

#![allow(clippy::module_name_repetitions)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod abi;
pub mod address;
pub mod assemble;
pub mod call;
pub mod field;
pub mod reader;
pub mod sanitize;

pub use abi::{DecodeError, EncodeError, FunctionCall, FunctionFragment};
pub use address::{AddressError, ContractAddress};
pub use assemble::{assemble, FieldValue, TokenMetadataPartial};
pub use call::{AbiValue, CallOutcome, RawResults};
pub use field::Field;
pub use reader::{
    fetch_metadata, fetch_metadata_batch, fetch_total_supply, ContractReader,
};
pub use sanitize::{InvalidTextPolicy, StoredText, MAX_TEXT_BYTES};
