//! Unrolling of `multiSend(bytes)` batches into their packed sub-calls.
//!
//! Packed entry layout: `[operation u8][to 20][value 32][data length 32][data]`.

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use roles_types::{interfaces::IMultiSend, Operation};

use crate::{
    checker::Transaction,
    errors::PermissionError,
    utils::bytes::{read_slice, read_u256, read_usize, WORD},
};

/// The only `bytes` offset a canonical `multiSend` encoding uses.
pub const CANONICAL_OFFSET: usize = WORD;

const SELECTOR_LEN: usize = 4;
const ENTRY_HEADER_LEN: usize = 1 + 20 + WORD + WORD;

/// Whether `tx` is a batch that has to be checked entry by entry.
pub fn is_batch(multisend: Option<Address>, tx: &Transaction<'_>) -> bool {
    multisend == Some(tx.to)
        && tx.operation.is_delegate_call()
        && tx.data.get(..SELECTOR_LEN) == Some(IMultiSend::multiSendCall::SELECTOR.as_slice())
}

/// Iterate the sub-calls of `multiSend` calldata.
pub fn entries(data: &[u8]) -> Result<Entries<'_>, PermissionError> {
    let offset = read_u256(data, SELECTOR_LEN, data.len()).map_err(|_| PermissionError::MalformedMultiSend)?;
    if offset != U256::from(CANONICAL_OFFSET) {
        return Err(PermissionError::UnacceptableMultiSendOffset);
    }
    let len_at = SELECTOR_LEN + CANONICAL_OFFSET;
    let len = read_usize(data, len_at, data.len()).map_err(|_| PermissionError::MalformedMultiSend)?;
    let packed = read_slice(data, len_at + WORD, len, data.len()).map_err(|_| PermissionError::MalformedMultiSend)?;
    Ok(Entries { packed, cursor: 0 })
}

/// Iterator over packed multisend entries. Yields an error once and then stops.
#[derive(Debug)]
pub struct Entries<'a> {
    packed: &'a [u8],
    cursor: usize,
}

impl<'a> Entries<'a> {
    fn next_entry(&mut self) -> Result<Transaction<'a>, PermissionError> {
        let malformed = |_| PermissionError::MalformedMultiSend;
        let packed = self.packed;
        let header = read_slice(packed, self.cursor, ENTRY_HEADER_LEN, packed.len()).map_err(malformed)?;

        let operation = Operation::try_from(header[0]).map_err(|_| PermissionError::MalformedMultiSend)?;
        let to = Address::from_slice(&header[1..21]);
        let value = read_u256(header, 21, header.len()).map_err(malformed)?;
        let len = read_usize(header, 21 + WORD, header.len()).map_err(malformed)?;

        let data_at = self.cursor + ENTRY_HEADER_LEN;
        let data = read_slice(packed, data_at, len, packed.len()).map_err(malformed)?;
        self.cursor = data_at + len;
        Ok(Transaction { to, value, data, operation })
    }
}

impl<'a> Iterator for Entries<'a> {
    type Item = Result<Transaction<'a>, PermissionError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.packed.len() {
            return None;
        }
        let entry = self.next_entry();
        if entry.is_err() {
            self.cursor = self.packed.len();
        }
        Some(entry)
    }
}
