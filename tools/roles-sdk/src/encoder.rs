use alloy_primitives::{Bytes, U256};
use alloy_sol_types::SolCall;
use roles_types::{interfaces::IMultiSend, PolicyMutation, Selector};
use sha3::{Digest, Keccak256};

use crate::types::MultiSendTx;

/// `IRoles` calldata for one governance call.
pub fn encode_call(mutation: &PolicyMutation) -> Bytes {
    mutation.abi_encode().into()
}

pub fn encode_calls(mutations: &[PolicyMutation]) -> Vec<Bytes> {
    mutations.iter().map(encode_call).collect()
}

/// Packed `[operation][to][value][data length][data]` entries.
pub fn encode_multisend_transactions(txs: &[MultiSendTx]) -> Vec<u8> {
    let mut buf = Vec::new();
    for tx in txs {
        buf.push(tx.operation as u8);
        buf.extend_from_slice(tx.to.as_slice());
        buf.extend_from_slice(&tx.value.to_be_bytes::<32>());
        buf.extend_from_slice(&U256::from(tx.data.len()).to_be_bytes::<32>());
        buf.extend_from_slice(&tx.data);
    }
    buf
}

/// `multiSend(bytes)` calldata; the standard encoder always uses the canonical offset.
pub fn encode_multisend(txs: &[MultiSendTx]) -> Bytes {
    let transactions = encode_multisend_transactions(txs);
    IMultiSend::multiSendCall { transactions: transactions.into() }.abi_encode().into()
}

/// 4-byte selector of a canonical signature such as `mint(address,uint256)`.
pub fn selector(signature: &str) -> Selector {
    let digest = Keccak256::digest(signature.as_bytes());
    Selector::from_slice(&digest[..4])
}
