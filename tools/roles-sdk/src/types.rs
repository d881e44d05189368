use alloy_primitives::{Address, Bytes, U256};
use roles_types::Operation;
use serde::{Deserialize, Serialize};

/// One entry of a `multiSend` batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiSendTx {
    #[serde(default)]
    pub operation: Operation,
    pub to: Address,
    #[serde(default)]
    pub value: U256,
    #[serde(default)]
    pub data: Bytes,
}

/// A call the recording avatar was asked to execute.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutedCall {
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
    pub operation: Operation,
    pub success: bool,
}
