use alloy_primitives::{Address, Bytes, U256};

use crate::permissions::Operation;

/// The controlled account that executes calls once the modifier has authorized them.
///
/// Implemented differently on-chain (a Safe-style module manager) vs off-chain
/// (dry runs and tests).
pub trait Avatar {
    /// Execute `data` against `to` and hand back the raw return data.
    fn exec_transaction_from_module_return_data(
        &mut self,
        to: Address,
        value: U256,
        data: &[u8],
        operation: Operation,
    ) -> (bool, Bytes);

    /// Execute without surfacing return data.
    fn exec_transaction_from_module(
        &mut self,
        to: Address,
        value: U256,
        data: &[u8],
        operation: Operation,
    ) -> bool {
        self.exec_transaction_from_module_return_data(to, value, data, operation)
            .0
    }
}
