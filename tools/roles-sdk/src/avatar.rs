use std::collections::BTreeSet;

use alloy_primitives::{Address, Bytes, U256};
use roles_types::{Avatar, Operation, Selector};
use tracing::debug;

use crate::types::ExecutedCall;

/// Off-chain avatar for dry runs: records every forwarded call and reverts the
/// ones whose selector was marked as failing.
#[derive(Clone, Debug, Default)]
pub struct RecordingAvatar {
    calls: Vec<ExecutedCall>,
    failing: BTreeSet<Selector>,
}

impl RecordingAvatar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(mut self, selector: Selector) -> Self {
        self.failing.insert(selector);
        self
    }

    pub fn calls(&self) -> &[ExecutedCall] {
        &self.calls
    }
}

impl Avatar for RecordingAvatar {
    fn exec_transaction_from_module_return_data(
        &mut self,
        to: Address,
        value: U256,
        data: &[u8],
        operation: Operation,
    ) -> (bool, Bytes) {
        let success = data
            .get(..4)
            .map_or(true, |prefix| !self.failing.contains(&Selector::from_slice(prefix)));
        debug!(%to, %value, ?operation, success, "avatar executing");
        self.calls.push(ExecutedCall { to, value, data: Bytes::copy_from_slice(data), operation, success });
        (success, Bytes::new())
    }
}
