use alloy_primitives::{Address, U256};
use roles_types::{Clearance, ExecutionOptions, Operation, RoleKey, Selector};
use tracing::debug;

use crate::{
    errors::PermissionError,
    evaluator::evaluate,
    multisend,
    store::{FunctionScope, PolicyStore},
};

/// A single call as the avatar would execute it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transaction<'a> {
    pub to: Address,
    pub value: U256,
    pub data: &'a [u8],
    pub operation: Operation,
}

/// Check `tx` under `role`, unrolling it first when it is a multisend batch.
pub fn authorize(
    store: &PolicyStore,
    role: &RoleKey,
    multisend: Option<Address>,
    tx: &Transaction<'_>,
) -> Result<(), PermissionError> {
    if !multisend::is_batch(multisend, tx) {
        return check_transaction(store, role, tx);
    }
    for entry in multisend::entries(tx.data)? {
        check_transaction(store, role, &entry?)?;
    }
    Ok(())
}

/// Check a single (non-batch) call against the role's policy.
pub fn check_transaction(store: &PolicyStore, role: &RoleKey, tx: &Transaction<'_>) -> Result<(), PermissionError> {
    let verdict = check_inner(store, role, tx);
    if let Err(err) = &verdict {
        let prefix = &tx.data[..tx.data.len().min(4)];
        debug!(%role, target = %tx.to, selector = %hex::encode(prefix), status = err.status_code(), %err, "call rejected");
    }
    verdict
}

fn check_inner(store: &PolicyStore, role: &RoleKey, tx: &Transaction<'_>) -> Result<(), PermissionError> {
    let target = store
        .target(role, &tx.to)
        .filter(|rule| rule.clearance != Clearance::Denied)
        .ok_or(PermissionError::TargetAddressNotAllowed)?;

    let options = match target.clearance {
        Clearance::ScopedByFunction => {
            let selector = tx
                .data
                .get(..4)
                .map(Selector::from_slice)
                .ok_or(PermissionError::FunctionSignatureTooShort)?;
            let function = target.functions.get(&selector).ok_or(PermissionError::FunctionNotAllowed)?;
            match &function.scope {
                FunctionScope::OptionsOnly => return Err(PermissionError::FunctionNotAllowed),
                FunctionScope::Wildcarded => {}
                FunctionScope::Conditions(tree) => {
                    evaluate(tree, tx.data).map_err(PermissionError::ParameterNotAllowed)?;
                }
            }
            function.options.unwrap_or(target.options)
        }
        _ => target.options,
    };

    check_execution_options(options, tx.value, tx.operation)
}

fn check_execution_options(options: ExecutionOptions, value: U256, operation: Operation) -> Result<(), PermissionError> {
    if !value.is_zero() && !options.can_send() {
        return Err(PermissionError::SendNotAllowed);
    }
    if operation.is_delegate_call() && !options.can_delegate_call() {
        return Err(PermissionError::DelegateCallNotAllowed);
    }
    Ok(())
}
