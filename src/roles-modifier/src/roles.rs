//! The Roles modifier: role resolution, permission checks and forwarding to
//! the avatar, plus the owner-gated governance surface.

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{SolInterface, SolValue};
use roles_types::{interfaces::IRoles::IRolesCalls, Avatar, Operation, PolicyMutation, RoleKey};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    checker::{self, Transaction},
    errors::{DispatchError, GovernanceError},
    events::RolesEvent,
    membership::Memberships,
    store::PolicyStore,
};

/// Settings a modifier instance starts from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RolesConfig {
    pub owner: Address,
    /// Batch aggregator whose delegate calls are unrolled and checked per entry.
    #[serde(default)]
    pub multisend: Option<Address>,
}

/// A call an invoker asks the avatar to make.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransactionRequest<'a> {
    pub to: Address,
    pub value: U256,
    pub data: &'a [u8],
    pub operation: Operation,
    /// Explicit role; `None` uses the invoker's default role.
    pub role: Option<RoleKey>,
    /// Turn a reverted inner call into `ModuleTransactionFailed`.
    pub revert_on_failure: bool,
    /// Whether the caller wants the inner call's return data.
    pub return_data: bool,
}

/// Outcome of a forwarded call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Execution {
    pub success: bool,
    pub return_data: Bytes,
}

#[derive(Debug)]
pub struct Roles<A> {
    owner: Address,
    avatar: A,
    multisend: Option<Address>,
    store: PolicyStore,
    members: Memberships,
    /// Emitted since the last [`Roles::take_events`]; the host drains it after
    /// each governance call.
    events: Vec<RolesEvent>,
}

impl<A: Avatar> Roles<A> {
    pub fn new(config: RolesConfig, avatar: A) -> Self {
        Self {
            owner: config.owner,
            avatar,
            multisend: config.multisend,
            store: PolicyStore::new(),
            members: Memberships::default(),
            events: Vec::new(),
        }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn multisend(&self) -> Option<Address> {
        self.multisend
    }

    pub fn avatar(&self) -> &A {
        &self.avatar
    }

    pub fn avatar_mut(&mut self) -> &mut A {
        &mut self.avatar
    }

    pub fn store(&self) -> &PolicyStore {
        &self.store
    }

    pub fn memberships(&self) -> &Memberships {
        &self.members
    }

    pub fn events(&self) -> &[RolesEvent] {
        &self.events
    }

    /// Hand over and clear the pending events.
    pub fn take_events(&mut self) -> Vec<RolesEvent> {
        std::mem::take(&mut self.events)
    }

    /// Execute under the invoker's default role. A reverted inner call is
    /// reported as `Ok(false)`.
    pub fn exec_transaction_from_module(
        &mut self,
        invoker: Address,
        to: Address,
        value: U256,
        data: &[u8],
        operation: Operation,
    ) -> Result<bool, DispatchError> {
        let request = TransactionRequest {
            to,
            value,
            data,
            operation,
            role: None,
            revert_on_failure: false,
            return_data: false,
        };
        self.dispatch(invoker, &request).map(|execution| execution.success)
    }

    pub fn exec_transaction_from_module_return_data(
        &mut self,
        invoker: Address,
        to: Address,
        value: U256,
        data: &[u8],
        operation: Operation,
    ) -> Result<(bool, Bytes), DispatchError> {
        let request = TransactionRequest {
            to,
            value,
            data,
            operation,
            role: None,
            revert_on_failure: false,
            return_data: true,
        };
        self.dispatch(invoker, &request).map(|execution| (execution.success, execution.return_data))
    }

    /// Execute under an explicitly selected role.
    #[allow(clippy::too_many_arguments)]
    pub fn exec_transaction_with_role(
        &mut self,
        invoker: Address,
        to: Address,
        value: U256,
        data: &[u8],
        operation: Operation,
        role_key: RoleKey,
        should_revert: bool,
    ) -> Result<bool, DispatchError> {
        let request = TransactionRequest {
            to,
            value,
            data,
            operation,
            role: Some(role_key),
            revert_on_failure: should_revert,
            return_data: false,
        };
        self.dispatch(invoker, &request).map(|execution| execution.success)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn exec_transaction_with_role_return_data(
        &mut self,
        invoker: Address,
        to: Address,
        value: U256,
        data: &[u8],
        operation: Operation,
        role_key: RoleKey,
        should_revert: bool,
    ) -> Result<(bool, Bytes), DispatchError> {
        let request = TransactionRequest {
            to,
            value,
            data,
            operation,
            role: Some(role_key),
            revert_on_failure: should_revert,
            return_data: true,
        };
        self.dispatch(invoker, &request).map(|execution| (execution.success, execution.return_data))
    }

    /// Resolve the role and run every permission check without touching the avatar.
    pub fn authorize(&self, invoker: Address, request: &TransactionRequest<'_>) -> Result<RoleKey, DispatchError> {
        let role = self.members.resolve(&invoker, request.role)?;
        let tx = Transaction { to: request.to, value: request.value, data: request.data, operation: request.operation };
        checker::authorize(&self.store, &role, self.multisend, &tx)?;
        Ok(role)
    }

    /// Authorize `request` fully, then forward it to the avatar.
    pub fn dispatch(&mut self, invoker: Address, request: &TransactionRequest<'_>) -> Result<Execution, DispatchError> {
        let role = self.authorize(invoker, request).inspect_err(|err| {
            warn!(%invoker, target = %request.to, %err, "dispatch rejected");
        })?;

        let execution = if request.return_data {
            let (success, return_data) = self.avatar.exec_transaction_from_module_return_data(
                request.to,
                request.value,
                request.data,
                request.operation,
            );
            Execution { success, return_data }
        } else {
            let success =
                self.avatar.exec_transaction_from_module(request.to, request.value, request.data, request.operation);
            Execution { success, return_data: Bytes::new() }
        };

        if !execution.success {
            warn!(%invoker, %role, target = %request.to, revert = request.revert_on_failure, "inner call failed");
            if request.revert_on_failure {
                return Err(DispatchError::ModuleTransactionFailed);
            }
        }
        info!(%invoker, %role, target = %request.to, success = execution.success, "call forwarded");
        Ok(execution)
    }

    fn only_owner(&self, sender: Address) -> Result<(), GovernanceError> {
        if sender == self.owner {
            Ok(())
        } else {
            Err(GovernanceError::NotOwner(sender))
        }
    }

    pub fn transfer_ownership(&mut self, sender: Address, new_owner: Address) -> Result<(), GovernanceError> {
        self.only_owner(sender)?;
        let previous_owner = std::mem::replace(&mut self.owner, new_owner);
        info!(%previous_owner, %new_owner, "ownership transferred");
        self.events.push(RolesEvent::OwnershipTransferred { previous_owner, new_owner });
        Ok(())
    }

    /// Apply one governance call. Validation happens before anything is
    /// written, so a rejected call leaves the modifier unchanged.
    pub fn apply(&mut self, sender: Address, mutation: PolicyMutation) -> Result<(), GovernanceError> {
        self.only_owner(sender)?;

        match &mutation {
            PolicyMutation::AssignRoles { module, role_keys, member_of } => {
                self.members.assign_roles(*module, role_keys, member_of)?
            }
            PolicyMutation::SetDefaultRole { module, role_key } => self.members.set_default_role(*module, *role_key),
            PolicyMutation::SetMultisend { multisend } => {
                self.multisend = (!multisend.is_zero()).then_some(*multisend);
            }
            PolicyMutation::AllowTarget { role_key, target_address, options } => {
                self.store.allow_target(*role_key, *target_address, *options)
            }
            PolicyMutation::RevokeTarget { role_key, target_address } => {
                self.store.revoke_target(*role_key, *target_address)
            }
            PolicyMutation::ScopeTarget { role_key, target_address } => {
                self.store.scope_target(*role_key, *target_address)
            }
            PolicyMutation::ScopeAllowFunction { role_key, target_address, selector, options } => {
                self.store.scope_allow_function(*role_key, *target_address, *selector, *options)
            }
            PolicyMutation::ScopeRevokeFunction { role_key, target_address, selector } => {
                self.store.scope_revoke_function(*role_key, *target_address, *selector)
            }
            PolicyMutation::ScopeFunction { role_key, target_address, selector, conditions, options } => {
                self.store.scope_function(*role_key, *target_address, *selector, conditions, *options)?
            }
            PolicyMutation::ScopeFunctionExecutionOptions { role_key, target_address, selector, options } => {
                self.store.scope_function_execution_options(*role_key, *target_address, *selector, *options)
            }
            PolicyMutation::ScopeParameter {
                role_key,
                target_address,
                selector,
                index,
                param_type,
                operator,
                comp_value,
            } => self.store.scope_parameter(
                *role_key,
                *target_address,
                *selector,
                *index,
                *param_type,
                *operator,
                comp_value,
            )?,
            PolicyMutation::ScopeParameterAsOneOf {
                role_key,
                target_address,
                selector,
                index,
                param_type,
                comp_values,
            } => self.store.scope_parameter_as_one_of(
                *role_key,
                *target_address,
                *selector,
                *index,
                *param_type,
                comp_values,
            )?,
            PolicyMutation::UnscopeParameter { role_key, target_address, selector, index } => {
                self.store.unscope_parameter(*role_key, *target_address, *selector, *index)?
            }
        }

        info!(
            call = ?mutation.kind(),
            role = ?mutation.role_key(),
            target = ?mutation.target_address(),
            selector = ?mutation.selector(),
            "policy updated"
        );
        self.events.push(RolesEvent::Mutation(mutation));
        Ok(())
    }

    /// Apply ABI-encoded `IRoles` governance calldata (including `transferOwnership`).
    pub fn apply_calldata(&mut self, sender: Address, data: &[u8]) -> Result<(), GovernanceError> {
        let call = IRolesCalls::abi_decode(data, true).map_err(|_| GovernanceError::MalformedCall)?;
        self.apply_call(sender, call)
    }

    fn apply_call(&mut self, sender: Address, call: IRolesCalls) -> Result<(), GovernanceError> {
        if let IRolesCalls::transferOwnership(call) = call {
            return self.transfer_ownership(sender, call.newOwner);
        }
        let mutation = PolicyMutation::try_from(call).map_err(|_| GovernanceError::MalformedCall)?;
        self.apply(sender, mutation)
    }

    /// Contract-style entry point: route raw `IRoles` calldata to dispatch or
    /// governance and return ABI-encoded output or revert data.
    pub fn handle_call(&mut self, sender: Address, data: &[u8]) -> Result<Bytes, Bytes> {
        let malformed = || GovernanceError::MalformedCall.revert_data();
        let call = IRolesCalls::abi_decode(data, true).map_err(|_| malformed())?;
        let operation = |raw: u8| Operation::try_from(raw).map_err(|_| malformed());

        let encoded = match call {
            IRolesCalls::execTransactionFromModule(c) => {
                let op = operation(c.operation)?;
                let success = self
                    .exec_transaction_from_module(sender, c.to, c.value, &c.data, op)
                    .map_err(|err| err.revert_data())?;
                (success,).abi_encode_params()
            }
            IRolesCalls::execTransactionFromModuleReturnData(c) => {
                let op = operation(c.operation)?;
                self.exec_transaction_from_module_return_data(sender, c.to, c.value, &c.data, op)
                    .map_err(|err| err.revert_data())?
                    .abi_encode_params()
            }
            IRolesCalls::execTransactionWithRole(c) => {
                let op = operation(c.operation)?;
                let success = self
                    .exec_transaction_with_role(sender, c.to, c.value, &c.data, op, c.roleKey, c.shouldRevert)
                    .map_err(|err| err.revert_data())?;
                (success,).abi_encode_params()
            }
            IRolesCalls::execTransactionWithRoleReturnData(c) => {
                let op = operation(c.operation)?;
                self.exec_transaction_with_role_return_data(sender, c.to, c.value, &c.data, op, c.roleKey, c.shouldRevert)
                    .map_err(|err| err.revert_data())?
                    .abi_encode_params()
            }
            governance => {
                self.apply_call(sender, governance).map_err(|err| err.revert_data())?;
                Vec::new()
            }
        };
        Ok(encoded.into())
    }
}
