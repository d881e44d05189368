//! Audit events recorded for every successful governance call.

use alloy_primitives::{Address, LogData};
use alloy_sol_types::SolEvent;
use roles_types::{interfaces::IRoles, PolicyMutation};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RolesEvent {
    /// A policy or membership change, carrying the call's arguments.
    Mutation(PolicyMutation),
    OwnershipTransferred { previous_owner: Address, new_owner: Address },
}

impl RolesEvent {
    /// EVM log form, as emitted by the `IRoles` events.
    pub fn to_log_data(&self) -> LogData {
        let mutation = match self {
            Self::OwnershipTransferred { previous_owner, new_owner } => {
                return IRoles::OwnershipTransferred { previousOwner: *previous_owner, newOwner: *new_owner }
                    .encode_log_data();
            }
            Self::Mutation(mutation) => mutation.clone(),
        };

        match mutation {
            PolicyMutation::AssignRoles { module, role_keys, member_of } => {
                IRoles::AssignRoles { module, roleKeys: role_keys, memberOf: member_of }.encode_log_data()
            }
            PolicyMutation::SetDefaultRole { module, role_key } => {
                IRoles::SetDefaultRole { module, defaultRoleKey: role_key }.encode_log_data()
            }
            PolicyMutation::SetMultisend { multisend } => {
                IRoles::SetMultisendAddress { multisendAddress: multisend }.encode_log_data()
            }
            PolicyMutation::AllowTarget { role_key, target_address, options } => IRoles::AllowTarget {
                roleKey: role_key,
                targetAddress: target_address,
                options: options as u8,
            }
            .encode_log_data(),
            PolicyMutation::RevokeTarget { role_key, target_address } => {
                IRoles::RevokeTarget { roleKey: role_key, targetAddress: target_address }.encode_log_data()
            }
            PolicyMutation::ScopeTarget { role_key, target_address } => {
                IRoles::ScopeTarget { roleKey: role_key, targetAddress: target_address }.encode_log_data()
            }
            PolicyMutation::ScopeAllowFunction { role_key, target_address, selector, options } => {
                IRoles::ScopeAllowFunction {
                    roleKey: role_key,
                    targetAddress: target_address,
                    selector,
                    options: options as u8,
                }
                .encode_log_data()
            }
            PolicyMutation::ScopeRevokeFunction { role_key, target_address, selector } => {
                IRoles::ScopeRevokeFunction { roleKey: role_key, targetAddress: target_address, selector }
                    .encode_log_data()
            }
            PolicyMutation::ScopeFunction { role_key, target_address, selector, conditions, options } => {
                IRoles::ScopeFunction {
                    roleKey: role_key,
                    targetAddress: target_address,
                    selector,
                    conditions: conditions.into_iter().map(Into::into).collect(),
                    options: options as u8,
                }
                .encode_log_data()
            }
            PolicyMutation::ScopeFunctionExecutionOptions { role_key, target_address, selector, options } => {
                IRoles::ScopeFunctionExecutionOptions {
                    roleKey: role_key,
                    targetAddress: target_address,
                    selector,
                    options: options as u8,
                }
                .encode_log_data()
            }
            PolicyMutation::ScopeParameter {
                role_key,
                target_address,
                selector,
                index,
                param_type,
                operator,
                comp_value,
            } => IRoles::ScopeParameter {
                roleKey: role_key,
                targetAddress: target_address,
                selector,
                index,
                paramType: param_type as u8,
                operator: operator as u8,
                compValue: comp_value,
            }
            .encode_log_data(),
            PolicyMutation::ScopeParameterAsOneOf {
                role_key,
                target_address,
                selector,
                index,
                param_type,
                comp_values,
            } => IRoles::ScopeParameterAsOneOf {
                roleKey: role_key,
                targetAddress: target_address,
                selector,
                index,
                paramType: param_type as u8,
                compValues: comp_values,
            }
            .encode_log_data(),
            PolicyMutation::UnscopeParameter { role_key, target_address, selector, index } => {
                IRoles::UnscopeParameter { roleKey: role_key, targetAddress: target_address, selector, index }
                    .encode_log_data()
            }
        }
    }
}
