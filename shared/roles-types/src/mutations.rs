//! Governance calls that mutate role membership and the policy store.

use alloy_primitives::{Address, Bytes};
use alloy_sol_types::SolInterface;
use serde::{Deserialize, Serialize};

use crate::{
    interfaces::{self, IRoles::IRolesCalls},
    permissions::{ConditionFlat, ExecutionOptions, InvalidEnumValue, Operator, ParameterType},
    RoleKey, Selector,
};

/// Errors while turning calldata into a [`PolicyMutation`].
#[derive(Debug, thiserror::Error)]
pub enum MutationError {
    #[error("calldata is not a valid IRoles call: {0}")]
    Abi(#[from] alloy_sol_types::Error),
    #[error(transparent)]
    InvalidEnum(#[from] InvalidEnumValue),
    #[error("calldata is an IRoles call but not a governance call")]
    NotAGovernanceCall,
}

/// One governance call, named after the `IRoles` function it encodes to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PolicyMutation {
    AssignRoles {
        module: Address,
        role_keys: Vec<RoleKey>,
        member_of: Vec<bool>,
    },
    SetDefaultRole {
        module: Address,
        role_key: RoleKey,
    },
    SetMultisend {
        multisend: Address,
    },
    AllowTarget {
        role_key: RoleKey,
        target_address: Address,
        #[serde(default)]
        options: ExecutionOptions,
    },
    RevokeTarget {
        role_key: RoleKey,
        target_address: Address,
    },
    ScopeTarget {
        role_key: RoleKey,
        target_address: Address,
    },
    ScopeAllowFunction {
        role_key: RoleKey,
        target_address: Address,
        selector: Selector,
        #[serde(default)]
        options: ExecutionOptions,
    },
    ScopeRevokeFunction {
        role_key: RoleKey,
        target_address: Address,
        selector: Selector,
    },
    ScopeFunction {
        role_key: RoleKey,
        target_address: Address,
        selector: Selector,
        conditions: Vec<ConditionFlat>,
        #[serde(default)]
        options: ExecutionOptions,
    },
    ScopeFunctionExecutionOptions {
        role_key: RoleKey,
        target_address: Address,
        selector: Selector,
        options: ExecutionOptions,
    },
    ScopeParameter {
        role_key: RoleKey,
        target_address: Address,
        selector: Selector,
        index: u8,
        param_type: ParameterType,
        operator: Operator,
        #[serde(default)]
        comp_value: Bytes,
    },
    ScopeParameterAsOneOf {
        role_key: RoleKey,
        target_address: Address,
        selector: Selector,
        index: u8,
        param_type: ParameterType,
        comp_values: Vec<Bytes>,
    },
    UnscopeParameter {
        role_key: RoleKey,
        target_address: Address,
        selector: Selector,
        index: u8,
    },
}

/// Field-less discriminant of [`PolicyMutation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
    AssignRoles,
    SetDefaultRole,
    SetMultisend,
    AllowTarget,
    RevokeTarget,
    ScopeTarget,
    ScopeAllowFunction,
    ScopeRevokeFunction,
    ScopeFunction,
    ScopeFunctionExecutionOptions,
    ScopeParameter,
    ScopeParameterAsOneOf,
    UnscopeParameter,
}

impl PolicyMutation {
    pub fn kind(&self) -> CallKind {
        match self {
            Self::AssignRoles { .. } => CallKind::AssignRoles,
            Self::SetDefaultRole { .. } => CallKind::SetDefaultRole,
            Self::SetMultisend { .. } => CallKind::SetMultisend,
            Self::AllowTarget { .. } => CallKind::AllowTarget,
            Self::RevokeTarget { .. } => CallKind::RevokeTarget,
            Self::ScopeTarget { .. } => CallKind::ScopeTarget,
            Self::ScopeAllowFunction { .. } => CallKind::ScopeAllowFunction,
            Self::ScopeRevokeFunction { .. } => CallKind::ScopeRevokeFunction,
            Self::ScopeFunction { .. } => CallKind::ScopeFunction,
            Self::ScopeFunctionExecutionOptions { .. } => CallKind::ScopeFunctionExecutionOptions,
            Self::ScopeParameter { .. } => CallKind::ScopeParameter,
            Self::ScopeParameterAsOneOf { .. } => CallKind::ScopeParameterAsOneOf,
            Self::UnscopeParameter { .. } => CallKind::UnscopeParameter,
        }
    }

    /// Role whose policy the call mutates (`None` for membership and module settings).
    pub fn role_key(&self) -> Option<RoleKey> {
        match self {
            Self::AssignRoles { .. } | Self::SetDefaultRole { .. } | Self::SetMultisend { .. } => None,
            Self::AllowTarget { role_key, .. }
            | Self::RevokeTarget { role_key, .. }
            | Self::ScopeTarget { role_key, .. }
            | Self::ScopeAllowFunction { role_key, .. }
            | Self::ScopeRevokeFunction { role_key, .. }
            | Self::ScopeFunction { role_key, .. }
            | Self::ScopeFunctionExecutionOptions { role_key, .. }
            | Self::ScopeParameter { role_key, .. }
            | Self::ScopeParameterAsOneOf { role_key, .. }
            | Self::UnscopeParameter { role_key, .. } => Some(*role_key),
        }
    }

    pub fn target_address(&self) -> Option<Address> {
        match self {
            Self::AssignRoles { .. } | Self::SetDefaultRole { .. } | Self::SetMultisend { .. } => None,
            Self::AllowTarget { target_address, .. }
            | Self::RevokeTarget { target_address, .. }
            | Self::ScopeTarget { target_address, .. }
            | Self::ScopeAllowFunction { target_address, .. }
            | Self::ScopeRevokeFunction { target_address, .. }
            | Self::ScopeFunction { target_address, .. }
            | Self::ScopeFunctionExecutionOptions { target_address, .. }
            | Self::ScopeParameter { target_address, .. }
            | Self::ScopeParameterAsOneOf { target_address, .. }
            | Self::UnscopeParameter { target_address, .. } => Some(*target_address),
        }
    }

    pub fn selector(&self) -> Option<Selector> {
        match self {
            Self::ScopeAllowFunction { selector, .. }
            | Self::ScopeRevokeFunction { selector, .. }
            | Self::ScopeFunction { selector, .. }
            | Self::ScopeFunctionExecutionOptions { selector, .. }
            | Self::ScopeParameter { selector, .. }
            | Self::ScopeParameterAsOneOf { selector, .. }
            | Self::UnscopeParameter { selector, .. } => Some(*selector),
            _ => None,
        }
    }

    pub fn param_index(&self) -> Option<u8> {
        match self {
            Self::ScopeParameter { index, .. }
            | Self::ScopeParameterAsOneOf { index, .. }
            | Self::UnscopeParameter { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Decode `IRoles` governance calldata.
    pub fn from_calldata(data: &[u8]) -> Result<Self, MutationError> {
        let call = IRolesCalls::abi_decode(data, true)?;
        Self::try_from(call)
    }

    /// The `IRoles` call this mutation encodes to.
    pub fn to_call(&self) -> IRolesCalls {
        use interfaces::IRoles::*;
        match self.clone() {
            Self::AssignRoles { module, role_keys, member_of } => {
                IRolesCalls::assignRoles(assignRolesCall { module, roleKeys: role_keys, memberOf: member_of })
            }
            Self::SetDefaultRole { module, role_key } => {
                IRolesCalls::setDefaultRole(setDefaultRoleCall { module, roleKey: role_key })
            }
            Self::SetMultisend { multisend } => IRolesCalls::setMultisend(setMultisendCall { multisend }),
            Self::AllowTarget { role_key, target_address, options } => IRolesCalls::allowTarget(allowTargetCall {
                roleKey: role_key,
                targetAddress: target_address,
                options: options as u8,
            }),
            Self::RevokeTarget { role_key, target_address } => {
                IRolesCalls::revokeTarget(revokeTargetCall { roleKey: role_key, targetAddress: target_address })
            }
            Self::ScopeTarget { role_key, target_address } => {
                IRolesCalls::scopeTarget(scopeTargetCall { roleKey: role_key, targetAddress: target_address })
            }
            Self::ScopeAllowFunction { role_key, target_address, selector, options } => {
                IRolesCalls::scopeAllowFunction(scopeAllowFunctionCall {
                    roleKey: role_key,
                    targetAddress: target_address,
                    selector,
                    options: options as u8,
                })
            }
            Self::ScopeRevokeFunction { role_key, target_address, selector } => {
                IRolesCalls::scopeRevokeFunction(scopeRevokeFunctionCall {
                    roleKey: role_key,
                    targetAddress: target_address,
                    selector,
                })
            }
            Self::ScopeFunction { role_key, target_address, selector, conditions, options } => {
                IRolesCalls::scopeFunction(scopeFunctionCall {
                    roleKey: role_key,
                    targetAddress: target_address,
                    selector,
                    conditions: conditions.into_iter().map(Into::into).collect(),
                    options: options as u8,
                })
            }
            Self::ScopeFunctionExecutionOptions { role_key, target_address, selector, options } => {
                IRolesCalls::scopeFunctionExecutionOptions(scopeFunctionExecutionOptionsCall {
                    roleKey: role_key,
                    targetAddress: target_address,
                    selector,
                    options: options as u8,
                })
            }
            Self::ScopeParameter { role_key, target_address, selector, index, param_type, operator, comp_value } => {
                IRolesCalls::scopeParameter(scopeParameterCall {
                    roleKey: role_key,
                    targetAddress: target_address,
                    selector,
                    index,
                    paramType: param_type as u8,
                    operator: operator as u8,
                    compValue: comp_value,
                })
            }
            Self::ScopeParameterAsOneOf { role_key, target_address, selector, index, param_type, comp_values } => {
                IRolesCalls::scopeParameterAsOneOf(scopeParameterAsOneOfCall {
                    roleKey: role_key,
                    targetAddress: target_address,
                    selector,
                    index,
                    paramType: param_type as u8,
                    compValues: comp_values,
                })
            }
            Self::UnscopeParameter { role_key, target_address, selector, index } => {
                IRolesCalls::unscopeParameter(unscopeParameterCall {
                    roleKey: role_key,
                    targetAddress: target_address,
                    selector,
                    index,
                })
            }
        }
    }

    /// ABI-encode as `IRoles` calldata.
    pub fn abi_encode(&self) -> Vec<u8> {
        self.to_call().abi_encode()
    }
}

impl From<ConditionFlat> for interfaces::ConditionFlat {
    fn from(node: ConditionFlat) -> Self {
        Self {
            parent: node.parent,
            paramType: node.param_type as u8,
            operator: node.operator as u8,
            compValue: node.comp_value,
        }
    }
}

impl TryFrom<interfaces::ConditionFlat> for ConditionFlat {
    type Error = InvalidEnumValue;

    fn try_from(node: interfaces::ConditionFlat) -> Result<Self, Self::Error> {
        Ok(Self {
            parent: node.parent,
            param_type: ParameterType::try_from(node.paramType)?,
            operator: Operator::try_from(node.operator)?,
            comp_value: node.compValue,
        })
    }
}

impl TryFrom<IRolesCalls> for PolicyMutation {
    type Error = MutationError;

    fn try_from(call: IRolesCalls) -> Result<Self, Self::Error> {
        let mutation = match call {
            IRolesCalls::assignRoles(c) => Self::AssignRoles {
                module: c.module,
                role_keys: c.roleKeys,
                member_of: c.memberOf,
            },
            IRolesCalls::setDefaultRole(c) => Self::SetDefaultRole { module: c.module, role_key: c.roleKey },
            IRolesCalls::setMultisend(c) => Self::SetMultisend { multisend: c.multisend },
            IRolesCalls::allowTarget(c) => Self::AllowTarget {
                role_key: c.roleKey,
                target_address: c.targetAddress,
                options: c.options.try_into()?,
            },
            IRolesCalls::revokeTarget(c) => Self::RevokeTarget { role_key: c.roleKey, target_address: c.targetAddress },
            IRolesCalls::scopeTarget(c) => Self::ScopeTarget { role_key: c.roleKey, target_address: c.targetAddress },
            IRolesCalls::scopeAllowFunction(c) => Self::ScopeAllowFunction {
                role_key: c.roleKey,
                target_address: c.targetAddress,
                selector: c.selector,
                options: c.options.try_into()?,
            },
            IRolesCalls::scopeRevokeFunction(c) => Self::ScopeRevokeFunction {
                role_key: c.roleKey,
                target_address: c.targetAddress,
                selector: c.selector,
            },
            IRolesCalls::scopeFunction(c) => Self::ScopeFunction {
                role_key: c.roleKey,
                target_address: c.targetAddress,
                selector: c.selector,
                conditions: c
                    .conditions
                    .into_iter()
                    .map(ConditionFlat::try_from)
                    .collect::<Result<_, _>>()?,
                options: c.options.try_into()?,
            },
            IRolesCalls::scopeFunctionExecutionOptions(c) => Self::ScopeFunctionExecutionOptions {
                role_key: c.roleKey,
                target_address: c.targetAddress,
                selector: c.selector,
                options: c.options.try_into()?,
            },
            IRolesCalls::scopeParameter(c) => Self::ScopeParameter {
                role_key: c.roleKey,
                target_address: c.targetAddress,
                selector: c.selector,
                index: c.index,
                param_type: c.paramType.try_into()?,
                operator: c.operator.try_into()?,
                comp_value: c.compValue,
            },
            IRolesCalls::scopeParameterAsOneOf(c) => Self::ScopeParameterAsOneOf {
                role_key: c.roleKey,
                target_address: c.targetAddress,
                selector: c.selector,
                index: c.index,
                param_type: c.paramType.try_into()?,
                comp_values: c.compValues,
            },
            IRolesCalls::unscopeParameter(c) => Self::UnscopeParameter {
                role_key: c.roleKey,
                target_address: c.targetAddress,
                selector: c.selector,
                index: c.index,
            },
            IRolesCalls::transferOwnership(_)
            | IRolesCalls::execTransactionFromModule(_)
            | IRolesCalls::execTransactionFromModuleReturnData(_)
            | IRolesCalls::execTransactionWithRole(_)
            | IRolesCalls::execTransactionWithRoleReturnData(_) => return Err(MutationError::NotAGovernanceCall),
        };
        Ok(mutation)
    }
}
