//! Role-based permission checking for calls an avatar makes on behalf of its modules.
//!
//! Every request is resolved to a role, checked against that role's policy
//! (target clearance, function rules, parameter condition trees and execution
//! options) and only then forwarded to the [`Avatar`](roles_types::Avatar).

pub mod checker;
pub mod conditions;
pub mod decoder;
pub mod errors;
pub mod evaluator;
pub mod events;
pub mod membership;
pub mod multisend;
pub mod roles;
pub mod store;
pub mod utils;

#[cfg(test)]
mod tests;

pub use checker::Transaction;
pub use conditions::{ConditionTree, Literal, ParameterCondition};
pub use errors::{ConditionFailure, DecodeError, DispatchError, GovernanceError, PermissionError};
pub use events::RolesEvent;
pub use roles::{Execution, Roles, RolesConfig, TransactionRequest};
pub use store::{EffectivePolicy, EffectiveTarget, FunctionRule, FunctionScope, PolicyStore, TargetRule};
