//! Shared types for the Roles modifier: permission model, governance calls, avatar
//! interface and ABI surface.

pub mod avatar;
pub mod interfaces;
pub mod mutations;
pub mod permissions;

use alloy_primitives::{FixedBytes, B256};

/// Opaque role identifier.
pub type RoleKey = B256;

/// 4-byte function selector.
pub type Selector = FixedBytes<4>;

pub use avatar::Avatar;
pub use mutations::{CallKind, MutationError, PolicyMutation};
pub use permissions::{
    Clearance, ConditionFlat, ExecutionOptions, InvalidEnumValue, Operation, Operator, ParameterType,
};
