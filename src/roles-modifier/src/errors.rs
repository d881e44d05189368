use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolError;
use roles_types::{interfaces::IRoles, Operator};

/// Errors while locating a parameter inside ABI-encoded calldata.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("read of {len} bytes at offset {offset} is out of bounds")]
    OutOfBounds { offset: usize, len: usize },
    #[error("offset arithmetic overflowed")]
    OffsetOverflow,
    #[error("array holds {actual} elements, condition expects {expected}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("calldata is shorter than a function selector")]
    MissingSelector,
}

/// Why a condition tree rejected a calldata buffer.
///
/// Callers only ever see `ParameterNotAllowed`; the split is kept for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConditionFailure {
    #[error("node {node}: {error}")]
    Decode { node: usize, error: DecodeError },
    #[error("node {node}: {operator:?} comparison failed")]
    Comparison { node: usize, operator: Operator },
}

impl ConditionFailure {
    pub const fn node(&self) -> usize {
        match self {
            Self::Decode { node, .. } | Self::Comparison { node, .. } => *node,
        }
    }
}

/// Call-time verdict of the permission checker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PermissionError {
    #[error("delegate call not allowed")]
    DelegateCallNotAllowed,
    #[error("target address not allowed")]
    TargetAddressNotAllowed,
    #[error("function not allowed")]
    FunctionNotAllowed,
    #[error("send not allowed")]
    SendNotAllowed,
    #[error("parameter not allowed ({0})")]
    ParameterNotAllowed(ConditionFailure),
    #[error("function signature too short")]
    FunctionSignatureTooShort,
    #[error("unacceptable multisend offset")]
    UnacceptableMultiSendOffset,
    #[error("malformed multisend payload")]
    MalformedMultiSend,
}

impl PermissionError {
    /// Numeric status carried by the `ConditionViolation` revert.
    pub const fn status_code(&self) -> u8 {
        match self {
            Self::DelegateCallNotAllowed => 1,
            Self::TargetAddressNotAllowed => 2,
            Self::FunctionNotAllowed => 3,
            Self::SendNotAllowed => 4,
            Self::ParameterNotAllowed(_) => 5,
            Self::FunctionSignatureTooShort => 6,
            Self::UnacceptableMultiSendOffset => 7,
            Self::MalformedMultiSend => 8,
        }
    }
}

/// Rejections of an execution request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("invoker holds no suitable role")]
    NoMembership,
    #[error("invoker has no default role configured")]
    NoDefaultRole,
    #[error("condition violation: {0}")]
    ConditionViolation(#[from] PermissionError),
    #[error("module transaction failed")]
    ModuleTransactionFailed,
}

impl DispatchError {
    /// ABI-encoded `IRoles` custom error.
    pub fn revert_data(&self) -> Bytes {
        let data = match self {
            Self::NoMembership => IRoles::NoMembership {}.abi_encode(),
            Self::NoDefaultRole => IRoles::NoDefaultRole {}.abi_encode(),
            Self::ConditionViolation(err) => IRoles::ConditionViolation { status: err.status_code() }.abi_encode(),
            Self::ModuleTransactionFailed => IRoles::ModuleTransactionFailed {}.abi_encode(),
        };
        data.into()
    }
}

/// Rejections of a governance call. The store is left untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GovernanceError {
    #[error("{0} is not the owner")]
    NotOwner(Address),
    #[error("governance calldata could not be decoded")]
    MalformedCall,
    #[error("role keys and membership flags differ in length")]
    ArraysDifferentLength,
    #[error("one-of comparison is not suitable here")]
    UnsuitableOneOfComparison,
    #[error("relative comparison is only suitable for static parameters")]
    UnsuitableRelativeComparison,
    #[error("one-of comparison needs at least two values")]
    NotEnoughCompValuesForOneOf,
    #[error("condition tree exceeds the node limit")]
    TooManyConditions,
    #[error("root node must be a calldata node parented by itself")]
    UnsuitableRootNode,
    #[error("condition nodes are not in breadth-first order")]
    NotBFS,
    #[error("node {0} has an unsuitable parent")]
    UnsuitableParent(usize),
    #[error("node {0} has an unsuitable number of children")]
    UnsuitableChildCount(usize),
    #[error("node {0} uses an operator its parameter type does not support")]
    UnsupportedOperator(usize),
    #[error("node {0} has an unsuitable comparison value")]
    UnsuitableCompValue(usize),
    #[error("node {0} has an unsuitable parameter type")]
    UnsuitableParameterType(usize),
}

impl GovernanceError {
    /// ABI-encoded `IRoles` custom error.
    pub fn revert_data(&self) -> Bytes {
        let index = |i: &usize| U256::from(*i);
        let data = match self {
            Self::NotOwner(sender) => IRoles::NotOwner { sender: *sender }.abi_encode(),
            Self::MalformedCall => IRoles::MalformedCall {}.abi_encode(),
            Self::ArraysDifferentLength => IRoles::ArraysDifferentLength {}.abi_encode(),
            Self::UnsuitableOneOfComparison => IRoles::UnsuitableOneOfComparison {}.abi_encode(),
            Self::UnsuitableRelativeComparison => IRoles::UnsuitableRelativeComparison {}.abi_encode(),
            Self::NotEnoughCompValuesForOneOf => IRoles::NotEnoughCompValuesForOneOf {}.abi_encode(),
            Self::TooManyConditions => IRoles::TooManyConditions {}.abi_encode(),
            Self::UnsuitableRootNode => IRoles::UnsuitableRootNode {}.abi_encode(),
            Self::NotBFS => IRoles::NotBFS {}.abi_encode(),
            Self::UnsuitableParent(i) => IRoles::UnsuitableParent { index: index(i) }.abi_encode(),
            Self::UnsuitableChildCount(i) => IRoles::UnsuitableChildCount { index: index(i) }.abi_encode(),
            Self::UnsupportedOperator(i) => IRoles::UnsupportedOperator { index: index(i) }.abi_encode(),
            Self::UnsuitableCompValue(i) => IRoles::UnsuitableCompValue { index: index(i) }.abi_encode(),
            Self::UnsuitableParameterType(i) => IRoles::UnsuitableParameterType { index: index(i) }.abi_encode(),
        };
        data.into()
    }
}
