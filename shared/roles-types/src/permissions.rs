use alloy_primitives::Bytes;
use serde::{Deserialize, Serialize};

/// Raised when a raw discriminant does not name a known variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} value {value}")]
pub struct InvalidEnumValue {
    pub kind: &'static str,
    pub value: u8,
}

/// Access level a role has on a target address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum Clearance {
    #[default]
    Denied = 0,
    AllowedWholesale = 1,
    ScopedByFunction = 2,
}

/// Value-transfer and delegate-call permissions, independent of argument content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum ExecutionOptions {
    #[default]
    None = 0,
    Send = 1,
    DelegateCall = 2,
    Both = 3,
}

impl ExecutionOptions {
    pub const fn can_send(self) -> bool {
        matches!(self, Self::Send | Self::Both)
    }

    pub const fn can_delegate_call(self) -> bool {
        matches!(self, Self::DelegateCall | Self::Both)
    }
}

/// How the avatar executes a forwarded call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum Operation {
    #[default]
    Call = 0,
    DelegateCall = 1,
}

impl Operation {
    pub const fn is_delegate_call(self) -> bool {
        matches!(self, Self::DelegateCall)
    }
}

/// Shape of an ABI-encoded parameter, as far as the evaluator needs to know it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum ParameterType {
    /// Unconstrained placeholder occupying a single head word.
    None = 0,
    /// Fixed 32-byte word (uint, int, address, bool, bytesN).
    Static = 1,
    /// Length-prefixed `bytes` or `string`.
    Dynamic = 2,
    Tuple = 3,
    Array = 4,
    /// A selector-prefixed, ABI-encoded call body.
    Calldata = 5,
}

impl ParameterType {
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Tuple | Self::Array | Self::Calldata)
    }
}

/// Comparison applied at a condition node.
///
/// Discriminants leave gaps for operators that are not supported yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum Operator {
    Pass = 0,
    Matches = 5,
    EqualTo = 16,
    GreaterThan = 17,
    LessThan = 18,
    OneOf = 19,
}

impl Operator {
    pub const fn is_relative(self) -> bool {
        matches!(self, Self::GreaterThan | Self::LessThan)
    }
}

/// Wire form of a single node of a condition tree.
///
/// Node 0 is the root and names itself as parent. The remaining nodes must be
/// listed breadth-first so that siblings are contiguous.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionFlat {
    pub parent: u8,
    pub param_type: ParameterType,
    pub operator: Operator,
    #[serde(default)]
    pub comp_value: Bytes,
}

impl ConditionFlat {
    pub fn new(parent: u8, param_type: ParameterType, operator: Operator, comp_value: impl Into<Bytes>) -> Self {
        Self { parent, param_type, operator, comp_value: comp_value.into() }
    }
}

impl TryFrom<u8> for Clearance {
    type Error = InvalidEnumValue;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        let clearance = match value {
            0 => Self::Denied,
            1 => Self::AllowedWholesale,
            2 => Self::ScopedByFunction,
            _ => return Err(InvalidEnumValue { kind: "clearance", value }),
        };
        Ok(clearance)
    }
}

impl TryFrom<u8> for ExecutionOptions {
    type Error = InvalidEnumValue;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        let options = match value {
            0 => Self::None,
            1 => Self::Send,
            2 => Self::DelegateCall,
            3 => Self::Both,
            _ => return Err(InvalidEnumValue { kind: "execution options", value }),
        };
        Ok(options)
    }
}

impl TryFrom<u8> for Operation {
    type Error = InvalidEnumValue;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Call),
            1 => Ok(Self::DelegateCall),
            _ => Err(InvalidEnumValue { kind: "operation", value }),
        }
    }
}

impl TryFrom<u8> for ParameterType {
    type Error = InvalidEnumValue;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use ParameterType::*;
        let kind = match value {
            0 => None,
            1 => Static,
            2 => Dynamic,
            3 => Tuple,
            4 => Array,
            5 => Calldata,
            _ => return Err(InvalidEnumValue { kind: "parameter type", value }),
        };
        Ok(kind)
    }
}

impl TryFrom<u8> for Operator {
    type Error = InvalidEnumValue;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use Operator::*;
        let op = match value {
            0 => Pass,
            5 => Matches,
            16 => EqualTo,
            17 => GreaterThan,
            18 => LessThan,
            19 => OneOf,
            _ => return Err(InvalidEnumValue { kind: "operator", value }),
        };
        Ok(op)
    }
}
