//! Condition trees: a validated, breadth-first arena of parameter constraints.
//!
//! The wire form ([`ConditionFlat`]) is checked once at governance time and
//! normalised into [`ConditionNode`]s that carry everything the evaluator needs
//! (child ranges, inline head sizes, decoded literals), so evaluation never has
//! to re-validate or allocate.

use core::ops::Range;
use std::collections::VecDeque;

use alloy_primitives::{Bytes, B256};
use roles_types::{ConditionFlat, Operator, ParameterType};

use crate::{
    errors::GovernanceError,
    utils::bytes::{ceil32, read_usize, WORD},
};

/// Upper bound on nodes per tree; bounds evaluator recursion and memory.
pub const MAX_CONDITIONS: usize = 256;

/// Normalised comparison value of a node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Literal {
    None,
    /// A full 32-byte word (static equality and relative comparisons).
    Word(B256),
    /// Length word followed by the zero-padded payload of a dynamic value.
    Encoded(Bytes),
    /// Candidate values, each in the form of `Word` or `Encoded`.
    OneOf(Vec<Bytes>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConditionNode {
    pub parent: usize,
    pub param_type: ParameterType,
    pub operator: Operator,
    pub literal: Literal,
    pub children: Range<usize>,
    /// Whether the value is encoded in place in its parent's head.
    pub inline: bool,
    /// Bytes this node occupies in its parent's head.
    pub head_size: usize,
}

/// Nested form of a condition subtree, used while editing a tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterCondition {
    pub param_type: ParameterType,
    pub operator: Operator,
    pub literal: Literal,
    pub children: Vec<ParameterCondition>,
}

impl ParameterCondition {
    /// Unconstrained word standing in for a parameter nobody scoped.
    pub fn placeholder() -> Self {
        Self { param_type: ParameterType::None, operator: Operator::Pass, literal: Literal::None, children: Vec::new() }
    }

    pub fn is_placeholder(&self) -> bool {
        self.param_type == ParameterType::None && self.operator == Operator::Pass && self.children.is_empty()
    }

    fn calldata() -> Self {
        Self { param_type: ParameterType::Calldata, operator: Operator::Matches, literal: Literal::None, children: Vec::new() }
    }

    /// Single-node constraint for `scopeParameter`. `node` is the index the
    /// parameter will occupy in the rebuilt tree, used in error reports.
    pub fn single(
        node: usize,
        param_type: ParameterType,
        operator: Operator,
        comp_value: &[u8],
    ) -> Result<Self, GovernanceError> {
        if operator == Operator::OneOf {
            return Err(GovernanceError::UnsuitableOneOfComparison);
        }
        check_operator(node, param_type, operator)?;
        let literal = literal_for(node, param_type, operator, comp_value)?;
        Ok(Self { param_type, operator, literal, children: Vec::new() })
    }

    /// Set-membership constraint for `scopeParameterAsOneOf`.
    pub fn one_of(node: usize, param_type: ParameterType, comp_values: &[Bytes]) -> Result<Self, GovernanceError> {
        if comp_values.len() < 2 {
            return Err(GovernanceError::NotEnoughCompValuesForOneOf);
        }
        check_operator(node, param_type, Operator::OneOf)?;
        let values = comp_values
            .iter()
            .map(|value| equality_value(node, param_type, value))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { param_type, operator: Operator::OneOf, literal: Literal::OneOf(values), children: Vec::new() })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConditionTree {
    nodes: Vec<ConditionNode>,
}

impl ConditionTree {
    /// Validate and normalise a flat, breadth-first condition list.
    ///
    /// `OneOf` cannot be expressed here; it is only reachable through
    /// [`ParameterCondition::one_of`].
    pub fn from_flat(conditions: &[ConditionFlat]) -> Result<Self, GovernanceError> {
        if conditions.len() > MAX_CONDITIONS {
            return Err(GovernanceError::TooManyConditions);
        }
        let raw = conditions
            .iter()
            .enumerate()
            .map(|(i, c)| {
                if c.operator == Operator::OneOf {
                    return Err(GovernanceError::UnsuitableOneOfComparison);
                }
                check_operator(i, c.param_type, c.operator)?;
                let literal = literal_for(i, c.param_type, c.operator, &c.comp_value)?;
                Ok(RawNode { parent: usize::from(c.parent), param_type: c.param_type, operator: c.operator, literal })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::build(raw)
    }

    /// Flatten a nested tree breadth-first and validate it.
    pub fn from_nested(root: ParameterCondition) -> Result<Self, GovernanceError> {
        let mut raw = Vec::new();
        let mut queue = VecDeque::from([(0usize, root)]);
        while let Some((parent, node)) = queue.pop_front() {
            let index = raw.len();
            if index >= MAX_CONDITIONS {
                return Err(GovernanceError::TooManyConditions);
            }
            for child in node.children {
                queue.push_back((index, child));
            }
            raw.push(RawNode { parent, param_type: node.param_type, operator: node.operator, literal: node.literal });
        }
        Self::build(raw)
    }

    /// Rebuild the nested form rooted at `index`.
    pub fn to_nested(&self, index: usize) -> ParameterCondition {
        let node = &self.nodes[index];
        ParameterCondition {
            param_type: node.param_type,
            operator: node.operator,
            literal: node.literal.clone(),
            children: node.children.clone().map(|child| self.to_nested(child)).collect(),
        }
    }

    /// Replace (or add) parameter `index` of `existing`, padding earlier
    /// parameters with placeholders. A missing tree starts from an empty
    /// calldata root.
    pub fn with_parameter(
        existing: Option<&Self>,
        index: usize,
        parameter: ParameterCondition,
    ) -> Result<Self, GovernanceError> {
        let mut root = existing.map(|tree| tree.to_nested(0)).unwrap_or_else(ParameterCondition::calldata);
        root.operator = Operator::Matches;
        while root.children.len() <= index {
            root.children.push(ParameterCondition::placeholder());
        }
        root.children[index] = parameter;
        Self::from_nested(root)
    }

    /// Drop the constraint on parameter `index`. Returns `None` once no
    /// parameter is left under the root.
    pub fn without_parameter(&self, index: usize) -> Result<Option<Self>, GovernanceError> {
        let mut root = self.to_nested(0);
        if let Some(child) = root.children.get_mut(index) {
            *child = ParameterCondition::placeholder();
        }
        while root.children.last().is_some_and(ParameterCondition::is_placeholder) {
            root.children.pop();
        }
        if root.children.is_empty() {
            return Ok(None);
        }
        Self::from_nested(root).map(Some)
    }

    pub fn root(&self) -> &ConditionNode {
        &self.nodes[0]
    }

    pub fn node(&self, index: usize) -> &ConditionNode {
        &self.nodes[index]
    }

    pub fn nodes(&self) -> &[ConditionNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn build(raw: Vec<RawNode>) -> Result<Self, GovernanceError> {
        if raw.len() > MAX_CONDITIONS {
            return Err(GovernanceError::TooManyConditions);
        }
        let root = raw.first().ok_or(GovernanceError::UnsuitableRootNode)?;
        if root.parent != 0 || root.param_type != ParameterType::Calldata {
            return Err(GovernanceError::UnsuitableRootNode);
        }

        let mut nodes: Vec<ConditionNode> = Vec::with_capacity(raw.len());
        let mut last_parent = 0;
        for (i, node) in raw.into_iter().enumerate() {
            if i > 0 {
                if node.parent >= i || node.parent < last_parent {
                    return Err(GovernanceError::NotBFS);
                }
                last_parent = node.parent;

                let parent = &mut nodes[node.parent];
                if !parent.param_type.is_container() {
                    return Err(GovernanceError::UnsuitableParent(i));
                }
                if parent.operator == Operator::Pass && node.operator != Operator::Pass {
                    return Err(GovernanceError::UnsupportedOperator(i));
                }
                if parent.children.is_empty() {
                    parent.children = i..i + 1;
                } else {
                    parent.children.end = i + 1;
                }
            }
            nodes.push(ConditionNode {
                parent: node.parent,
                param_type: node.param_type,
                operator: node.operator,
                literal: node.literal,
                children: 0..0,
                inline: false,
                head_size: WORD,
            });
        }

        for i in 0..nodes.len() {
            let node = &nodes[i];
            let child_count = node.children.len();
            let suitable = match node.param_type {
                ParameterType::None | ParameterType::Static | ParameterType::Dynamic => child_count == 0,
                ParameterType::Tuple => child_count > 0,
                ParameterType::Array => node.operator == Operator::Pass || child_count > 0,
                ParameterType::Calldata => true,
            };
            if !suitable {
                return Err(GovernanceError::UnsuitableChildCount(i));
            }
        }

        // Children always sit after their parent, so sizing back to front sees them first.
        for i in (0..nodes.len()).rev() {
            let (inline, head_size) = match nodes[i].param_type {
                ParameterType::None | ParameterType::Static => (true, WORD),
                ParameterType::Tuple => {
                    let children = &nodes[nodes[i].children.clone()];
                    if children.iter().all(|child| child.inline) {
                        (true, children.iter().map(|child| child.head_size).sum())
                    } else {
                        (false, WORD)
                    }
                }
                ParameterType::Dynamic | ParameterType::Array | ParameterType::Calldata => (false, WORD),
            };
            nodes[i].inline = inline;
            nodes[i].head_size = head_size;
        }

        for node in nodes.iter().filter(|node| node.param_type == ParameterType::Array) {
            let mut children = node.children.clone();
            if let Some(first) = children.next() {
                let shape = (nodes[first].param_type, nodes[first].inline, nodes[first].head_size);
                if let Some(odd) = children.find(|&c| (nodes[c].param_type, nodes[c].inline, nodes[c].head_size) != shape) {
                    return Err(GovernanceError::UnsuitableParameterType(odd));
                }
            }
        }

        Ok(Self { nodes })
    }
}

struct RawNode {
    parent: usize,
    param_type: ParameterType,
    operator: Operator,
    literal: Literal,
}

/// Which operators each parameter type supports.
fn check_operator(node: usize, param_type: ParameterType, operator: Operator) -> Result<(), GovernanceError> {
    use Operator as O;
    use ParameterType as T;

    match (param_type, operator) {
        (_, O::Pass) => Ok(()),
        (T::Tuple | T::Array | T::Calldata, O::Matches) => Ok(()),
        (T::Static | T::Dynamic, O::EqualTo) => Ok(()),
        (T::Dynamic, O::OneOf) => Ok(()),
        (T::Static, O::GreaterThan | O::LessThan) => Ok(()),
        (_, O::GreaterThan | O::LessThan) => Err(GovernanceError::UnsuitableRelativeComparison),
        (_, O::OneOf) => Err(GovernanceError::UnsuitableOneOfComparison),
        _ => Err(GovernanceError::UnsupportedOperator(node)),
    }
}

fn literal_for(
    node: usize,
    param_type: ParameterType,
    operator: Operator,
    comp_value: &[u8],
) -> Result<Literal, GovernanceError> {
    match operator {
        Operator::Pass | Operator::Matches if comp_value.is_empty() => Ok(Literal::None),
        Operator::Pass | Operator::Matches => Err(GovernanceError::UnsuitableCompValue(node)),
        Operator::GreaterThan | Operator::LessThan => static_word(node, comp_value).map(Literal::Word),
        Operator::EqualTo => match param_type {
            ParameterType::Static => static_word(node, comp_value).map(Literal::Word),
            _ => equality_value(node, param_type, comp_value).map(Literal::Encoded),
        },
        Operator::OneOf => Err(GovernanceError::UnsuitableOneOfComparison),
    }
}

fn static_word(node: usize, comp_value: &[u8]) -> Result<B256, GovernanceError> {
    B256::try_from(comp_value).map_err(|_| GovernanceError::UnsuitableCompValue(node))
}

/// Normalise one equality value: a static word as-is, a dynamic value from
/// `abi.encode(value)` with its leading offset word stripped.
fn equality_value(node: usize, param_type: ParameterType, comp_value: &[u8]) -> Result<Bytes, GovernanceError> {
    let unsuitable = || GovernanceError::UnsuitableCompValue(node);
    match param_type {
        ParameterType::Static => static_word(node, comp_value).map(|word| Bytes::copy_from_slice(word.as_slice())),
        ParameterType::Dynamic => {
            let end = comp_value.len();
            let offset = read_usize(comp_value, 0, end).map_err(|_| unsuitable())?;
            let len = read_usize(comp_value, WORD, end).map_err(|_| unsuitable())?;
            let padded = ceil32(len).map_err(|_| unsuitable())?;
            if offset != WORD || padded.checked_add(2 * WORD) != Some(end) {
                return Err(unsuitable());
            }
            Ok(Bytes::copy_from_slice(&comp_value[WORD..]))
        }
        _ => Err(GovernanceError::UnsupportedOperator(node)),
    }
}
