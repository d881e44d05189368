use alloy_primitives::U256;
use roles_types::{Operator, ParameterType};

use crate::{
    conditions::{ConditionNode, ConditionTree, Literal},
    decoder::{self, Scope},
    errors::{ConditionFailure, DecodeError},
    utils::bytes::read_word,
};

/// Evaluate `tree` against a full calldata buffer (selector included).
///
/// Pre-order walk that stops at the first failing node. Read-only and
/// allocation-free.
pub fn evaluate(tree: &ConditionTree, calldata: &[u8]) -> Result<(), ConditionFailure> {
    let root = tree.root();
    if root.operator == Operator::Pass {
        return Ok(());
    }
    let scope = Scope::root(calldata).map_err(|error| ConditionFailure::Decode { node: 0, error })?;
    evaluate_children(tree, 0, calldata, &scope)
}

fn evaluate_children(tree: &ConditionTree, index: usize, data: &[u8], scope: &Scope) -> Result<(), ConditionFailure> {
    let mut slot = scope.head;
    for child in tree.node(index).children.clone() {
        evaluate_node(tree, child, data, scope, slot)?;
        let size = tree.node(child).head_size;
        slot = slot
            .checked_add(size)
            .ok_or(ConditionFailure::Decode { node: child, error: DecodeError::OffsetOverflow })?;
    }
    Ok(())
}

fn evaluate_node(
    tree: &ConditionTree,
    index: usize,
    data: &[u8],
    scope: &Scope,
    slot: usize,
) -> Result<(), ConditionFailure> {
    let node = tree.node(index);
    if node.operator == Operator::Pass {
        return Ok(());
    }
    let decode = |error| ConditionFailure::Decode { node: index, error };

    let location = decoder::locate(data, scope, slot, node.inline).map_err(decode)?;
    match node.param_type {
        ParameterType::Static => {
            let word = read_word(data, location, scope.end).map_err(decode)?;
            compare(index, node, word)
        }
        ParameterType::Dynamic => {
            let value = decoder::dynamic(data, scope, location).map_err(decode)?;
            compare(index, node, value)
        }
        ParameterType::Tuple => {
            let inner = if node.inline { scope.inline_tuple(location) } else { scope.tuple(location) };
            evaluate_children(tree, index, data, &inner)
        }
        ParameterType::Array => {
            let inner = scope.array(data, location, node.children.len()).map_err(decode)?;
            evaluate_children(tree, index, data, &inner)
        }
        ParameterType::Calldata => {
            let inner = scope.calldata(data, location).map_err(decode)?;
            evaluate_children(tree, index, data, &inner)
        }
        ParameterType::None => Ok(()),
    }
}

fn compare(index: usize, node: &ConditionNode, value: &[u8]) -> Result<(), ConditionFailure> {
    let passed = match (node.operator, &node.literal) {
        (Operator::EqualTo, Literal::Word(expected)) => value == expected.as_slice(),
        (Operator::EqualTo, Literal::Encoded(expected)) => value == &expected[..],
        (Operator::GreaterThan, Literal::Word(bound)) => U256::from_be_slice(value) > U256::from_be_bytes(bound.0),
        (Operator::LessThan, Literal::Word(bound)) => U256::from_be_slice(value) < U256::from_be_bytes(bound.0),
        (Operator::OneOf, Literal::OneOf(values)) => values.iter().any(|candidate| value == &candidate[..]),
        _ => false,
    };
    if passed {
        Ok(())
    } else {
        Err(ConditionFailure::Comparison { node: index, operator: node.operator })
    }
}
