//! Per-role policy: target rules, function rules and their condition trees.

use std::collections::BTreeMap;

use alloy_primitives::{Address, Bytes};
use roles_types::{Clearance, ConditionFlat, ExecutionOptions, Operator, ParameterType, RoleKey, Selector};
use tracing::debug;

use crate::{
    conditions::{ConditionTree, ParameterCondition},
    errors::GovernanceError,
};

/// What a function rule lets through, argument-wise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FunctionScope {
    /// Only execution options are configured; the function itself is not allowed.
    OptionsOnly,
    /// Any arguments.
    Wildcarded,
    Conditions(ConditionTree),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionRule {
    /// Function-level override; `None` falls back to the target's options.
    pub options: Option<ExecutionOptions>,
    pub scope: FunctionScope,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TargetRule {
    pub clearance: Clearance,
    pub options: ExecutionOptions,
    /// Kept across clearance changes; only consulted while `ScopedByFunction`.
    pub functions: BTreeMap<Selector, FunctionRule>,
}

/// The part of a target rule the checker can observe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EffectiveTarget {
    Wholesale(ExecutionOptions),
    Scoped { options: ExecutionOptions, functions: BTreeMap<Selector, FunctionRule> },
}

pub type EffectivePolicy = BTreeMap<RoleKey, BTreeMap<Address, EffectiveTarget>>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PolicyStore {
    roles: BTreeMap<RoleKey, BTreeMap<Address, TargetRule>>,
}

impl PolicyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self, role: &RoleKey, target: &Address) -> Option<&TargetRule> {
        self.roles.get(role)?.get(target)
    }

    /// The policy as seen by the permission checker: denied targets are
    /// dropped and function rules only show under scoped targets.
    pub fn effective(&self) -> EffectivePolicy {
        self.roles
            .iter()
            .filter_map(|(role, targets)| {
                let visible: BTreeMap<_, _> = targets
                    .iter()
                    .filter_map(|(address, rule)| {
                        let target = match rule.clearance {
                            Clearance::Denied => return None,
                            Clearance::AllowedWholesale => EffectiveTarget::Wholesale(rule.options),
                            Clearance::ScopedByFunction => EffectiveTarget::Scoped {
                                options: rule.options,
                                functions: rule.functions.clone(),
                            },
                        };
                        Some((*address, target))
                    })
                    .collect();
                (!visible.is_empty()).then(|| (*role, visible))
            })
            .collect()
    }

    fn target_mut(&mut self, role: RoleKey, target: Address) -> &mut TargetRule {
        self.roles.entry(role).or_default().entry(target).or_default()
    }

    pub fn allow_target(&mut self, role: RoleKey, target: Address, options: ExecutionOptions) {
        let rule = self.target_mut(role, target);
        rule.clearance = Clearance::AllowedWholesale;
        rule.options = options;
    }

    pub fn revoke_target(&mut self, role: RoleKey, target: Address) {
        let rule = self.target_mut(role, target);
        rule.clearance = Clearance::Denied;
        rule.options = ExecutionOptions::None;
    }

    pub fn scope_target(&mut self, role: RoleKey, target: Address) {
        let rule = self.target_mut(role, target);
        rule.clearance = Clearance::ScopedByFunction;
        rule.options = ExecutionOptions::None;
    }

    pub fn scope_allow_function(&mut self, role: RoleKey, target: Address, selector: Selector, options: ExecutionOptions) {
        let rule = FunctionRule { options: Some(options), scope: FunctionScope::Wildcarded };
        self.target_mut(role, target).functions.insert(selector, rule);
    }

    pub fn scope_revoke_function(&mut self, role: RoleKey, target: Address, selector: Selector) {
        self.target_mut(role, target).functions.remove(&selector);
    }

    pub fn scope_function(
        &mut self,
        role: RoleKey,
        target: Address,
        selector: Selector,
        conditions: &[ConditionFlat],
        options: ExecutionOptions,
    ) -> Result<(), GovernanceError> {
        let tree = ConditionTree::from_flat(conditions)?;
        let rule = FunctionRule { options: Some(options), scope: FunctionScope::Conditions(tree) };
        self.target_mut(role, target).functions.insert(selector, rule);
        Ok(())
    }

    pub fn scope_function_execution_options(
        &mut self,
        role: RoleKey,
        target: Address,
        selector: Selector,
        options: ExecutionOptions,
    ) {
        self.target_mut(role, target)
            .functions
            .entry(selector)
            .or_insert(FunctionRule { options: None, scope: FunctionScope::OptionsOnly })
            .options = Some(options);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn scope_parameter(
        &mut self,
        role: RoleKey,
        target: Address,
        selector: Selector,
        index: u8,
        param_type: ParameterType,
        operator: Operator,
        comp_value: &[u8],
    ) -> Result<(), GovernanceError> {
        let parameter = ParameterCondition::single(parameter_node(index), param_type, operator, comp_value)?;
        self.set_parameter(role, target, selector, index, parameter)
    }

    pub fn scope_parameter_as_one_of(
        &mut self,
        role: RoleKey,
        target: Address,
        selector: Selector,
        index: u8,
        param_type: ParameterType,
        comp_values: &[Bytes],
    ) -> Result<(), GovernanceError> {
        let parameter = ParameterCondition::one_of(parameter_node(index), param_type, comp_values)?;
        self.set_parameter(role, target, selector, index, parameter)
    }

    pub fn unscope_parameter(&mut self, role: RoleKey, target: Address, selector: Selector, index: u8) -> Result<(), GovernanceError> {
        let Some(rule) = self.roles.get_mut(&role).and_then(|t| t.get_mut(&target)) else {
            return Ok(());
        };
        let Some(function) = rule.functions.get(&selector) else {
            return Ok(());
        };

        let scope = match &function.scope {
            FunctionScope::Conditions(tree) => match tree.without_parameter(usize::from(index))? {
                Some(tree) => FunctionScope::Conditions(tree),
                None => FunctionScope::OptionsOnly,
            },
            FunctionScope::Wildcarded | FunctionScope::OptionsOnly => FunctionScope::OptionsOnly,
        };

        if scope == FunctionScope::OptionsOnly && function.options.is_none() {
            debug!(%selector, "function rule left without constraints or options, removing");
            rule.functions.remove(&selector);
        } else if let Some(function) = rule.functions.get_mut(&selector) {
            function.scope = scope;
        }
        Ok(())
    }

    fn set_parameter(
        &mut self,
        role: RoleKey,
        target: Address,
        selector: Selector,
        index: u8,
        parameter: ParameterCondition,
    ) -> Result<(), GovernanceError> {
        let existing = self
            .target(&role, &target)
            .and_then(|rule| rule.functions.get(&selector))
            .and_then(|function| match &function.scope {
                FunctionScope::Conditions(tree) => Some(tree),
                _ => None,
            });
        let tree = ConditionTree::with_parameter(existing, usize::from(index), parameter)?;

        self.target_mut(role, target)
            .functions
            .entry(selector)
            .or_insert(FunctionRule { options: None, scope: FunctionScope::OptionsOnly })
            .scope = FunctionScope::Conditions(tree);
        Ok(())
    }
}

/// Direct children of the calldata root sit right after it in BFS order.
fn parameter_node(index: u8) -> usize {
    usize::from(index) + 1
}
