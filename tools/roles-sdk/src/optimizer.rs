//! Pruning of governance call sequences.
//!
//! A call is dropped when a later call that survives pruning fully overrides its
//! effect. Calls only interact when they mutate the same role and target;
//! membership and module settings are never pruned.

use roles_types::{CallKind, PolicyMutation};
use tracing::debug;

/// Granularity at which a call writes the policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Level {
    /// allowTarget / revokeTarget
    Clearance,
    /// scopeTarget
    Scoping,
    /// scopeFunction / scopeAllowFunction / scopeRevokeFunction
    Function,
    /// scopeFunctionExecutionOptions
    Options,
    /// scopeParameter / scopeParameterAsOneOf / unscopeParameter
    Parameter,
}

fn level(kind: CallKind) -> Option<Level> {
    match kind {
        CallKind::AssignRoles | CallKind::SetDefaultRole | CallKind::SetMultisend => None,
        CallKind::AllowTarget | CallKind::RevokeTarget => Some(Level::Clearance),
        CallKind::ScopeTarget => Some(Level::Scoping),
        CallKind::ScopeFunction | CallKind::ScopeAllowFunction | CallKind::ScopeRevokeFunction => {
            Some(Level::Function)
        }
        CallKind::ScopeFunctionExecutionOptions => Some(Level::Options),
        CallKind::ScopeParameter | CallKind::ScopeParameterAsOneOf | CallKind::UnscopeParameter => {
            Some(Level::Parameter)
        }
    }
}

/// Whether `later` makes `earlier` redundant.
pub fn is_overridden_by(earlier: &PolicyMutation, later: &PolicyMutation) -> bool {
    let (Some(obsolete), Some(overriding)) = (level(earlier.kind()), level(later.kind())) else {
        return false;
    };
    if earlier.role_key() != later.role_key() || earlier.target_address() != later.target_address() {
        return false;
    }
    let same_function = earlier.selector() == later.selector();
    let same_parameter = same_function && earlier.param_index() == later.param_index();

    match overriding {
        Level::Clearance => true,
        Level::Scoping => matches!(obsolete, Level::Clearance | Level::Scoping),
        Level::Function => matches!(obsolete, Level::Function | Level::Options | Level::Parameter) && same_function,
        Level::Parameter => obsolete == Level::Parameter && same_parameter,
        Level::Options => obsolete == Level::Options && same_function,
    }
}

/// Remove calls whose effect is superseded by a later call, preserving the
/// relative order of the survivors.
///
/// Filtering runs back to front against the calls already kept, so a function
/// call followed by `allowTarget` and then `scopeTarget` survives.
pub fn remove_obsolete_calls(calls: &[PolicyMutation]) -> Vec<PolicyMutation> {
    let mut kept: Vec<&PolicyMutation> = Vec::with_capacity(calls.len());
    for call in calls.iter().rev() {
        if let Some(later) = kept.iter().find(|later| is_overridden_by(call, later)) {
            debug!(obsolete = ?call.kind(), by = ?later.kind(), target = ?call.target_address(), "dropping call");
            continue;
        }
        kept.push(call);
    }
    kept.into_iter().rev().cloned().collect()
}
