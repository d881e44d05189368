use std::collections::{BTreeMap, BTreeSet};

use alloy_primitives::Address;
use roles_types::RoleKey;

use crate::errors::{DispatchError, GovernanceError};

/// Roles held by one invoker.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoleAssignment {
    pub roles: BTreeSet<RoleKey>,
    /// Role used when a call does not name one.
    pub default_role: Option<RoleKey>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Memberships {
    members: BTreeMap<Address, RoleAssignment>,
}

impl Memberships {
    pub fn assignment(&self, invoker: &Address) -> Option<&RoleAssignment> {
        self.members.get(invoker)
    }

    /// Grant (`true`) or revoke (`false`) each role in `role_keys` for `module`.
    pub fn assign_roles(&mut self, module: Address, role_keys: &[RoleKey], member_of: &[bool]) -> Result<(), GovernanceError> {
        if role_keys.len() != member_of.len() {
            return Err(GovernanceError::ArraysDifferentLength);
        }
        let assignment = self.members.entry(module).or_default();
        for (role, member) in role_keys.iter().zip(member_of) {
            if *member {
                assignment.roles.insert(*role);
            } else {
                assignment.roles.remove(role);
            }
        }
        Ok(())
    }

    /// Membership of `role_key` is not required; it is checked when the default is used.
    pub fn set_default_role(&mut self, module: Address, role_key: RoleKey) {
        self.members.entry(module).or_default().default_role = Some(role_key);
    }

    /// Pick the role a call from `invoker` runs under.
    pub fn resolve(&self, invoker: &Address, requested: Option<RoleKey>) -> Result<RoleKey, DispatchError> {
        let assignment = self
            .members
            .get(invoker)
            .filter(|assignment| !assignment.roles.is_empty())
            .ok_or(DispatchError::NoMembership)?;

        let role = match (requested, assignment.default_role) {
            (Some(role), _) => role,
            (None, Some(default)) => default,
            (None, None) => return Err(DispatchError::NoDefaultRole),
        };
        if assignment.roles.contains(&role) {
            Ok(role)
        } else {
            Err(DispatchError::NoMembership)
        }
    }
}
