//! Selection state — which domain and role, if any, is open for detailed viewing.
//!
//! A role can only be open together with its domain; the sum type rules out
//! the "role without domain" state entirely.

use serde::Serialize;
use tracing::debug;

use crate::catalog::Catalog;
use crate::models::catalog::{Domain, Role};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    NoSelection,
    DomainOpen {
        domain: Domain,
    },
    RoleOpen {
        domain: Domain,
        role: Role,
    },
}

/// Outcome of a transition request. `Ignored` means the state is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Ignored,
}

impl Transition {
    pub fn applied(self) -> bool {
        self == Transition::Applied
    }
}

impl Selection {
    pub fn domain(&self) -> Option<&Domain> {
        match self {
            Selection::NoSelection => None,
            Selection::DomainOpen { domain } | Selection::RoleOpen { domain, .. } => Some(domain),
        }
    }

    pub fn role(&self) -> Option<&Role> {
        match self {
            Selection::RoleOpen { role, .. } => Some(role),
            _ => None,
        }
    }

    /// Allowed from any state. Always clears an open role.
    pub fn open_domain(&mut self, domain: &Domain) -> Transition {
        *self = Selection::DomainOpen {
            domain: domain.clone(),
        };
        Transition::Applied
    }

    /// Only from `DomainOpen`, and only for a role of the open domain.
    pub fn open_role(&mut self, role: &Role) -> Transition {
        match self {
            Selection::DomainOpen { domain } if domain.role(&role.title).is_some() => {
                let domain = domain.clone();
                *self = Selection::RoleOpen {
                    domain,
                    role: role.clone(),
                };
                Transition::Applied
            }
            _ => self.ignore("open_role"),
        }
    }

    /// `RoleOpen(d, r)` back to `DomainOpen(d)`.
    pub fn back(&mut self) -> Transition {
        match std::mem::take(self) {
            Selection::RoleOpen { domain, .. } => {
                *self = Selection::DomainOpen { domain };
                Transition::Applied
            }
            other => {
                *self = other;
                self.ignore("back")
            }
        }
    }

    pub fn close_all(&mut self) -> Transition {
        *self = Selection::NoSelection;
        Transition::Applied
    }

    /// Jumps straight to another domain's role, as picked from a related-role
    /// entry. Domain and role are replaced in a single assignment. Unknown
    /// domain ids, and roles the target domain does not own, leave the state
    /// untouched.
    pub fn switch_domain(&mut self, catalog: &Catalog, domain_id: u32, role: &Role) -> Transition {
        if !matches!(self, Selection::RoleOpen { .. }) {
            return self.ignore("switch_domain");
        }
        let Some(target) = catalog.domain(domain_id) else {
            debug!("switch_domain: domain {domain_id} not found");
            return Transition::Ignored;
        };
        if target.role(&role.title).is_none() {
            debug!("switch_domain: '{}' is not a role of domain {domain_id}", role.title);
            return Transition::Ignored;
        }
        *self = Selection::RoleOpen {
            domain: target.clone(),
            role: role.clone(),
        };
        Transition::Applied
    }

    fn ignore(&self, event: &str) -> Transition {
        debug!("Ignoring {event} in state {}", self.state_name());
        Transition::Ignored
    }

    pub fn state_name(&self) -> &'static str {
        match self {
            Selection::NoSelection => "no_selection",
            Selection::DomainOpen { .. } => "domain_open",
            Selection::RoleOpen { .. } => "role_open",
        }
    }
}
