// SuperAdmin Portal
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Role to module visibility map
//!
//! Visibility is the coarse navigation gate: it decides which sections of the
//! portal are shown for a role. It grants nothing by itself; the user's
//! permission grants remain the authority for every action.
//!
//! Unknown role slugs resolve to [`FALLBACK_ROLE`], the broadest role. This
//! mirrors the behaviour of the portal today and is logged at warn level
//! whenever it happens.

use crate::modules::{
    ANALYTICS, AUDIT_LOGS, BILLING_PLANS, LEADS, ModuleDefinition, PAYMENTS_REVENUE, PLATFORM_SETTINGS, PLATFORM_USERS, REFUNDS, ROLE_MANAGEMENT, SALES_PIPELINE, SUBSCRIPTIONS,
    SUPPORT_TICKETS, TENANT_CRUD, definition_for,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const SUPER_ADMIN: &str = "super-admin";
pub const PLATFORM_SALES: &str = "platform-sales";
pub const PLATFORM_SALES_JUNIOR: &str = "platform-sales-junior";
pub const PLATFORM_SALES_SENIOR: &str = "platform-sales-senior";
pub const PLATFORM_FINANCE_ADMIN: &str = "platform-finance-admin";
pub const PLATFORM_SUPPORT: &str = "platform-support";
pub const PLATFORM_AUDITOR: &str = "platform-auditor";

/// Role used for every slug missing from the map
pub const FALLBACK_ROLE: &str = SUPER_ADMIN;

/// Modules visible for one role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleModules {
    pub role: &'static str,
    pub modules: &'static [&'static str],
}

static ROLE_MODULES: [RoleModules; 7] = [
    RoleModules {
        role: SUPER_ADMIN,
        modules: &[
            PLATFORM_SETTINGS,
            TENANT_CRUD,
            SUBSCRIPTIONS,
            BILLING_PLANS,
            PAYMENTS_REVENUE,
            REFUNDS,
            LEADS,
            SALES_PIPELINE,
            SUPPORT_TICKETS,
            AUDIT_LOGS,
            ANALYTICS,
            PLATFORM_USERS,
            ROLE_MANAGEMENT,
        ],
    },
    RoleModules {
        role: PLATFORM_SALES,
        modules: &[LEADS, SALES_PIPELINE, TENANT_CRUD, SUBSCRIPTIONS, ANALYTICS],
    },
    RoleModules {
        role: PLATFORM_SALES_JUNIOR,
        modules: &[LEADS, SALES_PIPELINE],
    },
    RoleModules {
        role: PLATFORM_SALES_SENIOR,
        modules: &[LEADS, SALES_PIPELINE, TENANT_CRUD, SUBSCRIPTIONS, BILLING_PLANS, ANALYTICS],
    },
    RoleModules {
        role: PLATFORM_FINANCE_ADMIN,
        modules: &[PAYMENTS_REVENUE, REFUNDS, SUBSCRIPTIONS, BILLING_PLANS, ANALYTICS, AUDIT_LOGS],
    },
    RoleModules {
        role: PLATFORM_SUPPORT,
        modules: &[SUPPORT_TICKETS, TENANT_CRUD, SUBSCRIPTIONS, REFUNDS],
    },
    RoleModules {
        role: PLATFORM_AUDITOR,
        modules: &[AUDIT_LOGS, ANALYTICS, PAYMENTS_REVENUE, TENANT_CRUD],
    },
];

/// Every role in the map, fallback role first
pub fn list_roles() -> &'static [RoleModules] {
    &ROLE_MODULES
}

/// Check whether a role slug has its own entry in the map
pub fn is_known_role(role_slug: &str) -> bool {
    find_role(role_slug).is_some()
}

fn find_role(role_slug: &str) -> Option<&'static RoleModules> {
    ROLE_MODULES.iter().find(|entry| entry.role == role_slug)
}

fn fallback_entry() -> &'static RoleModules {
    // ROLE_MODULES[0] is the fallback role; see test_fallback_role_is_first
    &ROLE_MODULES[0]
}

/// Resolve the map entry for a role, applying the fallback for unknown slugs
pub fn resolve_role(role_slug: &str) -> &'static RoleModules {
    match find_role(role_slug) {
        Some(entry) => entry,
        None => {
            warn!(role = %role_slug, fallback = %FALLBACK_ROLE, "Unknown role, using fallback role module set");
            fallback_entry()
        }
    }
}

/// Set of module ids visible for a role
///
/// Iteration follows the map's display order; equality compares membership.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(transparent)]
pub struct ModuleSet {
    modules: &'static [&'static str],
}

impl ModuleSet {
    pub fn contains(&self, module_id: &str) -> bool {
        self.modules.iter().any(|module| *module == module_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> {
        self.modules.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn as_slice(&self) -> &'static [&'static str] {
        self.modules
    }
}

impl PartialEq for ModuleSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|module| other.contains(module))
    }
}

impl Eq for ModuleSet {}

impl IntoIterator for ModuleSet {
    type Item = &'static str;
    type IntoIter = std::iter::Copied<std::slice::Iter<'static, &'static str>>;

    fn into_iter(self) -> Self::IntoIter {
        self.modules.iter().copied()
    }
}

/// Modules visible for a role; unknown roles get the fallback role's set
pub fn modules_for_role(role_slug: &str) -> ModuleSet {
    ModuleSet { modules: resolve_role(role_slug).modules }
}

/// Check whether a module is visible for a role
pub fn is_module_visible_for_role(module_id: &str, role_slug: &str) -> bool {
    modules_for_role(role_slug).contains(module_id)
}

/// Registry definitions of the modules visible for a role, for navigation
pub fn visible_modules_for_role(role_slug: &str) -> Vec<&'static ModuleDefinition> {
    modules_for_role(role_slug).iter().filter_map(definition_for).collect()
}

/// Role identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSlug(String);

impl RoleSlug {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this slug has its own map entry
    pub fn is_known(&self) -> bool {
        is_known_role(&self.0)
    }

    /// Modules visible for this role
    pub fn modules(&self) -> ModuleSet {
        modules_for_role(&self.0)
    }
}

impl std::fmt::Display for RoleSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RoleSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::{is_registered, list_modules};

    #[test]
    fn test_fallback_role_is_first() {
        assert_eq!(fallback_entry().role, FALLBACK_ROLE);
    }

    #[test]
    fn test_super_admin_sees_every_module() {
        let modules = modules_for_role(SUPER_ADMIN);
        assert_eq!(modules.len(), 13);
        for module in list_modules() {
            assert!(modules.contains(module.id), "super-admin missing {}", module.id);
        }
    }

    #[test]
    fn test_role_map_references_registered_modules() {
        for entry in list_roles() {
            assert!(!entry.modules.is_empty(), "role {} has no modules", entry.role);
            for module in entry.modules {
                assert!(is_registered(module), "role {} references unknown module {}", entry.role, module);
            }
        }
    }

    #[test]
    fn test_unknown_role_falls_back() {
        assert!(!is_known_role("platform-intern"));
        assert_eq!(modules_for_role("platform-intern"), modules_for_role(SUPER_ADMIN));
        assert_eq!(modules_for_role(""), modules_for_role(SUPER_ADMIN));
        // Slugs are case-sensitive
        assert_eq!(modules_for_role("Platform-Sales"), modules_for_role(SUPER_ADMIN));
    }

    #[test]
    fn test_junior_sales_visibility() {
        assert!(is_module_visible_for_role(LEADS, PLATFORM_SALES_JUNIOR));
        assert!(!is_module_visible_for_role(PAYMENTS_REVENUE, PLATFORM_SALES_JUNIOR));
        assert!(!is_module_visible_for_role(PLATFORM_SETTINGS, PLATFORM_SALES_JUNIOR));
    }

    #[test]
    fn test_module_set_equality_ignores_order() {
        let a = ModuleSet { modules: &[LEADS, SALES_PIPELINE] };
        let b = ModuleSet { modules: &[SALES_PIPELINE, LEADS] };
        let c = ModuleSet { modules: &[LEADS] };

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_visible_modules_for_role() {
        let labels: Vec<_> = visible_modules_for_role(PLATFORM_SUPPORT).iter().map(|module| module.label).collect();
        assert_eq!(labels, vec!["Support Tickets", "Tenant Management", "Subscriptions", "Refunds"]);
    }

    #[test]
    fn test_role_slug() {
        let slug = RoleSlug::new(PLATFORM_AUDITOR);
        assert!(slug.is_known());
        assert!(slug.modules().contains(AUDIT_LOGS));
        assert!(!RoleSlug::new("platform-intern").is_known());
    }
}
