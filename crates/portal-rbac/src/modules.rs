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

//! Module registry
//!
//! The closed set of permission-able modules of the portal. Every module id
//! referenced by the role map or by a user's grants is expected to be listed
//! here. Unknown ids are tolerated: their label is the raw id.

use crate::error::{RbacError, RbacResult};
use serde::{Deserialize, Serialize};

/// Definition of a protectable feature area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ModuleDefinition {
    /// Stable identifier used as a map key everywhere else
    pub id: &'static str,

    /// Human-readable display name
    pub label: &'static str,
}

impl ModuleDefinition {
    const fn new(id: &'static str, label: &'static str) -> Self {
        Self { id, label }
    }
}

pub const PLATFORM_SETTINGS: &str = "platform_settings";
pub const TENANT_CRUD: &str = "tenant_crud";
pub const SUBSCRIPTIONS: &str = "subscriptions";
pub const BILLING_PLANS: &str = "billing_plans";
pub const PAYMENTS_REVENUE: &str = "payments_revenue";
pub const REFUNDS: &str = "refunds";
pub const LEADS: &str = "leads";
pub const SALES_PIPELINE: &str = "sales_pipeline";
pub const SUPPORT_TICKETS: &str = "support_tickets";
pub const AUDIT_LOGS: &str = "audit_logs";
pub const ANALYTICS: &str = "analytics";
pub const PLATFORM_USERS: &str = "platform_users";
pub const ROLE_MANAGEMENT: &str = "role_management";

static MODULES: [ModuleDefinition; 13] = [
    ModuleDefinition::new(PLATFORM_SETTINGS, "Platform Settings"),
    ModuleDefinition::new(TENANT_CRUD, "Tenant Management"),
    ModuleDefinition::new(SUBSCRIPTIONS, "Subscriptions"),
    ModuleDefinition::new(BILLING_PLANS, "Billing Plans"),
    ModuleDefinition::new(PAYMENTS_REVENUE, "Payments & Revenue"),
    ModuleDefinition::new(REFUNDS, "Refunds"),
    ModuleDefinition::new(LEADS, "Leads"),
    ModuleDefinition::new(SALES_PIPELINE, "Sales Pipeline"),
    ModuleDefinition::new(SUPPORT_TICKETS, "Support Tickets"),
    ModuleDefinition::new(AUDIT_LOGS, "Audit Logs"),
    ModuleDefinition::new(ANALYTICS, "Analytics"),
    ModuleDefinition::new(PLATFORM_USERS, "Platform Users"),
    ModuleDefinition::new(ROLE_MANAGEMENT, "Roles & Permissions"),
];

/// List every registered module in display order
pub fn list_modules() -> &'static [ModuleDefinition] {
    &MODULES
}

/// Get the full definition of a module, if registered
pub fn definition_for(module_id: &str) -> Option<&'static ModuleDefinition> {
    MODULES.iter().find(|module| module.id == module_id)
}

/// Get the display label of a module, falling back to the raw id
pub fn label_for(module_id: &str) -> &str {
    definition_for(module_id).map(|module| module.label).unwrap_or(module_id)
}

/// Check whether a module id is registered
pub fn is_registered(module_id: &str) -> bool {
    definition_for(module_id).is_some()
}

/// Module identifier
///
/// `ModuleId::new` wraps any string, matching the tolerant lookups above.
/// `ModuleId::parse` additionally requires the id to be registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(String);

impl ModuleId {
    /// Wrap a module id without validation
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Parse a module id, rejecting ids missing from the registry
    pub fn parse(value: &str) -> RbacResult<Self> {
        if is_registered(value) { Ok(Self::new(value)) } else { Err(RbacError::UnknownModule(value.to_string())) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display label for this module
    pub fn label(&self) -> &str {
        self.definition().map(|module| module.label).unwrap_or(self.0.as_str())
    }

    /// Registry definition for this module
    pub fn definition(&self) -> Option<&'static ModuleDefinition> {
        definition_for(&self.0)
    }
}

impl std::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModuleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
