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

//! Action vocabulary and per-user permission grants

use crate::error::{RbacError, RbacResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Operation class within a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    View,
    Create,
    Update,
    Delete,
    Assign,
    Cancel,
    Refund,
    Approve,
    Export,
}

impl Action {
    /// Every known action, in canonical order
    pub const ALL: [Action; 9] = [
        Action::View,
        Action::Create,
        Action::Update,
        Action::Delete,
        Action::Assign,
        Action::Cancel,
        Action::Refund,
        Action::Approve,
        Action::Export,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Assign => "assign",
            Action::Cancel => "cancel",
            Action::Refund => "refund",
            Action::Approve => "approve",
            Action::Export => "export",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Action {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::str::FromStr for Action {
    type Err = RbacError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Action::ALL.into_iter().find(|action| action.as_str() == value).ok_or_else(|| RbacError::InvalidAction(value.to_string()))
    }
}

/// Permission grant structure for one user: module id -> action -> value
///
/// Values are kept exactly as the identity service sent them. Only the JSON
/// boolean `true` grants; a missing module, a missing action and every other
/// value (`false`, `1`, `"true"`, `null`, ...) deny.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionGrants(BTreeMap<String, BTreeMap<String, Value>>);

impl PermissionGrants {
    /// Create an empty grant structure
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a grant structure from its JSON form
    pub fn from_json(json: &str) -> RbacResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a grant structure from an already decoded JSON value
    pub fn from_value(value: Value) -> RbacResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Grant or revoke an action on a module
    pub fn set(&mut self, module: impl Into<String>, action: Action, allowed: bool) {
        self.0.entry(module.into()).or_default().insert(action.as_str().to_string(), Value::Bool(allowed));
    }

    /// Builder form of [`PermissionGrants::set`] granting the action
    pub fn with_grant(mut self, module: impl Into<String>, action: Action) -> Self {
        self.set(module, action, true);
        self
    }

    /// Store a raw value for a module/action pair
    pub fn set_raw(&mut self, module: impl Into<String>, action: impl Into<String>, value: Value) {
        self.0.entry(module.into()).or_default().insert(action.into(), value);
    }

    /// Check whether `action` on `module` is granted
    pub fn allows(&self, module: &str, action: &str) -> bool {
        matches!(self.0.get(module).and_then(|actions| actions.get(action)), Some(Value::Bool(true)))
    }

    /// Granted actions of the closed vocabulary for a module
    pub fn allowed_actions(&self, module: &str) -> Vec<Action> {
        Action::ALL.into_iter().filter(|action| self.allows(module, action.as_str())).collect()
    }

    /// Module ids present in the grant structure
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_string_roundtrip() {
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
            assert_eq!(action.to_string(), action.as_str());
        }
    }

    #[test]
    fn test_action_from_str_invalid() {
        let err = "approve_all".parse::<Action>().unwrap_err();
        assert!(matches!(err, RbacError::InvalidAction(value) if value == "approve_all"));
        assert!("View".parse::<Action>().is_err());
    }

    #[test]
    fn test_grants_from_json() {
        let grants = PermissionGrants::from_json(r#"{"leads": {"view": true, "create": false}}"#).unwrap();

        assert!(grants.allows("leads", "view"));
        assert!(!grants.allows("leads", "create"));
        assert!(!grants.allows("leads", "delete"));
        assert!(!grants.allows("refunds", "view"));
    }

    #[test]
    fn test_only_literal_true_grants() {
        let grants = PermissionGrants::from_value(json!({
            "refunds": {
                "view": 1,
                "refund": "true",
                "approve": null,
                "cancel": {"value": true},
                "export": [true],
                "update": true
            }
        }))
        .unwrap();

        assert!(!grants.allows("refunds", "view"));
        assert!(!grants.allows("refunds", "refund"));
        assert!(!grants.allows("refunds", "approve"));
        assert!(!grants.allows("refunds", "cancel"));
        assert!(!grants.allows("refunds", "export"));
        assert!(grants.allows("refunds", "update"));
        assert_eq!(grants.allowed_actions("refunds"), vec![Action::Update]);
    }

    #[test]
    fn test_malformed_grants_rejected() {
        assert!(PermissionGrants::from_json(r#"{"leads": true}"#).is_err());
        assert!(PermissionGrants::from_json("[]").is_err());
    }

    #[test]
    fn test_set_and_revoke() {
        let mut grants = PermissionGrants::new().with_grant("leads", Action::View).with_grant("leads", Action::Assign);
        assert_eq!(grants.allowed_actions("leads"), vec![Action::View, Action::Assign]);

        grants.set("leads", Action::Assign, false);
        assert_eq!(grants.allowed_actions("leads"), vec![Action::View]);
        assert_eq!(grants.modules().collect::<Vec<_>>(), vec!["leads"]);
    }
}
