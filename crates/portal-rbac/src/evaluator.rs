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

//! Permission evaluator
//!
//! Authoritative allow/deny decision for a (module, action) pair. Every
//! uncertain input resolves to deny:
//! - the session has not finished hydrating
//! - there is no authenticated user
//! - the module or the action is missing from the user's grants
//! - the stored value is anything other than the boolean `true`

use crate::permissions::Action;
use crate::roles::{FALLBACK_ROLE, is_module_visible_for_role};
use crate::session::SessionState;
use serde::Serialize;
use tracing::{debug, trace};

/// Check whether the session's user may perform `action` on `module`
pub fn has_permission(session: &SessionState, module: &str, action: &str) -> bool {
    if !session.is_hydrated() {
        trace!(module = %module, action = %action, "Session not hydrated, denying");
        return false;
    }

    let Some(user) = session.user() else {
        trace!(module = %module, action = %action, "No authenticated user, denying");
        return false;
    };

    let allowed = user.permissions.allows(module, action);

    trace!(user_id = %user.id, module = %module, action = %action, allowed = allowed, "Permission evaluated");

    allowed
}

/// Outcome of combining the visibility gate with the permission gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    /// Module visible and action granted
    Allowed,
    /// Module not visible for the role
    Hidden,
    /// Module visible but action not granted
    Denied,
}

impl AccessDecision {
    pub fn is_allowed(self) -> bool {
        self == AccessDecision::Allowed
    }
}

impl std::fmt::Display for AccessDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            AccessDecision::Allowed => "allowed",
            AccessDecision::Hidden => "hidden",
            AccessDecision::Denied => "denied",
        })
    }
}

/// Decide access for the session's role and grants
///
/// A session without a role is treated as the fallback role for visibility.
pub fn authorize(session: &SessionState, module: &str, action: &str) -> AccessDecision {
    let role = session.role_slug().unwrap_or(FALLBACK_ROLE);

    let decision = if !is_module_visible_for_role(module, role) {
        AccessDecision::Hidden
    } else if has_permission(session, module, action) {
        AccessDecision::Allowed
    } else {
        AccessDecision::Denied
    };

    debug!(role = %role, module = %module, action = %action, decision = %decision, "Access decision");

    decision
}

/// Results of every action predicate for one module
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModuleAccess {
    pub view: bool,
    pub create: bool,
    pub update: bool,
    pub delete: bool,
    pub assign: bool,
    pub cancel: bool,
    pub refund: bool,
    pub approve: bool,
    pub export: bool,
}

impl ModuleAccess {
    /// Whether the given action is allowed in this snapshot
    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::View => self.view,
            Action::Create => self.create,
            Action::Update => self.update,
            Action::Delete => self.delete,
            Action::Assign => self.assign,
            Action::Cancel => self.cancel,
            Action::Refund => self.refund,
            Action::Approve => self.approve,
            Action::Export => self.export,
        }
    }

    /// Allowed actions in canonical order
    pub fn allowed_actions(&self) -> Vec<Action> {
        Action::ALL.into_iter().filter(|action| self.allows(*action)).collect()
    }
}

/// Evaluator over one session snapshot, optionally bound to a default module
///
/// The unbound form takes `(module, action)`. The bound form takes only an
/// action and applies it to the default module; without a default module it
/// always denies.
#[derive(Debug, Clone, Copy)]
pub struct PermissionEvaluator<'a> {
    session: &'a SessionState,
    default_module: Option<&'a str>,
}

impl<'a> PermissionEvaluator<'a> {
    /// Create an evaluator without a default module
    pub fn new(session: &'a SessionState) -> Self {
        Self { session, default_module: None }
    }

    /// Create an evaluator bound to a default module
    pub fn for_module(session: &'a SessionState, module: &'a str) -> Self {
        Self {
            session,
            default_module: Some(module),
        }
    }

    pub fn default_module(&self) -> Option<&'a str> {
        self.default_module
    }

    /// Unbound form: check `action` on `module`
    pub fn has_permission_for_module_action(&self, module: impl AsRef<str>, action: impl AsRef<str>) -> bool {
        has_permission(self.session, module.as_ref(), action.as_ref())
    }

    /// Bound form: check `action` on the default module
    pub fn has_permission_for_action(&self, action: impl AsRef<str>) -> bool {
        // Checked ahead of the module lookup
        if !self.session.is_hydrated() {
            return false;
        }

        match self.default_module {
            Some(module) => has_permission(self.session, module, action.as_ref()),
            None => false,
        }
    }

    /// Combined visibility and permission decision, using the session's role
    pub fn authorize(&self, module: impl AsRef<str>, action: impl AsRef<str>) -> AccessDecision {
        authorize(self.session, module.as_ref(), action.as_ref())
    }

    pub fn can_view(&self) -> bool {
        self.has_permission_for_action(Action::View)
    }

    pub fn can_create(&self) -> bool {
        self.has_permission_for_action(Action::Create)
    }

    pub fn can_update(&self) -> bool {
        self.has_permission_for_action(Action::Update)
    }

    pub fn can_delete(&self) -> bool {
        self.has_permission_for_action(Action::Delete)
    }

    pub fn can_assign(&self) -> bool {
        self.has_permission_for_action(Action::Assign)
    }

    pub fn can_cancel(&self) -> bool {
        self.has_permission_for_action(Action::Cancel)
    }

    pub fn can_refund(&self) -> bool {
        self.has_permission_for_action(Action::Refund)
    }

    pub fn can_approve(&self) -> bool {
        self.has_permission_for_action(Action::Approve)
    }

    pub fn can_export(&self) -> bool {
        self.has_permission_for_action(Action::Export)
    }

    /// Snapshot of every bound predicate for the default module
    pub fn module_access(&self) -> ModuleAccess {
        ModuleAccess {
            view: self.can_view(),
            create: self.can_create(),
            update: self.can_update(),
            delete: self.can_delete(),
            assign: self.can_assign(),
            cancel: self.can_cancel(),
            refund: self.can_refund(),
            approve: self.can_approve(),
            export: self.can_export(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::{LEADS, PAYMENTS_REVENUE, REFUNDS};
    use crate::permissions::PermissionGrants;
    use crate::roles::{PLATFORM_FINANCE_ADMIN, PLATFORM_SALES_JUNIOR, RoleSlug};
    use crate::session::SessionUser;

    fn session_for(role: &str, grants: PermissionGrants) -> SessionState {
        SessionState::hydrated_with(Some(SessionUser::new("op-1", Some(RoleSlug::new(role)), grants)))
    }

    #[test]
    fn test_has_permission_requires_hydration() {
        let mut session = SessionState::new();
        session.login(SessionUser::new("op-1", None, PermissionGrants::new().with_grant(REFUNDS, Action::Refund)));

        assert!(!has_permission(&session, REFUNDS, "refund"));

        session.mark_hydrated();
        assert!(has_permission(&session, REFUNDS, "refund"));
    }

    #[test]
    fn test_has_permission_without_user() {
        let session = SessionState::hydrated_with(None);
        assert!(!has_permission(&session, LEADS, "view"));
    }

    #[test]
    fn test_has_permission_missing_keys() {
        let session = session_for(PLATFORM_SALES_JUNIOR, PermissionGrants::new().with_grant(LEADS, Action::View));

        assert!(has_permission(&session, LEADS, "view"));
        assert!(!has_permission(&session, LEADS, "create"));
        assert!(!has_permission(&session, REFUNDS, "view"));
    }

    #[test]
    fn test_bound_predicates() {
        let grants = PermissionGrants::new().with_grant(REFUNDS, Action::View).with_grant(REFUNDS, Action::Refund);
        let session = session_for(PLATFORM_FINANCE_ADMIN, grants);
        let evaluator = PermissionEvaluator::for_module(&session, REFUNDS);

        assert!(evaluator.can_view());
        assert!(evaluator.can_refund());
        assert!(!evaluator.can_approve());
        assert!(!evaluator.can_delete());
        assert_eq!(evaluator.module_access().allowed_actions(), vec![Action::View, Action::Refund]);
    }

    #[test]
    fn test_bound_form_without_default_module() {
        let session = session_for(PLATFORM_FINANCE_ADMIN, PermissionGrants::new().with_grant(REFUNDS, Action::View));
        let evaluator = PermissionEvaluator::new(&session);

        assert!(evaluator.default_module().is_none());
        assert!(!evaluator.can_view());
        assert!(evaluator.has_permission_for_module_action(REFUNDS, Action::View));
        assert!(evaluator.has_permission_for_module_action(REFUNDS, "view"));
    }

    #[test]
    fn test_bound_form_before_hydration() {
        let mut session = SessionState::new();
        session.login(SessionUser::new("op-1", None, PermissionGrants::new().with_grant(REFUNDS, Action::View)));
        let evaluator = PermissionEvaluator::for_module(&session, REFUNDS);

        assert_eq!(evaluator.module_access(), ModuleAccess::default());
    }

    #[test]
    fn test_authorize_decisions() {
        let grants = PermissionGrants::new().with_grant(LEADS, Action::View).with_grant(PAYMENTS_REVENUE, Action::View);
        let session = session_for(PLATFORM_SALES_JUNIOR, grants);

        assert_eq!(authorize(&session, LEADS, "view"), AccessDecision::Allowed);
        assert_eq!(authorize(&session, LEADS, "delete"), AccessDecision::Denied);
        // Granted but not visible for the role
        assert_eq!(authorize(&session, PAYMENTS_REVENUE, "view"), AccessDecision::Hidden);
        assert!(!AccessDecision::Hidden.is_allowed());
    }

    #[test]
    fn test_authorize_without_role_uses_fallback() {
        let session = SessionState::hydrated_with(Some(SessionUser::new("op-1", None, PermissionGrants::new().with_grant(PAYMENTS_REVENUE, Action::Export))));
        let evaluator = PermissionEvaluator::new(&session);

        assert_eq!(evaluator.authorize(PAYMENTS_REVENUE, Action::Export), AccessDecision::Allowed);
    }
}
