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

//! SuperAdmin portal access control
//!
//! This crate decides what a platform operator can see and do in the
//! SuperAdmin portal:
//! - Module registry: the closed set of protectable modules and their labels
//! - Role-module map: which modules each operator role sees
//! - Permission evaluator: allow/deny for a (module, action) pair, gated on
//!   session hydration
//!
//! Every lookup is total. Missing data degrades to deny, unknown roles to the
//! fallback role, unknown modules to their raw id.
//!
//! ```rust
//! use portal_rbac::{Action, PermissionEvaluator, PermissionGrants, RoleSlug, SessionState, SessionUser};
//!
//! let grants = PermissionGrants::new().with_grant("leads", Action::View);
//! let mut session = SessionState::new();
//! session.hydrate(Some(SessionUser::new("op-1", Some(RoleSlug::new("platform-sales-junior")), grants)));
//!
//! let leads = PermissionEvaluator::for_module(&session, "leads");
//! assert!(leads.can_view());
//! assert!(!leads.can_create());
//! assert!(!portal_rbac::is_module_visible_for_role("payments_revenue", "platform-sales-junior"));
//! ```

pub mod error;
pub mod evaluator;
pub mod modules;
pub mod permissions;
pub mod roles;
pub mod session;

pub use error::{RbacError, RbacResult};
pub use evaluator::{AccessDecision, ModuleAccess, PermissionEvaluator, authorize, has_permission};
pub use modules::{ModuleDefinition, ModuleId, definition_for, is_registered, label_for, list_modules};
pub use permissions::{Action, PermissionGrants};
pub use roles::{FALLBACK_ROLE, ModuleSet, RoleModules, RoleSlug, is_known_role, is_module_visible_for_role, list_roles, modules_for_role, resolve_role, visible_modules_for_role};
pub use session::{SessionState, SessionUser, SharedSession};
