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

//! Client session state consumed by the permission evaluator
//!
//! The session is an explicit value owned by the session collaborator. The
//! evaluator only reads it. Hydration starts false and is set once, when the
//! persisted session has been restored; it is never reset on an existing
//! state.

use crate::error::{RbacError, RbacResult};
use crate::permissions::PermissionGrants;
use crate::roles::RoleSlug;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Authenticated portal operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    /// User ID
    pub id: String,

    /// Role slug, when the identity service has provided one
    #[serde(default)]
    pub role: Option<RoleSlug>,

    /// Permission grants for this user
    #[serde(default)]
    pub permissions: PermissionGrants,
}

impl SessionUser {
    /// Create a new session user
    pub fn new(id: impl Into<String>, role: Option<RoleSlug>, permissions: PermissionGrants) -> Self {
        Self {
            id: id.into(),
            role,
            permissions,
        }
    }

    /// Parse a session user from its JSON form
    pub fn from_json(json: &str) -> RbacResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Session state snapshot: current user plus the hydration flag
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    user: Option<SessionUser>,
    hydrated: bool,
}

impl SessionState {
    /// Create an unhydrated state with no user
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an already hydrated state, mostly useful for tools and tests
    pub fn hydrated_with(user: Option<SessionUser>) -> Self {
        Self { user, hydrated: true }
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    /// Role of the current user; `None` until a role is available
    pub fn role_slug(&self) -> Option<&str> {
        self.user.as_ref().and_then(|user| user.role.as_ref()).map(RoleSlug::as_str)
    }

    /// Mark persisted state restoration as complete
    pub fn mark_hydrated(&mut self) {
        if !self.hydrated {
            self.hydrated = true;
            debug!(has_user = self.user.is_some(), "Session hydrated");
        }
    }

    /// Install the restored user, if any, and mark the state hydrated
    pub fn hydrate(&mut self, restored: Option<SessionUser>) {
        if let Some(user) = restored {
            self.user = Some(user);
        }
        self.mark_hydrated();
    }

    /// Establish a new session, replacing any current user
    pub fn login(&mut self, user: SessionUser) {
        info!(user_id = %user.id, role = ?user.role.as_ref().map(RoleSlug::as_str), "Session established");
        self.user = Some(user);
    }

    /// Replace the current user's grants wholesale, as on token refresh
    pub fn refresh_permissions(&mut self, permissions: PermissionGrants) -> RbacResult<()> {
        let user = self.user.as_mut().ok_or(RbacError::NoActiveSession)?;
        user.permissions = permissions;
        debug!(user_id = %user.id, "Session permissions refreshed");
        Ok(())
    }

    /// Clear the current user; hydration is kept
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!(user_id = %user.id, "Session cleared");
        }
    }
}

/// Shared handle over one session state
#[derive(Debug, Clone, Default)]
pub struct SharedSession {
    inner: Arc<RwLock<SessionState>>,
}

impl SharedSession {
    pub fn new(state: SessionState) -> Self {
        Self { inner: Arc::new(RwLock::new(state)) }
    }

    /// Clone the current state for evaluation
    pub fn snapshot(&self) -> SessionState {
        self.inner.read().clone()
    }

    pub fn is_hydrated(&self) -> bool {
        self.inner.read().is_hydrated()
    }

    /// Apply a mutation to the shared state
    pub fn update<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        f(&mut self.inner.write())
    }
}
