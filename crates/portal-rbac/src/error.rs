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

//! Error handling for the RBAC subsystem
//!
//! Permission checks, visibility lookups and label lookups never fail. These
//! errors only surface at parsing and validation edges.

use thiserror::Error;

/// RBAC error types
#[derive(Error, Debug)]
pub enum RbacError {
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Unknown module: {0}")]
    UnknownModule(String),

    #[error("No active session")]
    NoActiveSession,

    #[error("Invalid permission grants: {0}")]
    InvalidGrants(#[from] serde_json::Error),
}

impl RbacError {
    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            RbacError::InvalidAction(_) => "invalid_action",
            RbacError::UnknownModule(_) => "unknown_module",
            RbacError::NoActiveSession => "no_active_session",
            RbacError::InvalidGrants(_) => "invalid_grants",
        }
    }
}

/// Result type for RBAC operations
pub type RbacResult<T> = Result<T, RbacError>;
