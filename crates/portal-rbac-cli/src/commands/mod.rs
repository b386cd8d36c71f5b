pub mod check;
pub mod config;
pub mod inspect;

use crate::config::PortalRbacConfig;
use anyhow::{Context, Result};
use portal_rbac::{RoleSlug, SessionState, SessionUser};
use std::path::Path;
use tracing::debug;

pub struct CommandContext {
    pub config: PortalRbacConfig,
}

impl CommandContext {
    pub fn new(config: PortalRbacConfig) -> Self {
        Self { config }
    }

    /// Role precedence: explicit flag, then the session's own role, then config
    pub fn effective_role(&self, flag: Option<&str>, user: &SessionUser) -> RoleSlug {
        flag.map(RoleSlug::new)
            .or_else(|| user.role.clone())
            .unwrap_or_else(|| RoleSlug::new(self.config.default_role.clone()))
    }

    /// Load a session user from disk and wrap it in a session state
    pub fn load_session(&self, path: &Path, role: Option<&str>, not_hydrated: bool) -> Result<SessionState> {
        let content = std::fs::read_to_string(path).with_context(|| format!("reading session {}", path.display()))?;
        let mut user = SessionUser::from_json(&content).with_context(|| format!("parsing session {}", path.display()))?;
        user.role = Some(self.effective_role(role, &user));

        let mut state = SessionState::new();
        state.login(user);
        if self.config.assume_hydrated && !not_hydrated {
            state.mark_hydrated();
        }

        debug!(path = %path.display(), hydrated = state.is_hydrated(), role = ?state.role_slug(), "Session loaded");
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_session(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_session_role_precedence() {
        let ctx = CommandContext::new(PortalRbacConfig::default());
        let file = write_session(r#"{"id": "op-1", "role": "platform-support", "permissions": {}}"#);

        let state = ctx.load_session(file.path(), None, false).unwrap();
        assert_eq!(state.role_slug(), Some("platform-support"));

        let state = ctx.load_session(file.path(), Some("platform-auditor"), false).unwrap();
        assert_eq!(state.role_slug(), Some("platform-auditor"));
    }

    #[test]
    fn test_load_session_default_role() {
        let config = PortalRbacConfig {
            default_role: "platform-sales".to_string(),
            ..PortalRbacConfig::default()
        };
        let ctx = CommandContext::new(config);
        let file = write_session(r#"{"id": "op-1"}"#);

        let state = ctx.load_session(file.path(), None, false).unwrap();
        assert_eq!(state.role_slug(), Some("platform-sales"));
        assert!(state.is_hydrated());
    }

    #[test]
    fn test_load_session_hydration() {
        let file = write_session(r#"{"id": "op-1"}"#);

        let ctx = CommandContext::new(PortalRbacConfig::default());
        assert!(!ctx.load_session(file.path(), None, true).unwrap().is_hydrated());

        let ctx = CommandContext::new(PortalRbacConfig {
            assume_hydrated: false,
            ..PortalRbacConfig::default()
        });
        assert!(!ctx.load_session(file.path(), None, false).unwrap().is_hydrated());
    }

    #[test]
    fn test_load_session_invalid_json() {
        let ctx = CommandContext::new(PortalRbacConfig::default());
        let file = write_session(r#"{"id": "op-1", "permissions": {"leads": true}}"#);

        assert!(ctx.load_session(file.path(), None, false).is_err());
    }
}
