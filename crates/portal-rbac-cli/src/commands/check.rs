use super::CommandContext;
use anyhow::Result;
use portal_rbac::{AccessDecision, Action, ModuleAccess, ModuleId, PermissionEvaluator, SessionState, label_for, modules_for_role};
use serde::Serialize;
use std::path::Path;
use tracing::warn;

/// Outcome of a single `check` invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckReport {
    pub module: ModuleId,
    pub label: String,
    pub registered: bool,
    pub action: Action,
    pub role: String,
    pub hydrated: bool,
    pub decision: AccessDecision,
}

impl CheckReport {
    pub fn render(&self) -> String {
        let mut line = format!("{} / {} ({}): {}", self.label, self.action, self.role, self.decision);
        if !self.hydrated {
            line.push_str(" [session not hydrated]");
        }
        if !self.registered {
            line.push_str(" [module not registered]");
        }
        line
    }
}

/// Evaluate one module/action pair; unregistered modules are still evaluated
pub fn evaluate_check(state: &SessionState, module: &str, action: Action) -> CheckReport {
    let (module, registered) = match ModuleId::parse(module) {
        Ok(module) => (module, true),
        Err(err) => {
            warn!(error = %err, "Evaluating module missing from the registry");
            (ModuleId::new(module), false)
        }
    };

    let decision = PermissionEvaluator::new(state).authorize(&module, action);

    CheckReport {
        label: module.label().to_string(),
        module,
        registered,
        action,
        role: state.role_slug().unwrap_or(portal_rbac::FALLBACK_ROLE).to_string(),
        hydrated: state.is_hydrated(),
        decision,
    }
}

pub fn check_access(ctx: &CommandContext, session_path: &Path, module: &str, action: &str, role: Option<&str>, not_hydrated: bool, json: bool) -> Result<()> {
    let action: Action = action.parse()?;
    let state = ctx.load_session(session_path, role, not_hydrated)?;
    let report = evaluate_check(&state, module, action);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.render());
    }
    Ok(())
}

/// One line of the permission matrix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixRow {
    pub module: &'static str,
    pub label: &'static str,
    pub access: ModuleAccess,
}

/// Allowed actions per visible module, in the role's display order
pub fn matrix_rows(state: &SessionState) -> Vec<MatrixRow> {
    let role = state.role_slug().unwrap_or(portal_rbac::FALLBACK_ROLE);
    modules_for_role(role)
        .iter()
        .map(|module| MatrixRow {
            module,
            label: label_for(module),
            access: PermissionEvaluator::for_module(state, module).module_access(),
        })
        .collect()
}

pub fn render_matrix(rows: &[MatrixRow]) -> String {
    let mut out = format!("{:<24} ALLOWED\n", "MODULE");
    for row in rows {
        let allowed: Vec<_> = row.access.allowed_actions().into_iter().map(Action::as_str).collect();
        let allowed = if allowed.is_empty() { "-".to_string() } else { allowed.join(", ") };
        out.push_str(&format!("{:<24} {}\n", row.label, allowed));
    }
    out
}

pub fn show_matrix(ctx: &CommandContext, session_path: &Path, role: Option<&str>, json: bool) -> Result<()> {
    let state = ctx.load_session(session_path, role, false)?;
    let rows = matrix_rows(&state);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", render_matrix(&rows));
    }
    Ok(())
}
