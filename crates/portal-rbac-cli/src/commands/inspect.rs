use super::CommandContext;
use anyhow::Result;
use portal_rbac::{is_known_role, list_modules as registry_modules, list_roles as role_map, resolve_role, visible_modules_for_role};

pub fn list_modules(_ctx: &CommandContext) -> Result<()> {
    println!("{:<20} LABEL", "MODULE");
    for module in registry_modules() {
        println!("{:<20} {}", module.id, module.label);
    }
    Ok(())
}

pub fn list_roles(_ctx: &CommandContext) -> Result<()> {
    println!("{:<24} MODULES", "ROLE");
    for entry in role_map() {
        println!("{:<24} {}", entry.role, entry.modules.len());
    }
    Ok(())
}

/// Render the modules visible for a role, noting when the fallback role applied
pub fn visible_report(role: &str) -> String {
    let mut out = if is_known_role(role) {
        format!("Modules visible for {}:\n", role)
    } else {
        format!("Role '{}' is not mapped; showing fallback role '{}':\n", role, resolve_role(role).role)
    };

    for module in visible_modules_for_role(role) {
        out.push_str(&format!("  {:<20} {}\n", module.id, module.label));
    }
    out
}

pub fn show_visible(ctx: &CommandContext, role: Option<&str>) -> Result<()> {
    let role = role.unwrap_or(ctx.config.default_role.as_str());
    print!("{}", visible_report(role));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_report_known_role() {
        let report = visible_report("platform-sales-junior");
        let lines: Vec<_> = report.lines().collect();

        assert_eq!(lines[0], "Modules visible for platform-sales-junior:");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].trim_start().starts_with("leads"));
        assert!(!report.contains("payments_revenue"));
    }

    #[test]
    fn test_visible_report_unmapped_role_uses_fallback() {
        let report = visible_report("platform-intern");
        let lines: Vec<_> = report.lines().collect();

        assert_eq!(lines[0], "Role 'platform-intern' is not mapped; showing fallback role 'super-admin':");
        assert_eq!(lines.len(), 14);
        assert!(report.contains("platform_settings"));
        assert!(report.contains("Payments & Revenue"));
    }
}
