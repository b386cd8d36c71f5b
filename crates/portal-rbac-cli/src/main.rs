use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;

use crate::commands::CommandContext;
use crate::config::PortalRbacConfig;
use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Inspect SuperAdmin portal roles, modules and operator permissions
#[derive(Parser, Debug)]
#[command(name = "portal-rbac", about = "SuperAdmin portal access control inspector")]
pub struct Cli {
    /// Path to configuration file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands for configuration inspection
#[derive(Subcommand, Debug)]
#[command(about = "Inspect or write CLI configuration")]
pub enum ConfigCommands {
    /// Show current effective configuration
    Show,
    /// Write the effective configuration to a TOML file
    Init {
        /// Destination path
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Top-level commands for portal-rbac
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every registered module
    Modules,

    /// List every role and its module count
    Roles,

    /// Show the modules visible for a role
    Visible {
        /// Role slug (defaults to the configured default role)
        #[arg(long)]
        role: Option<String>,
    },

    /// Evaluate one module/action pair against a session file
    Check {
        /// Path to the session user JSON file
        #[arg(long)]
        session: PathBuf,

        /// Module id
        module: String,

        /// Action name
        action: String,

        /// Override the role carried by the session
        #[arg(long)]
        role: Option<String>,

        /// Evaluate as if persisted state had not been restored yet
        #[arg(long)]
        not_hydrated: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print allowed actions for every visible module of a session
    Matrix {
        /// Path to the session user JSON file
        #[arg(long)]
        session: PathBuf,

        /// Override the role carried by the session
        #[arg(long)]
        role: Option<String>,

        /// Print the matrix as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect or write configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = PortalRbacConfig::resolve_config(cli.config)?;

    // Initialize tracing; RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let ctx = CommandContext::new(config);

    // Dispatch commands
    match cli.command {
        Commands::Modules => {
            commands::inspect::list_modules(&ctx)?;
        }
        Commands::Roles => {
            commands::inspect::list_roles(&ctx)?;
        }
        Commands::Visible { role } => {
            commands::inspect::show_visible(&ctx, role.as_deref())?;
        }
        Commands::Check {
            session,
            module,
            action,
            role,
            not_hydrated,
            json,
        } => {
            commands::check::check_access(&ctx, &session, &module, &action, role.as_deref(), not_hydrated, json)?;
        }
        Commands::Matrix { session, role, json } => {
            commands::check::show_matrix(&ctx, &session, role.as_deref(), json)?;
        }
        Commands::Config { command } => {
            commands::config::handle_config_command(&ctx, command)?;
        }
    }

    Ok(())
}
