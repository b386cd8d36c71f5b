use super::CommandContext;
use crate::ConfigCommands;
use anyhow::{Result, bail};
use std::path::Path;

pub fn handle_config_command(ctx: &CommandContext, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show_config(ctx),
        ConfigCommands::Init { path, force } => init_config(ctx, &path, force),
    }
}

fn show_config(ctx: &CommandContext) -> Result<()> {
    println!("# Effective configuration");
    print!("{}", ctx.config.to_toml()?);
    Ok(())
}

fn init_config(ctx: &CommandContext, path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    ctx.config.save_to_file(path)?;
    println!("Configuration written to {}", path.display());
    Ok(())
}
