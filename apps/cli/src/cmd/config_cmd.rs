//! Show the resolved configuration.

use crate::config::{generate_default_config, resolve_config_path};
use anyhow::{Context, Result};
use clap::Args;
use std::path::Path;

/// Print the config file in effect.
#[derive(Args, Debug)]
pub struct ConfigCmd {
    /// Write the default config if none exists.
    #[arg(long)]
    pub init: bool,
}

impl ConfigCmd {
    pub fn run(&self, flag: Option<&Path>) -> Result<()> {
        let path = resolve_config_path(flag);
        if !path.exists() {
            if !self.init {
                println!("No config file at {}", path.display());
                return Ok(());
            }
            generate_default_config(&path)?;
            println!("Wrote default config to {}", path.display());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        println!("# {}", path.display());
        print!("{contents}");
        Ok(())
    }
}
