//! List available templates.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::common::CommandContext;
use crate::core::FrontplateError;
use crate::templating::{TemplatesDirProvider, list_templates};

/// List templates in the templates directory
#[derive(Args, Debug)]
pub struct ListCommand {
    /// Print absolute paths instead of names
    #[arg(long)]
    pub paths: bool,
}

impl ListCommand {
    /// Execute the command
    pub fn execute(self, ctx: &CommandContext) -> Result<()> {
        let dir = ctx.config.templates_dir().ok_or(FrontplateError::TemplatesDirUndefined)?;
        let templates = list_templates(&dir);

        if templates.is_empty() {
            println!("{}", format!("No templates found in {}", dir.display()).yellow());
            return Ok(());
        }

        for template in templates {
            if self.paths {
                println!("{}", dir.join(&template).display());
            } else {
                println!("{}", template.display());
            }
        }
        Ok(())
    }
}
