//! Print the file a template reference resolves to.

use anyhow::Result;
use clap::Args;

use super::common::CommandContext;

/// Show which file a template name resolves to
#[derive(Args, Debug)]
pub struct ResolveCommand {
    /// Template name or path
    pub template: String,
}

impl ResolveCommand {
    /// Execute the command
    pub fn execute(self, ctx: &CommandContext) -> Result<()> {
        let path = ctx.engine().resolve(&self.template)?;
        println!("{}", path.display());
        Ok(())
    }
}
