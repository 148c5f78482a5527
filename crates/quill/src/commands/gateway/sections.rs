//! `quill gateway sections` command implementation.

use clap::Args;
use quill_gateway::SectionWithContent;

use super::{ConfigArg, open_session};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the gateway sections command.
#[derive(Args)]
pub(crate) struct SectionsArgs {
    /// Also list each content item.
    #[arg(short, long)]
    items: bool,

    #[command(flatten)]
    config: ConfigArg,
}

impl SectionsArgs {
    /// Execute the sections command.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in or the section list cannot be fetched.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let session = open_session(self.config.config.as_deref())?;

        let sections = session.remote_sections()?;
        if sections.is_empty() {
            output.info("No remote sections");
            return Ok(());
        }

        for section in &sections {
            output.highlight(&section_line(section));
            if self.items {
                for item in &section.content {
                    output.detail(&format!(
                        "  {} [{}] {}",
                        item.title,
                        item.value.kind(),
                        item.value.value()
                    ));
                }
            }
        }
        Ok(())
    }
}

fn section_line(section: &SectionWithContent) -> String {
    let count = section.content.len();
    let noun = if count == 1 { "item" } else { "items" };
    format!(
        "{} ({}): {count} {noun}",
        section.section.title, section.section.id
    )
}
