//! `vault render` command implementation.

use clap::Args;
use vault_site::{MemoryHost, Navigator, Rendered};

use super::SourceArgs;
use crate::error::CliError;
use crate::output::Output;
use crate::source::VaultSource;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// URL path to render (e.g., /notes/nature/tundra).
    path: String,

    #[command(flatten)]
    source: SourceArgs,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.source.load_config()?;
        let source = VaultSource::from_config(&config.sources_resolved);
        output.info(&format!(
            "Manifest: {}",
            source.describe(&config.sources_resolved)
        ));

        let navigator = Navigator::new(
            super::site_config(&config),
            source.clone(),
            source,
            MemoryHost::new(self.path.as_str()),
        );
        let rendered = super::runtime()?.block_on(navigator.start())?;

        if rendered == Rendered::NotFound {
            output.warning(&format!("No page or route matches {}", self.path));
        }
        output.print(&render_document(navigator.host()));
        Ok(())
    }
}

/// Serialize what the router mounted into a standalone document.
fn render_document(host: &MemoryHost) -> String {
    format!(
        "<title>{}</title>\n<nav id=\"main-nav\">\n{}\n</nav>\n<main id=\"app\">\n{}\n</main>",
        html_escape::encode_text(&host.title()),
        host.nav(),
        host.app()
    )
}
