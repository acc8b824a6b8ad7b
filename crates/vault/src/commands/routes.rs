//! `vault routes` command implementation.

use clap::Args;
use vault_manifest::{ManifestStore, RouteTable};

use super::SourceArgs;
use crate::error::CliError;
use crate::output::Output;
use crate::source::VaultSource;

/// Arguments for the routes command.
#[derive(Args)]
pub(crate) struct RoutesArgs {
    #[command(flatten)]
    source: SourceArgs,
}

impl RoutesArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.source.load_config()?;
        let source = VaultSource::from_config(&config.sources_resolved);
        output.info(&format!(
            "Manifest: {}",
            source.describe(&config.sources_resolved)
        ));

        let store = ManifestStore::new(source, config.vault.base_path.clone());
        let state = super::runtime()?.block_on(store.load())?;

        output.highlight(&format!("{} routes", state.routes().len()));
        for line in format_routes(state.routes()) {
            output.print(&line);
        }
        Ok(())
    }
}

/// One line per route in pre-order: path, node type and title.
fn format_routes(routes: &RouteTable) -> Vec<String> {
    let width = routes.iter().map(|n| n.path.len()).max().unwrap_or(0);
    routes
        .iter()
        .map(|node| {
            format!(
                "{:<width$}  {:<9}  {}",
                node.path,
                node.node_type.as_str(),
                node.title
            )
        })
        .collect()
}
