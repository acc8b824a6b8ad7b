//! `vault manifest` command implementation.

use std::path::PathBuf;

use clap::Args;
use vault_manifest::build_manifest;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the manifest command.
#[derive(Args)]
pub(crate) struct ManifestArgs {
    /// Ready-to-serve vault directory.
    dir: PathBuf,

    /// Write the manifest to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ManifestArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let manifest = build_manifest(&self.dir)?;
        let json = manifest.to_json_pretty()?;

        match self.output {
            Some(path) => {
                std::fs::write(&path, format!("{json}\n"))?;
                output.success(&format!(
                    "Wrote {} nodes to {}",
                    manifest.root.node_count(),
                    path.display()
                ));
            }
            None => output.print(&json),
        }
        Ok(())
    }
}
