use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use framegrade_core::quality::QualityThresholds;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write the thresholds to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save the default QualityThresholds as TOML.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let thresholds = QualityThresholds::default();
    let toml_str = toml::to_string_pretty(&thresholds)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write thresholds to {}", path.display()))?;
        println!("Default thresholds saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
