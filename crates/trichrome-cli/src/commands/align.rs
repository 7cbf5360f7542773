use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use trichrome_core::pipeline::process_plate;

use super::options::AlignOptions;
use crate::summary::print_plate_summary;

#[derive(Args)]
pub struct AlignArgs {
    /// Tri-color plate image (TIFF, PNG or JPEG)
    pub file: PathBuf,

    #[command(flatten)]
    pub options: AlignOptions,
}

pub fn run(args: &AlignArgs) -> Result<()> {
    let config = args.options.to_config()?;
    let report = process_plate(&args.file, &config, &args.options.output)
        .with_context(|| format!("Failed to align {}", args.file.display()))?;

    print_plate_summary(&report);
    Ok(())
}
