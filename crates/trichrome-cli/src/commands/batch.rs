use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use trichrome_core::pipeline::{default_workers, discover_plates, process_batch, ProgressReporter};

use super::options::AlignOptions;
use crate::summary::print_batch_summary;

#[derive(Args)]
pub struct BatchArgs {
    /// Directory of plate images
    pub dir: PathBuf,

    #[command(flatten)]
    pub options: AlignOptions,

    /// Worker threads (default: CPU count, at most 4)
    #[arg(long)]
    pub workers: Option<usize>,
}

struct BarReporter {
    bar: ProgressBar,
}

impl ProgressReporter for BarReporter {
    fn begin(&self, total: usize) {
        self.bar.set_length(total as u64);
    }

    fn advance(&self, done: usize) {
        self.bar.set_position(done as u64);
    }

    fn finish(&self) {
        self.bar.finish();
    }
}

pub fn run(args: &BatchArgs) -> Result<()> {
    let config = args.options.to_config()?;
    let plates = discover_plates(&args.dir)
        .with_context(|| format!("Failed to list {}", args.dir.display()))?;
    if plates.is_empty() {
        println!("No plates found in {}", args.dir.display());
        return Ok(());
    }

    let workers = args.workers.unwrap_or_else(default_workers);
    println!(
        "Aligning {} plates with {} workers ({})",
        plates.len(),
        workers,
        config.metric
    );

    let bar = ProgressBar::new(plates.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("Aligning [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    let reporter = BarReporter { bar };

    let summary = process_batch(&plates, &config, &args.options.output, workers, &reporter)?;
    print_batch_summary(&summary);

    if !summary.failed.is_empty() {
        anyhow::bail!("{} of {} plates failed", summary.failed.len(), plates.len());
    }
    Ok(())
}
