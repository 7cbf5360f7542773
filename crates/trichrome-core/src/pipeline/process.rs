use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::info;

use crate::align::pyramid::PyramidLevel;
use crate::align::{compose, pyramid_align, search_pair, LevelRecord, PyramidAlignment};
use crate::consts::MIN_SEARCH_RADIUS;
use crate::error::{Result, TrichromeError};
use crate::filters::enhance;
use crate::frame::Frame;
use crate::io::border::auto_border_crop;
use crate::io::image_io::{load_image, save_color_image};
use crate::io::split::split_plate;

use super::config::{AlignConfig, AlignMode};
use super::types::{PlateAlignment, PlateReport};

/// Split, align, compose and post-process one plate held in memory.
pub fn align_plate(plate: &Frame, config: &AlignConfig) -> Result<PlateAlignment> {
    let start = Instant::now();
    let params = config.resolve(plate.height(), plate.width());
    let planes = split_plate(&plate.data, params.crop_percent)?;
    let metric = config.metric.metric();

    info!(
        metric = metric.name(),
        mode = %config.mode,
        search_radius = params.search_radius,
        max_depth = params.max_depth,
        crop_percent = params.crop_percent,
        "Aligning plate"
    );

    let run = match config.mode {
        AlignMode::Pyramid => pyramid_align(
            &planes.reference,
            &planes.moving_a,
            &planes.moving_b,
            params.max_depth,
            params.search_radius,
            metric,
        )?,
        AlignMode::Flat => {
            let found = search_pair(
                &planes.reference,
                &planes.moving_a,
                &planes.moving_b,
                params.search_radius,
                metric,
            )?;
            let record = LevelRecord {
                level: PyramidLevel {
                    depth: 0,
                    factor: 1,
                    radius: params.search_radius.max(MIN_SEARCH_RADIUS),
                },
                displacement_a: found.a.displacement,
                displacement_b: found.b.displacement,
            };
            PyramidAlignment {
                aligned_a: found.a.shifted,
                aligned_b: found.b.shifted,
                displacement_a: found.a.displacement,
                displacement_b: found.b.displacement,
                levels: vec![record],
            }
        }
    };

    let mut composite = compose(
        &planes.reference,
        &run.aligned_a,
        &run.aligned_b,
        &config.channel_order,
        plate.original_bit_depth,
    )?;

    if let Some(ref border) = config.border_crop {
        composite = auto_border_crop(&composite, border);
    }
    if let Some(ref steps) = config.enhance {
        composite = enhance(&composite, steps);
    }

    let elapsed = start.elapsed();
    info!(
        a = %run.displacement_a,
        b = %run.displacement_b,
        elapsed_ms = elapsed.as_millis() as u64,
        "Plate aligned"
    );

    Ok(PlateAlignment {
        composite,
        metric: config.metric,
        mode: config.mode,
        params,
        displacement_a: run.displacement_a,
        displacement_b: run.displacement_b,
        levels: run.levels,
        elapsed,
    })
}

/// Load a plate from disk, align it and save the composite into `output_dir`.
pub fn process_plate(input: &Path, config: &AlignConfig, output_dir: &Path) -> Result<PlateReport> {
    let start = Instant::now();
    let plate = load_image(input)?;
    let aligned = align_plate(&plate, config)?;

    std::fs::create_dir_all(output_dir)?;
    let output = output_dir.join(output_file_name(input, config, aligned.params.search_radius)?);
    save_color_image(&aligned.composite, &output)?;
    info!(output = %output.display(), "Composite saved");

    Ok(PlateReport {
        input: input.to_path_buf(),
        output,
        metric: aligned.metric,
        mode: aligned.mode,
        params: aligned.params,
        displacement_a: aligned.displacement_a,
        displacement_b: aligned.displacement_b,
        levels: aligned.levels,
        width: aligned.composite.width(),
        height: aligned.composite.height(),
        elapsed: start.elapsed(),
    })
}

/// `<stem>_<METRIC>_<Mode>_<radius>.<ext>`
pub fn output_file_name(input: &Path, config: &AlignConfig, search_radius: usize) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            TrichromeError::Pipeline(format!("No usable file name in {}", input.display()))
        })?;
    Ok(PathBuf::from(format!(
        "{stem}_{}_{}_{search_radius}.{}",
        config.metric, config.mode, config.output_extension
    )))
}
