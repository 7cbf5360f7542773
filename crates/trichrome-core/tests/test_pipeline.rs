mod common;

use std::path::Path;

use trichrome_core::align::MetricKind;
use trichrome_core::error::TrichromeError;
use trichrome_core::filters::EnhanceConfig;
use trichrome_core::frame::Displacement;
use trichrome_core::io::image_io::{load_image, save_tiff};
use trichrome_core::pipeline::{
    align_plate, discover_plates, output_file_name, process_batch, process_plate, AlignConfig,
    AlignMode, NoOpReporter,
};

use common::{make_ramp, make_shifted_plate, make_texture};

fn exact_config(metric: MetricKind) -> AlignConfig {
    AlignConfig {
        metric,
        search_radius: Some(15),
        max_depth: Some(2),
        crop_percent: Some(0.0),
        border_crop: None,
        ..AlignConfig::default()
    }
}

fn write_plate(path: &Path) {
    let reference = make_ramp(100, 100);
    let plate = make_shifted_plate(
        &reference,
        Displacement::new(3, -2),
        Displacement::new(-4, 1),
    );
    save_tiff(&plate, path).unwrap();
}

#[test]
fn test_align_plate_pyramid() {
    let reference = make_ramp(100, 100);
    let plate = make_shifted_plate(
        &reference,
        Displacement::new(3, -2),
        Displacement::new(-4, 1),
    );

    let result = align_plate(&plate, &exact_config(MetricKind::Ssd)).unwrap();

    assert_eq!(result.displacement_a, Displacement::new(3, -2));
    assert_eq!(result.displacement_b, Displacement::new(-4, 1));
    assert_eq!(result.levels.len(), 3);
    assert_eq!(result.composite.width(), 100);
    assert_eq!(result.composite.height(), 100);
    // Plate order: blue is the reference, green and red are the aligned thirds.
    assert_eq!(result.composite.blue.data, reference);
    assert_eq!(result.composite.green.data, reference);
    assert_eq!(result.composite.red.data, reference);
}

#[test]
fn test_align_plate_flat() {
    let reference = make_texture(40, 40);
    let plate = make_shifted_plate(
        &reference,
        Displacement::new(-5, 2),
        Displacement::new(4, 4),
    );
    let config = AlignConfig {
        mode: AlignMode::Flat,
        search_radius: Some(6),
        ..exact_config(MetricKind::Ncc)
    };

    let result = align_plate(&plate, &config).unwrap();
    assert_eq!(result.displacement_a, Displacement::new(-5, 2));
    assert_eq!(result.displacement_b, Displacement::new(4, 4));
    assert_eq!(result.levels.len(), 1);
    assert_eq!(result.levels[0].level.radius, 6);
}

#[test]
fn test_align_plate_with_enhance_keeps_range() {
    let reference = make_ramp(60, 60);
    let plate = make_shifted_plate(&reference, Displacement::new(1, 1), Displacement::ZERO);
    let config = AlignConfig {
        max_depth: Some(1),
        enhance: Some(EnhanceConfig::default()),
        ..exact_config(MetricKind::Ssd)
    };

    let result = align_plate(&plate, &config).unwrap();
    for band in [&result.composite.red, &result.composite.green, &result.composite.blue] {
        assert!(band.data.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }
}

#[test]
fn test_align_plate_rejects_bad_crop() {
    let plate = make_shifted_plate(&make_ramp(30, 30), Displacement::ZERO, Displacement::ZERO);
    let config = AlignConfig {
        crop_percent: Some(60.0),
        ..exact_config(MetricKind::Ssd)
    };
    assert!(matches!(
        align_plate(&plate, &config),
        Err(TrichromeError::InvalidCrop(_))
    ));
}

#[test]
fn test_output_file_name() {
    let config = AlignConfig {
        metric: MetricKind::Ssd,
        output_extension: "png".into(),
        ..AlignConfig::default()
    };
    let name = output_file_name(Path::new("/plates/emir.tif"), &config, 35).unwrap();
    assert_eq!(name, Path::new("emir_SSD_Pyramid_35.png"));
}

#[test]
fn test_process_plate_writes_composite() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("plate.tif");
    write_plate(&input);

    let out_dir = dir.path().join("results");
    let config = AlignConfig {
        output_extension: "png".into(),
        ..exact_config(MetricKind::Ncc)
    };
    let report = process_plate(&input, &config, &out_dir).unwrap();

    assert_eq!(report.output, out_dir.join("plate_NCC_Pyramid_15.png"));
    assert!(report.output.exists());
    assert_eq!((report.width, report.height), (100, 100));

    let saved = load_image(&report.output).unwrap();
    assert_eq!((saved.width(), saved.height()), (100, 100));
    assert_eq!(saved.original_bit_depth, 8);
}

#[test]
fn test_process_plate_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let result = process_plate(
        &dir.path().join("absent.tif"),
        &AlignConfig::default(),
        dir.path(),
    );
    assert!(result.is_err());
}

#[test]
fn test_discover_plates_filters_and_sorts() {
    let dir = tempfile::tempdir().unwrap();
    write_plate(&dir.path().join("b.tif"));
    write_plate(&dir.path().join("a.TIFF"));
    std::fs::write(dir.path().join("notes.txt"), "not a plate").unwrap();
    std::fs::create_dir(dir.path().join("sub.png")).unwrap();

    let plates = discover_plates(dir.path()).unwrap();
    let names: Vec<_> = plates
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["a.TIFF", "b.tif"]);
}

#[test]
fn test_process_batch_collects_failures() {
    let dir = tempfile::tempdir().unwrap();
    write_plate(&dir.path().join("one.tif"));
    write_plate(&dir.path().join("two.tif"));
    std::fs::write(dir.path().join("broken.png"), b"definitely not a png").unwrap();

    let inputs = discover_plates(dir.path()).unwrap();
    assert_eq!(inputs.len(), 3);

    let out_dir = dir.path().join("out");
    let config = AlignConfig {
        output_extension: "tif".into(),
        ..exact_config(MetricKind::Ssd)
    };
    let summary = process_batch(&inputs, &config, &out_dir, 2, &NoOpReporter).unwrap();

    assert_eq!(summary.succeeded.len(), 2);
    assert_eq!(summary.failed.len(), 1);
    assert!(summary.failed[0].0.ends_with("broken.png"));
    for report in &summary.succeeded {
        assert!(report.output.exists());
        assert_eq!(report.displacement_a, Displacement::new(3, -2));
        assert_eq!(report.displacement_b, Displacement::new(-4, 1));
    }
}

#[test]
fn test_process_batch_empty() {
    let dir = tempfile::tempdir().unwrap();
    let result = process_batch(&[], &AlignConfig::default(), dir.path(), 1, &NoOpReporter);
    assert!(matches!(result, Err(TrichromeError::EmptySequence)));
}
