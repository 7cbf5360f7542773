use console::Style;
use trichrome_core::pipeline::{BatchSummary, PlateReport};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    failed: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            failed: Style::new().red().bold(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_plate_summary(report: &PlateReport) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Trichrome Alignment"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(19)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(report.input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(report.output.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Size"),
        s.value.apply_to(format!("{}x{}", report.width, report.height))
    );
    println!();

    println!("  {}", s.header.apply_to("Search"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Metric"),
        s.method.apply_to(report.metric)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Mode"),
        s.method.apply_to(report.mode)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Radius"),
        s.value.apply_to(report.params.search_radius)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Depth"),
        s.value.apply_to(report.params.max_depth)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Crop"),
        s.value.apply_to(format!("{}%", report.params.crop_percent))
    );
    println!();

    println!("  {}", s.header.apply_to("Displacement"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Green"),
        s.value.apply_to(report.displacement_a)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Red"),
        s.value.apply_to(report.displacement_b)
    );
    if report.levels.len() > 1 {
        for record in &report.levels {
            println!(
                "      {:<10}{}  {}",
                s.label.apply_to(format!("1/{}", record.level.factor)),
                record.displacement_a,
                record.displacement_b
            );
        }
    }
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Elapsed"),
        s.value.apply_to(format!("{:.2?}", report.elapsed))
    );
    println!();
}

pub fn print_batch_summary(summary: &BatchSummary) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Batch Summary"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(13)));
    println!();

    for report in &summary.succeeded {
        println!(
            "  {}  {} {}  {}",
            s.path.apply_to(report.output.display()),
            s.label.apply_to("G"),
            s.value.apply_to(report.displacement_a),
            s.value.apply_to(format!("R {}", report.displacement_b))
        );
    }
    for (path, error) in &summary.failed {
        println!(
            "  {}  {}",
            s.path.apply_to(path.display()),
            s.failed.apply_to(error)
        );
    }

    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Succeeded"),
        s.method.apply_to(summary.succeeded.len())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Failed"),
        if summary.failed.is_empty() {
            s.value.apply_to(summary.failed.len())
        } else {
            s.failed.apply_to(summary.failed.len())
        }
    );
    println!();
}
