use console::Style;

use framegrade_core::quality::{QualityReport, QualityThresholds, QualityVerdict};

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    good: Style,
    poor: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            good: Style::new().green(),
            poor: Style::new().yellow(),
        }
    }
}

/// Print verdict counts plus the thresholds they were judged against.
pub fn print_summary<'a>(
    thresholds: &QualityThresholds,
    reports: impl Iterator<Item = &'a QualityReport>,
) {
    let s = Styles::new();

    let mut counts = [0usize; QualityVerdict::ALL.len()];
    let mut total = 0usize;
    for report in reports {
        let slot = QualityVerdict::ALL
            .iter()
            .position(|v| *v == report.verdict)
            .expect("verdict is one of the six labels");
        counts[slot] += 1;
        total += 1;
    }

    println!();
    println!("  {}", s.title.apply_to("Quality Summary"));
    println!("  {}", s.title.apply_to("\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}"));
    println!();
    println!(
        "  {:<16}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(total)
    );

    for (verdict, count) in QualityVerdict::ALL.iter().zip(counts) {
        if count == 0 {
            continue;
        }
        let style = if verdict.is_good() { &s.good } else { &s.poor };
        println!(
            "  {:<16}{}",
            style.apply_to(verdict.to_string()),
            s.value.apply_to(count)
        );
    }

    println!();
    println!(
        "  {:<16}dark {}  bright {}  edges {}/{}  uniform {}  blur {}  noise {}",
        s.label.apply_to("Thresholds"),
        thresholds.dark,
        thresholds.bright,
        thresholds.edge_low,
        thresholds.edge_high,
        thresholds.uniform,
        thresholds.blur,
        thresholds.noise
    );
    println!();
}
