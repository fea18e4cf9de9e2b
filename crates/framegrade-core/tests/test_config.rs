use framegrade_core::quality::{QualityThresholds, QualityVerdict};

#[test]
fn test_default_thresholds() {
    let t = QualityThresholds::default();
    assert!((t.dark - 0.3).abs() < 1e-6);
    assert!((t.bright - 0.8).abs() < 1e-6);
    assert!((t.edge_low - 500.0).abs() < 1e-6);
    assert!((t.edge_high - 1000.0).abs() < 1e-6);
    assert!((t.uniform - 0.5).abs() < 1e-6);
    assert!((t.blur - 200.0).abs() < 1e-9);
    assert!((t.noise - 70.0).abs() < 1e-9);
}

#[test]
fn test_thresholds_toml_round_trip() {
    let original = QualityThresholds {
        dark: 0.2,
        bright: 0.9,
        edge_low: 300.0,
        edge_high: 600.0,
        uniform: 0.1,
        blur: 150.0,
        noise: 40.0,
    };
    let text = toml::to_string_pretty(&original).unwrap();
    let parsed: QualityThresholds = toml::from_str(&text).unwrap();
    assert_eq!(parsed, original);
}

#[test]
fn test_partial_toml_falls_back_to_defaults() {
    let parsed: QualityThresholds = toml::from_str("dark = 0.5\nnoise = 30.0\n").unwrap();
    assert!((parsed.dark - 0.5).abs() < 1e-6);
    assert!((parsed.noise - 30.0).abs() < 1e-9);
    assert!((parsed.bright - 0.8).abs() < 1e-6);
    assert!((parsed.uniform - 0.5).abs() < 1e-6);
}

#[test]
fn test_empty_toml_is_all_defaults() {
    let parsed: QualityThresholds = toml::from_str("").unwrap();
    assert_eq!(parsed, QualityThresholds::default());
}

#[test]
fn test_verdict_display() {
    assert_eq!(format!("{}", QualityVerdict::TooDark), "too dark");
    assert_eq!(format!("{}", QualityVerdict::TooBright), "too bright");
    assert_eq!(format!("{}", QualityVerdict::TooUniform), "too uniform");
    assert_eq!(format!("{}", QualityVerdict::TooBlurred), "too blurred");
    assert_eq!(format!("{}", QualityVerdict::TooNoisy), "too noisy");
    assert_eq!(format!("{}", QualityVerdict::GoodQuality), "good quality");
}

#[test]
fn test_verdict_priority_order() {
    assert_eq!(
        QualityVerdict::ALL,
        [
            QualityVerdict::TooDark,
            QualityVerdict::TooBright,
            QualityVerdict::TooUniform,
            QualityVerdict::TooBlurred,
            QualityVerdict::TooNoisy,
            QualityVerdict::GoodQuality,
        ]
    );
    assert!(QualityVerdict::GoodQuality.is_good());
    assert!(!QualityVerdict::TooNoisy.is_good());
}
