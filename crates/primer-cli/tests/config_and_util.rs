//! Integration tests for config loading, value parsing and the command
//! helpers behind the `primer` binary.

use primer_cli::commands::descend::run_descent;
use primer_cli::commands::describe::run_describe;
use primer_cli::commands::hypothesis::run_hypothesis;
use primer_cli::commands::kids::run_kids;
use primer_cli::commands::regression::{load_regression_config, run_regression, RegressionConfig};
use primer_cli::util::parse_values;
use primer_math::config::Strategy;

// ---------------------------------------------------------------------------
// RegressionConfig defaults & serialization
// ---------------------------------------------------------------------------

#[test]
fn regression_config_default_values() {
    let cfg = RegressionConfig::default();
    assert_eq!(cfg.slope, 20.0);
    assert_eq!(cfg.intercept, 5.0);
    assert_eq!(cfg.inputs().len(), 100);
    assert_eq!(cfg.training.strategy, Strategy::Batch);
}

#[test]
fn regression_config_round_trips_json() {
    let cfg = RegressionConfig::default();
    let json = serde_json::to_string_pretty(&cfg).unwrap();
    assert!(json.contains("learning_rate"));
    let cfg2: RegressionConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(cfg, cfg2);
}

#[test]
fn regression_config_loads_partial_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("regression.json");
    std::fs::write(
        &path,
        r#"{"slope": -3.0, "training": {"learning_rate": 0.001, "epochs": 200, "seed": 4, "strategy": "Stochastic"}}"#,
    )
    .unwrap();

    let cfg = load_regression_config(&path).unwrap();
    assert_eq!(cfg.slope, -3.0);
    assert_eq!(cfg.intercept, 5.0);
    assert_eq!(cfg.training.seed, Some(4));

    let model = run_regression(&cfg).unwrap();
    assert!((model.slope + 3.0).abs() < 0.1, "slope = {}", model.slope);
    assert!((model.intercept - 5.0).abs() < 0.1, "intercept = {}", model.intercept);
}

#[test]
fn strategy_override_keeps_configured_batch_settings() {
    let mut cfg = RegressionConfig::default();
    cfg.training.strategy = Strategy::MiniBatch {
        batch_size: 7,
        shuffle: false,
    };

    cfg.override_strategy("minibatch").unwrap();
    assert_eq!(
        cfg.training.strategy,
        Strategy::MiniBatch {
            batch_size: 7,
            shuffle: false
        }
    );

    cfg.override_strategy("stochastic").unwrap();
    assert_eq!(cfg.training.strategy, Strategy::Stochastic);

    cfg.override_strategy("minibatch").unwrap();
    assert_eq!(
        cfg.training.strategy,
        Strategy::MiniBatch {
            batch_size: 20,
            shuffle: true
        }
    );

    assert!(cfg.override_strategy("newton").is_err());
}

#[test]
fn missing_config_reports_path() {
    let err = load_regression_config("/nonexistent/regression.json").unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to read config"));
}

#[test]
fn malformed_config_reports_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = load_regression_config(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config"));
}

#[test]
fn empty_x_range_errors() {
    let cfg = RegressionConfig {
        x_min: 5,
        x_max: 5,
        ..RegressionConfig::default()
    };
    assert!(run_regression(&cfg).is_err());
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

#[test]
fn parse_values_accepts_commas_and_spaces() {
    let values = parse_values(&["1,2", "3 -4.5"]).unwrap();
    assert_eq!(values, vec![1.0, 2.0, 3.0, -4.5]);
    assert!(parse_values(&["1", "two"]).is_err());
}

#[test]
fn describe_command() {
    let summary = run_describe(&["1", "10", "2", "9", "5"]).unwrap();
    assert_eq!(summary.median, 5.0);
    assert!(run_describe::<&str>(&[]).is_err());
}

#[test]
fn hypothesis_command_matches_worked_example() {
    let report = run_hypothesis(1000, 0.5, 530.0, 0.05, Some(0.55)).unwrap();
    assert!((report.lower - 469.0).abs() < 0.5);
    assert!((report.upper - 531.0).abs() < 0.5);
    assert!((report.p_value - 0.062).abs() < 0.001);
    assert!(!report.reject);
    assert!((report.power.unwrap() - 0.887).abs() < 0.01);

    let report = run_hypothesis(1000, 0.5, 532.0, 0.05, None).unwrap();
    assert!(report.reject);
    assert!(report.power.is_none());
}

#[test]
fn descent_command_converges() {
    let report = run_descent(3, 1000, -0.01, false, Some(0)).unwrap();
    assert!(report.distance_to_origin < 1e-5);
    let report = run_descent(2, 1000, -0.01, true, Some(0)).unwrap();
    assert!(report.distance_to_origin < 1e-3);
}

#[test]
fn kids_command_is_seeded() {
    assert_eq!(run_kids(500, Some(3)), run_kids(500, Some(3)));
}
