use super::*;

#[test]
fn empty_toml_gives_defaults() {
    let config = OpponentConfig::from_toml_str("").unwrap();
    assert_eq!(config, OpponentConfig::default());
    assert_eq!(config.strength, Strength::Intermediate);
    assert_eq!(config.worker_grace_ms, 500);
    assert_eq!(config.effective_time_control(), TimeControlKind::Classical);
    assert_eq!(config.effective_budget_ms(), 250);
}

#[test]
fn full_toml() {
    let text = r#"
        strength = "grandmaster"
        time_control = "blitz"
        budget_ms = 450
        worker_grace_ms = 200
        seed = 7
    "#;
    let config = OpponentConfig::from_toml_str(text).unwrap();
    assert_eq!(config.strength, Strength::Grandmaster);
    assert_eq!(config.effective_time_control(), TimeControlKind::Blitz);
    assert_eq!(config.effective_budget_ms(), 450);
    assert_eq!(config.worker_grace_ms, 200);
    assert_eq!(config.seed, Some(7));
}

#[test]
fn budget_follows_blitz_clock() {
    let mut config = OpponentConfig::new(Strength::Master);
    assert_eq!(config.effective_budget_ms(), 800);
    config.time_control = Some(TimeControlKind::Blitz);
    assert_eq!(config.effective_budget_ms(), 450);

    let gm = OpponentConfig::new(Strength::Grandmaster);
    assert_eq!(gm.effective_time_control(), TimeControlKind::Rapid);
}

#[test]
fn rejects_unknown_strength() {
    let err = OpponentConfig::from_toml_str("strength = \"wizard\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn missing_file_is_io_error() {
    let err = OpponentConfig::load("/definitely/not/here/opponent.toml").unwrap_err();
    match err {
        ConfigError::Io { path, .. } => assert!(path.ends_with("opponent.toml")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn round_trips_through_toml() {
    let config = OpponentConfig {
        strength: Strength::Expert,
        time_control: Some(TimeControlKind::Unlimited),
        budget_ms: Some(1234),
        worker_grace_ms: 100,
        seed: Some(99),
    };
    let text = toml::to_string(&config).unwrap();
    assert_eq!(OpponentConfig::from_toml_str(&text).unwrap(), config);
}
