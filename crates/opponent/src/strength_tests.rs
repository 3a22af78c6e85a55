use super::*;

#[test]
fn tiers_are_ordered_one_to_six() {
    let tiers: Vec<u8> = Strength::ALL.iter().map(|s| s.tier()).collect();
    assert_eq!(tiers, [1, 2, 3, 4, 5, 6]);
    assert!(Strength::Beginner < Strength::Grandmaster);
    assert_eq!(Strength::default(), Strength::Intermediate);
}

#[test]
fn parse_by_name_or_number() {
    assert_eq!("master".parse::<Strength>().unwrap(), Strength::Master);
    assert_eq!("GrandMaster".parse::<Strength>().unwrap(), Strength::Grandmaster);
    assert_eq!(" 3 ".parse::<Strength>().unwrap(), Strength::Advanced);
    assert_eq!(
        "club".parse::<Strength>(),
        Err(StrengthError::Unknown("club".to_string()))
    );
    assert_eq!(Strength::try_from(0), Err(StrengthError::OutOfRange(0)));
    assert_eq!(Strength::try_from(7), Err(StrengthError::OutOfRange(7)));
    assert_eq!(Strength::try_from(1), Ok(Strength::Beginner));
}

#[test]
fn strategies_by_tier() {
    assert_eq!(Strength::Beginner.strategy(), Strategy::Random);
    assert_eq!(Strength::Intermediate.strategy(), Strategy::Greedy);
    assert_eq!(Strength::Advanced.strategy(), Strategy::Tactical);
    for s in [Strength::Expert, Strength::Master, Strength::Grandmaster] {
        assert_eq!(s.strategy(), Strategy::Search);
    }
}

#[test]
fn elo_and_budgets() {
    let elos: Vec<u32> = Strength::ALL.iter().map(|s| s.nominal_elo()).collect();
    assert_eq!(elos, [800, 1200, 1600, 2000, 2400, 2800]);

    let normal: Vec<u64> = Strength::ALL
        .iter()
        .map(|s| s.recommended_budget_ms(false))
        .collect();
    assert_eq!(normal, [150, 250, 400, 600, 800, 1000]);
    let blitz: Vec<u64> = Strength::ALL
        .iter()
        .map(|s| s.recommended_budget_ms(true))
        .collect();
    assert_eq!(blitz, [100, 150, 250, 350, 450, 500]);
}

#[test]
fn default_time_controls() {
    assert_eq!(
        TimeControlKind::default_for(Strength::Grandmaster, false),
        TimeControlKind::Rapid
    );
    assert_eq!(
        TimeControlKind::default_for(Strength::Expert, false),
        TimeControlKind::Classical
    );
    assert_eq!(
        TimeControlKind::default_for(Strength::Beginner, true),
        TimeControlKind::Blitz
    );
    assert_eq!(TimeControlKind::Blitz.initial_ms(), 180_000);
    assert_eq!(TimeControlKind::Classical.increment_ms(), 30_000);
    assert!(TimeControlKind::Blitz.is_blitz());
    assert!(!TimeControlKind::Unlimited.is_blitz());
}

#[test]
fn search_profiles() {
    assert!(Strength::Advanced
        .search_profile(TimeControlKind::Classical)
        .is_none());

    let gm = Strength::Grandmaster
        .search_profile(TimeControlKind::Unlimited)
        .unwrap();
    assert_eq!((gm.max_depth, gm.think_time_ms), (7, 4000));
    assert_eq!(gm.root_limits.depth_2, 32);
    assert_eq!(gm.inner_limits.depth_4_plus, 18);

    let expert = SearchProfile::for_tier(Strength::Expert, TimeControlKind::Blitz).unwrap();
    assert_eq!((expert.max_depth, expert.think_time_ms), (2, 300));
    let config = expert.search_config();
    assert_eq!(config.max_depth, 2);
    assert_eq!(config.root_limits.depth_3, 16);
    assert_eq!(config.quiescence_captures, 20);
}

#[test]
fn serde_uses_lowercase_names() {
    #[derive(serde::Deserialize)]
    struct Wrapper {
        strength: Strength,
        clock: TimeControlKind,
    }
    let w: Wrapper = toml::from_str("strength = \"master\"\nclock = \"rapid\"").unwrap();
    assert_eq!(w.strength, Strength::Master);
    assert_eq!(w.clock, TimeControlKind::Rapid);
    assert_eq!(Strength::Expert.to_string(), "expert");
}
