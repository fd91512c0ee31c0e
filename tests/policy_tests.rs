use hamster_cc::config::Settings;
use hamster_cc::models::{Boost, Upgrade};
use hamster_cc::operations::policy::{self, EnergyAction};
use hamster_cc::ENERGY_BOOST_ID;

fn upgrade(id: &str, price: f64, profit_delta: f64) -> Upgrade {
    Upgrade {
        id: id.to_string(),
        level: 1,
        max_level: None,
        price,
        profit_per_hour_delta: profit_delta,
        cooldown_seconds: 0,
        is_available: true,
        is_expired: false,
    }
}

fn energy_boost(level: i64, max_level: i64, cooldown_seconds: i64) -> Boost {
    Boost {
        id: ENERGY_BOOST_ID.to_string(),
        level,
        max_level: Some(max_level),
        price: 0.0,
        cooldown_seconds,
    }
}

#[test]
fn eligibility_excludes_level_at_ceiling() {
    let mut u = upgrade("wifi", 100.0, 50.0);
    u.level = 15;
    assert!(!policy::is_upgrade_eligible(&u, 15));

    u.level = 14;
    assert!(policy::is_upgrade_eligible(&u, 15));
}

#[test]
fn eligibility_excludes_one_past_reported_max() {
    let mut u = upgrade("fitness_app", 100.0, 50.0);
    u.level = 6;
    u.max_level = Some(5);
    assert!(!policy::is_upgrade_eligible(&u, 15));

    // At the reported max itself the upgrade is still purchasable
    u.level = 5;
    assert!(policy::is_upgrade_eligible(&u, 15));
}

#[test]
fn eligibility_excludes_active_cooldown() {
    let mut u = upgrade("top_10_cmc", 100.0, 50.0);
    u.cooldown_seconds = 30;
    assert!(!policy::is_upgrade_eligible(&u, 15));
}

#[test]
fn ranking_drops_unavailable_and_expired() {
    let mut unavailable = upgrade("a", 100.0, 50.0);
    unavailable.is_available = false;
    let mut expired = upgrade("b", 100.0, 50.0);
    expired.is_expired = true;
    let good = upgrade("c", 100.0, 50.0);

    let upgrades = vec![unavailable, expired, good];
    let ranked = policy::rank_upgrades(&upgrades, 15);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].id, "c");
}

#[test]
fn ranking_orders_by_profit_ratio_descending() {
    // A: 50/100 = 0.50, B: 150/200 = 0.75
    let a = upgrade("a", 100.0, 50.0);
    let b = upgrade("b", 200.0, 150.0);

    let upgrades = vec![a, b];
    let ranked = policy::rank_upgrades(&upgrades, 15);
    let ids: Vec<&str> = ranked.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);
}

#[test]
fn ranking_is_stable_for_equal_ratios() {
    let first = upgrade("first", 100.0, 50.0);
    let second = upgrade("second", 200.0, 100.0);

    let upgrades = vec![first, second];
    let ranked = policy::rank_upgrades(&upgrades, 15);
    let ids: Vec<&str> = ranked.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["first", "second"]);
}

#[test]
fn purchase_walk_halts_at_first_unaffordable() {
    // Balance covers A but the walk must stop at the better-ranked B
    let a = upgrade("a", 100.0, 50.0);
    let b = upgrade("b", 200.0, 150.0);
    let upgrades = vec![a, b];

    let ranked = policy::rank_upgrades(&upgrades, 15);
    let plan = policy::plan_purchases(&ranked, 120.0);

    assert!(plan.purchases.is_empty());
    assert_eq!(plan.blocked.unwrap().id, "b");
}

#[test]
fn purchase_walk_spends_down_the_ranking() {
    let a = upgrade("a", 100.0, 50.0);
    let b = upgrade("b", 200.0, 150.0);
    let upgrades = vec![a, b];

    let ranked = policy::rank_upgrades(&upgrades, 15);
    let plan = policy::plan_purchases(&ranked, 350.0);

    let ids: Vec<&str> = plan.purchases.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);
    assert!(plan.blocked.is_none());
}

#[test]
fn purchase_walk_accounts_for_running_balance() {
    // 250 covers B alone; A becomes unaffordable after the deduction
    let a = upgrade("a", 100.0, 50.0);
    let b = upgrade("b", 200.0, 150.0);
    let upgrades = vec![a, b];

    let ranked = policy::rank_upgrades(&upgrades, 15);
    let plan = policy::plan_purchases(&ranked, 250.0);

    let ids: Vec<&str> = plan.purchases.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["b"]);
    assert_eq!(plan.blocked.unwrap().id, "a");
}

#[test]
fn payback_period_is_infinite_without_profit() {
    assert!(policy::payback_period(&upgrade("a", 100.0, 0.0)).is_infinite());
    assert!(policy::payback_period(&upgrade("b", 100.0, -5.0)).is_infinite());
    assert_eq!(policy::payback_period(&upgrade("c", 100.0, 50.0)), 2.0);
}

#[test]
fn boost_filter_excludes_energy_boost_and_ceiling() {
    let settings = Settings::default();
    let affordable = Boost {
        id: "BoostMaxTaps".to_string(),
        level: 1,
        max_level: Some(10),
        price: 50.0,
        cooldown_seconds: 0,
    };
    assert!(policy::should_buy_boost(&affordable, 100.0, settings.boosts.max_level_boost));

    let energy = energy_boost(1, 6, 0);
    assert!(!policy::should_buy_boost(&energy, 100.0, settings.boosts.max_level_boost));

    let mut capped = affordable.clone();
    capped.level = settings.boosts.max_level_boost;
    assert!(!policy::should_buy_boost(&capped, 100.0, settings.boosts.max_level_boost));

    let expensive = Boost { price: 500.0, ..affordable };
    assert!(!policy::should_buy_boost(&expensive, 100.0, settings.boosts.max_level_boost));
}

#[test]
fn low_energy_with_ready_refill_buys_the_boost() {
    let settings = Settings::default();
    let boost = energy_boost(4, 5, 0);

    let action = policy::plan_energy_action(100, &boost, &settings, &mut rand::thread_rng());
    assert_eq!(action, EnergyAction::BuyRefill);
}

#[test]
fn refill_without_reported_max_level_is_treated_as_uncapped() {
    let settings = Settings::default();
    let mut boost = energy_boost(4, 5, 0);
    boost.max_level = None;

    let action = policy::plan_energy_action(100, &boost, &settings, &mut rand::thread_rng());
    assert_eq!(action, EnergyAction::BuyRefill);
}

#[test]
fn low_energy_with_cooling_refill_rests_within_ranges() {
    let settings = Settings::default();
    let boost = energy_boost(4, 5, 10);

    for _ in 0..50 {
        match policy::plan_energy_action(100, &boost, &settings, &mut rand::thread_rng()) {
            EnergyAction::Rest { wait_secs, cooldown_secs } => {
                assert!((30..=60).contains(&wait_secs));
                assert!((15..=25).contains(&cooldown_secs));
            }
            other => panic!("expected a rest, got {:?}", other),
        }
    }
}

#[test]
fn low_energy_without_daily_energy_setting_rests() {
    let mut settings = Settings::default();
    settings.boosts.apply_daily_energy = false;
    let boost = energy_boost(4, 5, 0);

    let action = policy::plan_energy_action(100, &boost, &settings, &mut rand::thread_rng());
    assert!(matches!(action, EnergyAction::Rest { .. }));
}

#[test]
fn low_energy_with_overleveled_refill_rests() {
    let settings = Settings::default();
    let boost = energy_boost(6, 5, 0);

    let action = policy::plan_energy_action(100, &boost, &settings, &mut rand::thread_rng());
    assert!(matches!(action, EnergyAction::Rest { .. }));
}

#[test]
fn sufficient_energy_taps_within_configured_range() {
    let settings = Settings::default();
    let boost = energy_boost(4, 5, 0);

    for _ in 0..50 {
        match policy::plan_energy_action(500, &boost, &settings, &mut rand::thread_rng()) {
            EnergyAction::Tap { count } => assert!((150..=250).contains(&count)),
            other => panic!("expected taps, got {:?}", other),
        }
    }
}

#[test]
fn rest_draws_stay_within_both_ranges() {
    let settings = Settings::default();
    for _ in 0..50 {
        let (wait_secs, cooldown_secs) = policy::draw_rest(&settings, &mut rand::thread_rng());
        assert!((30..=60).contains(&wait_secs));
        assert!((15..=25).contains(&cooldown_secs));
    }
}
