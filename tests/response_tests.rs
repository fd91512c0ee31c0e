use hamster_cc::models::{BoostsPayload, ResponseBody, SyncPayload, TasksPayload, UpgradesPayload};
use serde_json::json;

#[test]
fn direct_profile_payload_parses_from_top_level() {
    let value = json!({
        "clickerUser": {
            "availableTaps": 1200,
            "balanceCoins": 1500.5,
            "totalCoins": 9000.0,
            "earnPassivePerSec": 1.5,
            "earnPassivePerHour": 5400.0,
            "lastPassiveEarn": 120.0
        }
    });

    let body = ResponseBody::<SyncPayload>::parse(value).unwrap();
    assert!(matches!(body, ResponseBody::Direct(_)));

    let profile = body.into_inner().clicker_user;
    assert_eq!(profile.available_taps, 1200);
    assert_eq!(profile.balance_coins, 1500.5);
}

#[test]
fn validation_profile_payload_parses_from_found() {
    let value = json!({
        "type": "validation",
        "found": {
            "clickerUser": {
                "availableTaps": 1200,
                "balanceCoins": 1500.5
            }
        }
    });

    let body = ResponseBody::<SyncPayload>::parse(value).unwrap();
    assert!(matches!(body, ResponseBody::Validation(_)));

    let profile = body.into_inner().clicker_user;
    assert_eq!(profile.available_taps, 1200);
    assert_eq!(profile.balance_coins, 1500.5);
}

#[test]
fn wrapped_and_direct_payloads_produce_equal_profiles() {
    let inner = json!({
        "availableTaps": 333,
        "balanceCoins": 42.0
    });
    let direct = json!({ "clickerUser": inner.clone() });
    let wrapped = json!({ "type": "validation", "found": { "clickerUser": inner } });

    let from_direct = ResponseBody::<SyncPayload>::parse(direct).unwrap().into_inner();
    let from_wrapped = ResponseBody::<SyncPayload>::parse(wrapped).unwrap().into_inner();

    assert_eq!(from_direct.clicker_user.available_taps, from_wrapped.clicker_user.available_taps);
    assert_eq!(from_direct.clicker_user.balance_coins, from_wrapped.clicker_user.balance_coins);
}

#[test]
fn other_type_discriminators_are_not_unwrapped() {
    let value = json!({
        "type": "ok",
        "clickerUser": { "balanceCoins": 1.0 }
    });

    // The discriminator must equal "validation" for the nested form;
    // anything else is a top-level payload. The unknown "type" key is
    // ignored by serde.
    let body = ResponseBody::<SyncPayload>::parse(value).unwrap();
    assert!(matches!(body, ResponseBody::Direct(_)));
}

#[test]
fn validation_without_found_is_an_error() {
    let value = json!({ "type": "validation" });
    assert!(ResponseBody::<SyncPayload>::parse(value).is_err());
}

#[test]
fn profile_display_fields_default_when_absent() {
    let value = json!({ "clickerUser": { "balanceCoins": 10.0 } });
    let profile = ResponseBody::<SyncPayload>::parse(value)
        .unwrap()
        .into_inner()
        .clicker_user;

    assert_eq!(profile.available_taps, 0);
    assert_eq!(profile.total_coins, 0.0);
    assert_eq!(profile.earn_passive_per_hour, 0.0);
}

#[test]
fn upgrades_payload_handles_optional_fields() {
    let value = json!({
        "upgradesForBuy": [
            {
                "id": "wifi",
                "level": 3,
                "price": 1000.0,
                "profitPerHourDelta": 90.0,
                "isAvailable": true,
                "isExpired": false
            },
            {
                "id": "fitness_app",
                "level": 2,
                "maxLevel": 10,
                "price": 500.0,
                "profitPerHourDelta": 30.0,
                "cooldownSeconds": 120,
                "isAvailable": false,
                "isExpired": true
            }
        ]
    });

    let upgrades = ResponseBody::<UpgradesPayload>::parse(value)
        .unwrap()
        .into_inner()
        .upgrades_for_buy;

    assert_eq!(upgrades.len(), 2);
    assert_eq!(upgrades[0].max_level, None);
    assert_eq!(upgrades[0].cooldown_seconds, 0);
    assert_eq!(upgrades[1].max_level, Some(10));
    assert_eq!(upgrades[1].cooldown_seconds, 120);
}

#[test]
fn boosts_payload_parses_the_energy_boost() {
    let value = json!({
        "type": "validation",
        "found": {
            "boostsForBuy": [
                {
                    "id": "BoostFullAvailableTaps",
                    "level": 2,
                    "maxLevel": 6,
                    "price": 0.0,
                    "cooldownSeconds": 3600
                }
            ]
        }
    });

    let boosts = ResponseBody::<BoostsPayload>::parse(value)
        .unwrap()
        .into_inner()
        .boosts_for_buy;

    assert_eq!(boosts.len(), 1);
    assert_eq!(boosts[0].id, hamster_cc::ENERGY_BOOST_ID);
    assert_eq!(boosts[0].max_level, Some(6));
    assert_eq!(boosts[0].cooldown_seconds, 3600);
}

#[test]
fn boost_without_max_level_does_not_poison_the_list() {
    let value = json!({
        "boostsForBuy": [
            { "id": "BoostMaxTaps", "level": 1, "price": 100.0 },
            {
                "id": "BoostFullAvailableTaps",
                "level": 2,
                "maxLevel": 6,
                "price": 0.0,
                "cooldownSeconds": 0
            }
        ]
    });

    let boosts = ResponseBody::<BoostsPayload>::parse(value)
        .unwrap()
        .into_inner()
        .boosts_for_buy;

    assert_eq!(boosts.len(), 2);
    assert_eq!(boosts[0].max_level, None);
    assert_eq!(boosts[1].max_level, Some(6));
}

#[test]
fn tasks_payload_keeps_streak_days() {
    let value = json!({
        "tasks": [
            { "id": "streak_days", "isCompleted": false, "rewardCoins": 5000.0, "days": 3 },
            { "id": "subscribe_telegram_channel", "isCompleted": true }
        ]
    });

    let tasks = ResponseBody::<TasksPayload>::parse(value)
        .unwrap()
        .into_inner()
        .tasks;

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].days, Some(3));
    assert_eq!(tasks[0].reward_coins, 5000.0);
    assert_eq!(tasks[1].days, None);
    assert_eq!(tasks[1].reward_coins, 0.0);
}
