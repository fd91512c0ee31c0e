// Decision policy - pure logic over one cycle's snapshots
use rand::Rng;
use crate::config::Settings;
use crate::models::{Boost, Upgrade};
use crate::ENERGY_BOOST_ID;

/// What the tap phase should do this cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnergyAction {
    /// Buy the full-energy refill boost instead of waiting
    BuyRefill,
    /// Sleep out the energy regeneration, no taps this cycle
    Rest { wait_secs: u64, cooldown_secs: u64 },
    /// Enough energy: submit this many taps
    Tap { count: i64 },
}

/// An upgrade is worth considering while its level is below the configured
/// ceiling, it has not reached one past its own reported max, and it has no
/// active cooldown.
pub fn is_upgrade_eligible(upgrade: &Upgrade, max_level_upgrade: i64) -> bool {
    upgrade.level < max_level_upgrade
        && upgrade.level - 1 != upgrade.max_level.unwrap_or(-1)
        && upgrade.cooldown_seconds == 0
}

/// Greedy return-on-investment score: profit delta per coin spent.
pub fn profit_ratio(upgrade: &Upgrade) -> f64 {
    upgrade.profit_per_hour_delta / upgrade.price
}

/// Filter to purchasable upgrades and order them by profit ratio, best
/// first. The sort is stable, so equal ratios keep their list order.
pub fn rank_upgrades(upgrades: &[Upgrade], max_level_upgrade: i64) -> Vec<&Upgrade> {
    let mut ranked: Vec<&Upgrade> = upgrades
        .iter()
        .filter(|u| u.is_available && !u.is_expired)
        .filter(|u| is_upgrade_eligible(u, max_level_upgrade))
        .collect();

    ranked.sort_by(|a, b| {
        profit_ratio(b)
            .partial_cmp(&profit_ratio(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}

/// The outcome of walking the ranked list against the current balance.
#[derive(Debug)]
pub struct PurchasePlan<'a> {
    /// Upgrades to buy, in ranked order
    pub purchases: Vec<&'a Upgrade>,
    /// First upgrade the balance could not cover, if the walk was cut short
    pub blocked: Option<&'a Upgrade>,
}

/// Walk the ranked upgrades, spending the balance as we go. The first
/// unaffordable upgrade ends the walk entirely: cheaper candidates further
/// down rank lower, so the balance accumulates toward the better buy
/// instead.
pub fn plan_purchases<'a>(ranked: &[&'a Upgrade], balance: f64) -> PurchasePlan<'a> {
    let mut purchases = Vec::new();
    let mut remaining = balance;

    for &upgrade in ranked {
        if upgrade.price > remaining {
            return PurchasePlan { purchases, blocked: Some(upgrade) };
        }
        remaining -= upgrade.price;
        purchases.push(upgrade);
    }

    PurchasePlan { purchases, blocked: None }
}

/// Hours until an upgrade pays for itself; infinite when it earns nothing.
pub fn payback_period(upgrade: &Upgrade) -> f64 {
    if upgrade.profit_per_hour_delta > 0.0 {
        upgrade.price / upgrade.profit_per_hour_delta
    } else {
        f64::INFINITY
    }
}

/// Non-energy boosts are bought in list order whenever affordable and below
/// the level ceiling. The energy refill boost is handled separately.
pub fn should_buy_boost(boost: &Boost, balance: f64, max_level_boost: i64) -> bool {
    boost.id != ENERGY_BOOST_ID && boost.price <= balance && boost.level < max_level_boost
}

/// Decide the tap phase for this cycle from the current energy level and the
/// state of the refill boost.
pub fn plan_energy_action<R: Rng>(
    available_energy: i64,
    energy_boost: &Boost,
    settings: &Settings,
    rng: &mut R,
) -> EnergyAction {
    if available_energy < settings.taps.min_available_energy {
        if settings.boosts.apply_daily_energy
            && energy_boost.cooldown_seconds == 0
            && energy_boost.max_level.map_or(true, |max| energy_boost.level <= max)
        {
            return EnergyAction::BuyRefill;
        }
        let (wait_secs, cooldown_secs) = draw_rest(settings, rng);
        EnergyAction::Rest { wait_secs, cooldown_secs }
    } else {
        let [min, max] = settings.taps.send_taps_count;
        EnergyAction::Tap { count: rng.gen_range(min..=max) }
    }
}

/// Draw the two pacing sleeps for an energy rest. Also used when a refill
/// purchase is rejected by the API and the cycle falls back to waiting.
pub fn draw_rest<R: Rng>(settings: &Settings, rng: &mut R) -> (u64, u64) {
    let [wait_min, wait_max] = settings.taps.send_taps_wait;
    let [cd_min, cd_max] = settings.taps.send_taps_cooldown;
    (
        rng.gen_range(wait_min..=wait_max),
        rng.gen_range(cd_min..=cd_max),
    )
}
