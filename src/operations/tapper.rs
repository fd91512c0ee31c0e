// One decision-policy cycle for a single account
use tokio::time::{sleep, Duration};
use crate::client::GameApi;
use crate::config::Settings;
use crate::models::ClickerUser;
use crate::operations::policy::{self, EnergyAction};
use crate::{ENERGY_BOOST_ID, STREAK_TASK_ID, v_info};

pub struct TapperOperations<'a, C: GameApi> {
    client: &'a C,
    settings: &'a Settings,
    session_name: &'a str,
}

impl<'a, C: GameApi> TapperOperations<'a, C> {
    pub fn new(client: &'a C, settings: &'a Settings, session_name: &'a str) -> Self {
        Self { client, settings, session_name }
    }

    /// Run one full cycle: profile sync, daily streak task, upgrades,
    /// boosts, then energy management / taps. A missing remote payload
    /// skips only its own phase; invariant violations propagate.
    pub async fn run_cycle(&self, token: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut profile = match self.client.get_profile(token).await? {
            Some(profile) => profile,
            None => {
                v_info!("{}: Profile data is None. Retrying...", self.session_name);
                sleep(Duration::from_secs(self.settings.retry.retry_delay_seconds)).await;
                return Ok(());
            }
        };

        self.display_profile(&profile);

        self.process_daily_task(token).await?;

        if self.settings.upgrades.auto_upgrade {
            self.process_upgrades(token, &mut profile).await?;
        }

        self.process_taps(token, &mut profile).await?;

        Ok(())
    }

    fn display_profile(&self, profile: &ClickerUser) {
        v_info!(
            "{}: Passive Earnings - {} per sec, {} per hour.",
            self.session_name,
            profile.earn_passive_per_sec,
            profile.earn_passive_per_hour
        );
        v_info!(
            "{}: Last Passive Earn: {}, Balance Coins: {}, Total Coins: {}",
            self.session_name,
            profile.last_passive_earn,
            profile.balance_coins,
            profile.total_coins
        );
    }

    /// Claim the daily streak reward when it hasn't been claimed yet.
    async fn process_daily_task(&self, token: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let tasks = match self.client.get_tasks(token).await? {
            Some(tasks) => tasks,
            None => {
                v_info!("{}: Tasks data is None. Skipping daily task.", self.session_name);
                return Ok(());
            }
        };

        // The streak task is always part of the task list; its absence
        // means the remote contract changed under us.
        let daily_task = tasks
            .iter()
            .find(|task| task.id == STREAK_TASK_ID)
            .ok_or_else(|| {
                format!("{}: task list has no '{}' entry", self.session_name, STREAK_TASK_ID)
            })?;

        if !daily_task.is_completed {
            self.client.check_task(token, &daily_task.id).await?;
            v_info!(
                "{}: Completed daily task for {} days. Reward: {}",
                self.session_name,
                daily_task.days.unwrap_or(0),
                daily_task.reward_coins
            );
        }

        Ok(())
    }

    /// Buy upgrades best-ratio first until the first one we cannot afford.
    /// Cheaper upgrades further down the ranking are left for later cycles;
    /// the balance accumulates toward the better buy instead.
    async fn process_upgrades(
        &self,
        token: &str,
        profile: &mut ClickerUser,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let upgrades = match self.client.get_upgrades(token).await? {
            Some(upgrades) => upgrades,
            None => {
                v_info!("{}: Upgrades data is None. Skipping upgrade process.", self.session_name);
                return Ok(());
            }
        };

        let ranked = policy::rank_upgrades(&upgrades, self.settings.upgrades.max_level_upgrade);
        let plan = policy::plan_purchases(&ranked, profile.balance_coins);

        for upgrade in plan.purchases {
            self.client.buy_upgrade(token, &upgrade.id).await?;
            profile.balance_coins -= upgrade.price;
            v_info!(
                "{}: Purchased upgrade {} for {} coins. Payback period: {:.2} hours.",
                self.session_name,
                upgrade.id,
                upgrade.price,
                policy::payback_period(upgrade)
            );
        }

        if let Some(blocked) = plan.blocked {
            v_info!(
                "{}: Not enough coins to purchase upgrade {}. Required: {}, Current: {}. Accumulating coins...",
                self.session_name,
                blocked.id,
                blocked.price,
                profile.balance_coins
            );
        }

        Ok(())
    }

    /// Boost purchases, energy management and tap submission.
    async fn process_taps(
        &self,
        token: &str,
        profile: &mut ClickerUser,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let available_energy = profile.available_taps;

        let boosts = match self.client.get_boosts(token).await? {
            Some(boosts) => boosts,
            None => {
                v_info!("{}: Boosts data is None. Skipping boosts process.", self.session_name);
                return Ok(());
            }
        };

        for boost in &boosts {
            if policy::should_buy_boost(boost, profile.balance_coins, self.settings.boosts.max_level_boost) {
                self.client.buy_boost(token, &boost.id).await?;
                profile.balance_coins -= boost.price;
                v_info!(
                    "{}: Purchased boost {} for {} coins.",
                    self.session_name,
                    boost.id,
                    boost.price
                );
            }
        }

        let energy_boost = boosts
            .iter()
            .find(|boost| boost.id == ENERGY_BOOST_ID)
            .ok_or_else(|| {
                format!("{}: boost list has no '{}' entry", self.session_name, ENERGY_BOOST_ID)
            })?;

        let action =
            policy::plan_energy_action(available_energy, energy_boost, self.settings, &mut rand::thread_rng());

        match action {
            EnergyAction::BuyRefill => {
                if self.client.buy_boost(token, ENERGY_BOOST_ID).await? {
                    v_info!("{}: Energy boost activated.", self.session_name);
                    return Ok(());
                }
                // refill rejected, wait out the regeneration instead
                let (wait_secs, cooldown_secs) = policy::draw_rest(self.settings, &mut rand::thread_rng());
                self.rest(wait_secs, cooldown_secs).await;
            }
            EnergyAction::Rest { wait_secs, cooldown_secs } => {
                self.rest(wait_secs, cooldown_secs).await;
            }
            EnergyAction::Tap { count } => {
                match self.client.send_taps(token, available_energy, count).await? {
                    Some(updated) => {
                        v_info!("{}: Sent {} taps. Updated profile:", self.session_name, count);
                        self.display_profile(&updated);
                        *profile = updated;
                    }
                    None => {
                        v_info!("{}: Taps data is None. Skipping taps process.", self.session_name);
                    }
                }
            }
        }

        Ok(())
    }

    async fn rest(&self, wait_secs: u64, cooldown_secs: u64) {
        v_info!(
            "{}: Not enough energy. Waiting for {} seconds.",
            self.session_name,
            wait_secs
        );
        sleep(Duration::from_secs(wait_secs)).await;

        v_info!("{}: Cooling down for {} seconds.", self.session_name, cooldown_secs);
        sleep(Duration::from_secs(cooldown_secs)).await;
    }
}
