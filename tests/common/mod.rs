#![allow(dead_code)]

use std::sync::Arc;

use cashpet_core::config::EngineConfig;
use cashpet_core::core::FixedClock;
use cashpet_core::DomainState;
use chrono::NaiveDate;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Deterministic config: no random bonuses, fixed seed.
pub fn quiet_config() -> EngineConfig {
    let mut config = EngineConfig::default().without_bonuses();
    config.rng_seed = Some(7);
    config
}

/// State pinned to `today` with a clock the caller can move.
pub fn state_on(config: EngineConfig, today: NaiveDate) -> (DomainState, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::on(today));
    let state = DomainState::new(config, clock.clone()).expect("build state");
    (state, clock)
}

pub fn quiet_state() -> DomainState {
    state_on(quiet_config(), date(2024, 1, 15)).0
}
