//! Tunable numbers and reward policies, plus JSON persistence for them.

use std::{
    collections::HashSet,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::shop::{default_catalog, Product};
use crate::errors::ConfigError;

const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "engine.json";
const APP_DIR: &str = "cashpet";
const TMP_SUFFIX: &str = "tmp";

/// How many food units a money amount is worth.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RewardPolicy {
    Flat {
        amount: u32,
    },
    /// `clamp(floor(amount / divisor), min, max)`.
    Proportional {
        divisor: Decimal,
        min: u32,
        max: u32,
    },
}

impl RewardPolicy {
    /// Fixed +10 food per income entry.
    pub fn flat_income() -> Self {
        RewardPolicy::Flat { amount: 10 }
    }

    /// One food per 1000 earned, between 1 and 50.
    pub fn proportional_income() -> Self {
        RewardPolicy::Proportional {
            divisor: dec!(1000),
            min: 1,
            max: 50,
        }
    }

    /// One food per 1000 of target, between 50 and 100.
    pub fn goal_completion() -> Self {
        RewardPolicy::Proportional {
            divisor: dec!(1000),
            min: 50,
            max: 100,
        }
    }

    pub fn reward_for(&self, amount: Decimal) -> u32 {
        match *self {
            RewardPolicy::Flat { amount: flat } => flat,
            RewardPolicy::Proportional { divisor, min, max } => {
                if divisor <= Decimal::ZERO {
                    return max;
                }
                // A quotient past the decimal range earns the ceiling.
                let Some(raw) = amount.checked_div(divisor).map(|q| q.floor()) else {
                    return max;
                };
                let units = if raw <= Decimal::ZERO {
                    0
                } else {
                    raw.to_u32().unwrap_or(u32::MAX)
                };
                units.clamp(min, max)
            }
        }
    }

    fn validate(&self, field: &str) -> Result<(), ConfigError> {
        if let RewardPolicy::Proportional { divisor, min, max } = *self {
            if divisor <= Decimal::ZERO {
                return Err(ConfigError::Invalid(format!(
                    "{field}: divisor must be positive"
                )));
            }
            if min > max {
                return Err(ConfigError::Invalid(format!(
                    "{field}: min {min} exceeds max {max}"
                )));
            }
        }
        Ok(())
    }
}

/// An independent chance of a small food bonus.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BonusRoll {
    pub chance: f64,
    pub min: u32,
    pub max: u32,
}

impl BonusRoll {
    pub fn new(chance: f64, min: u32, max: u32) -> Self {
        Self { chance, min, max }
    }

    pub fn never() -> Self {
        Self::new(0.0, 0, 0)
    }

    fn validate(&self, field: &str) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.chance) {
            return Err(ConfigError::Invalid(format!(
                "{field}: chance {} outside [0, 1]",
                self.chance
            )));
        }
        if self.min > self.max {
            return Err(ConfigError::Invalid(format!(
                "{field}: min {} exceeds max {}",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LedgerSettings {
    pub starting_balance: Decimal,
    pub display_name: String,
    pub income_reward: RewardPolicy,
    pub income_energy_bonus: u8,
    pub expense_energy_penalty: u8,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            starting_balance: dec!(15000.50),
            display_name: "Player".into(),
            income_reward: RewardPolicy::flat_income(),
            income_energy_bonus: 10,
            expense_energy_penalty: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GoalSettings {
    pub reward: RewardPolicy,
    pub funding_bonus: BonusRoll,
    pub seed_demo_goals: bool,
}

impl Default for GoalSettings {
    fn default() -> Self {
        Self {
            reward: RewardPolicy::goal_completion(),
            funding_bonus: BonusRoll::new(0.15, 1, 10),
            seed_demo_goals: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PetSettings {
    pub name: String,
    pub starting_energy: u8,
    pub feed_cost: u32,
    pub feed_energy: u8,
    pub tick_interval_secs: u64,
    pub decay_per_tick: u8,
    pub starvation_threshold_secs: u32,
    pub starvation_penalty: u8,
    pub feed_bonus: BonusRoll,
    pub history_limit: usize,
}

impl Default for PetSettings {
    fn default() -> Self {
        Self {
            name: "Cashy".into(),
            starting_energy: 80,
            feed_cost: 10,
            feed_energy: 20,
            tick_interval_secs: 30,
            decay_per_tick: 5,
            starvation_threshold_secs: 120,
            starvation_penalty: 10,
            feed_bonus: BonusRoll::new(0.1, 1, 5),
            history_limit: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShopSettings {
    pub starting_food: u32,
    pub catalog: Vec<Product>,
    pub purchase_bonus: BonusRoll,
}

impl Default for ShopSettings {
    fn default() -> Self {
        Self {
            starting_food: 0,
            catalog: default_catalog(),
            purchase_bonus: BonusRoll::new(0.2, 1, 10),
        }
    }
}

/// Complete engine configuration. `EngineConfig::default()` is usable as is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub ledger: LedgerSettings,
    pub goals: GoalSettings,
    pub pet: PetSettings,
    pub shop: ShopSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rng_seed: Option<u64>,
}

impl EngineConfig {
    /// Disables every random bonus. Handy for deterministic sessions.
    pub fn without_bonuses(mut self) -> Self {
        self.goals.funding_bonus = BonusRoll::never();
        self.pet.feed_bonus = BonusRoll::never();
        self.shop.purchase_bonus = BonusRoll::never();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ledger.starting_balance < Decimal::ZERO {
            return Err(ConfigError::Invalid(
                "ledger.starting_balance must not be negative".into(),
            ));
        }
        self.ledger.income_reward.validate("ledger.income_reward")?;
        self.goals.reward.validate("goals.reward")?;
        self.goals.funding_bonus.validate("goals.funding_bonus")?;
        self.pet.feed_bonus.validate("pet.feed_bonus")?;
        self.shop.purchase_bonus.validate("shop.purchase_bonus")?;
        if self.pet.tick_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "pet.tick_interval_secs must be positive".into(),
            ));
        }
        if self.pet.starting_energy > crate::domain::pet::MAX_ENERGY {
            return Err(ConfigError::Invalid(
                "pet.starting_energy must be at most 100".into(),
            ));
        }
        let mut seen = HashSet::new();
        for product in &self.shop.catalog {
            if product.price <= Decimal::ZERO {
                return Err(ConfigError::Invalid(format!(
                    "product `{}` must have a positive price",
                    product.id
                )));
            }
            if !seen.insert(product.id.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate product id `{}`",
                    product.id
                )));
            }
        }
        Ok(())
    }
}

/// Loads and saves [`EngineConfig`] as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        let config_dir = base.join(CONFIG_DIR);
        fs::create_dir_all(&config_dir)?;
        Ok(Self::new(config_dir.join(CONFIG_FILE)))
    }

    /// Platform configuration directory, falling back to the working directory.
    pub fn default_location() -> PathBuf {
        dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(CONFIG_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns defaults when no file exists yet.
    pub fn load(&self) -> Result<EngineConfig, ConfigError> {
        let config = if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data)?
        } else {
            EngineConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &EngineConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_all(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_all(path: &Path, data: &str) -> Result<(), ConfigError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
