//! Virtual pet state. Mood and appearance are derived from energy on read,
//! never stored.

use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::Displayable;

pub const MAX_ENERGY: u8 = 100;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mood {
    Asleep,
    VeryHungry,
    WantsFood,
    Neutral,
    Good,
    Excellent,
}

impl Mood {
    pub fn from_energy(energy: u8) -> Self {
        match energy {
            0 => Mood::Asleep,
            1..=20 => Mood::VeryHungry,
            21..=40 => Mood::WantsFood,
            41..=60 => Mood::Neutral,
            61..=80 => Mood::Good,
            _ => Mood::Excellent,
        }
    }

    pub fn appearance(self) -> Appearance {
        match self {
            Mood::Asleep => Appearance::Sleeping,
            Mood::VeryHungry => Appearance::Starving,
            Mood::WantsFood => Appearance::Hungry,
            Mood::Neutral => Appearance::Calm,
            Mood::Good => Appearance::Happy,
            Mood::Excellent => Appearance::Radiant,
        }
    }

    /// Tiers the presentation layer should warn about.
    pub fn is_alarming(self) -> bool {
        matches!(self, Mood::Asleep | Mood::VeryHungry)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Mood::Asleep => "asleep",
            Mood::VeryHungry => "very hungry",
            Mood::WantsFood => "wants food",
            Mood::Neutral => "neutral",
            Mood::Good => "good",
            Mood::Excellent => "excellent",
        };
        f.write_str(label)
    }
}

/// Symbolic look of the pet for each mood tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Appearance {
    Sleeping,
    Starving,
    Hungry,
    Calm,
    Happy,
    Radiant,
}

impl Appearance {
    pub fn symbol(self) -> &'static str {
        match self {
            Appearance::Sleeping => "😴",
            Appearance::Starving => "😫",
            Appearance::Hungry => "🙁",
            Appearance::Calm => "😐",
            Appearance::Happy => "🙂",
            Appearance::Radiant => "😄",
        }
    }
}

/// Notifications for the presentation layer. Hunger warnings fire once per
/// downward crossing into an alarming tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PetEvent {
    VeryHungry { energy: u8 },
    FellAsleep,
    WokeUp,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PetActionKind {
    Feed,
    Decay,
    Income,
    Expense,
}

/// One energy-changing event in the pet's recent history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PetAction {
    pub at: DateTime<Utc>,
    pub kind: PetActionKind,
    pub energy_before: u8,
    pub energy_after: u8,
}

impl PetAction {
    pub fn energy_change(&self) -> i16 {
        i16::from(self.energy_after) - i16::from(self.energy_before)
    }
}

/// Result of a single clamped energy adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnergyChange {
    pub before: u8,
    pub after: u8,
    pub warning: Option<PetEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PetState {
    pub name: String,
    energy: u8,
    pub seconds_without_food: u32,
    /// Elapsed seconds not yet consumed by a whole decay interval.
    #[serde(default)]
    pub pending_secs: u64,
    history: VecDeque<PetAction>,
    history_limit: usize,
}

impl PetState {
    pub fn new(name: impl Into<String>, energy: u8, history_limit: usize) -> Self {
        Self {
            name: name.into(),
            energy: energy.min(MAX_ENERGY),
            seconds_without_food: 0,
            pending_secs: 0,
            history: VecDeque::new(),
            history_limit,
        }
    }

    pub fn energy(&self) -> u8 {
        self.energy
    }

    pub fn mood(&self) -> Mood {
        Mood::from_energy(self.energy)
    }

    pub fn appearance(&self) -> Appearance {
        self.mood().appearance()
    }

    pub fn history(&self) -> impl Iterator<Item = &PetAction> {
        self.history.iter()
    }

    /// Applies `delta` clamped to `[0, MAX_ENERGY]`; records it if energy moved.
    pub fn adjust_energy(
        &mut self,
        delta: i32,
        kind: PetActionKind,
        at: DateTime<Utc>,
    ) -> EnergyChange {
        let before = self.energy;
        let after = (i32::from(before) + delta).clamp(0, i32::from(MAX_ENERGY)) as u8;
        self.energy = after;
        if after != before {
            self.record(PetAction {
                at,
                kind,
                energy_before: before,
                energy_after: after,
            });
        }
        EnergyChange {
            before,
            after,
            warning: crossing_warning(before, after),
        }
    }

    pub fn view(&self) -> PetView {
        let mood = self.mood();
        PetView {
            name: self.name.clone(),
            energy: self.energy,
            mood,
            appearance: mood.appearance(),
            seconds_without_food: self.seconds_without_food,
        }
    }

    fn record(&mut self, action: PetAction) {
        if self.history_limit == 0 {
            return;
        }
        while self.history.len() >= self.history_limit {
            self.history.pop_front();
        }
        self.history.push_back(action);
    }
}

fn crossing_warning(before: u8, after: u8) -> Option<PetEvent> {
    let old = Mood::from_energy(before);
    let new = Mood::from_energy(after);
    if after >= before || old == new || !new.is_alarming() {
        return None;
    }
    match new {
        Mood::Asleep => Some(PetEvent::FellAsleep),
        _ => Some(PetEvent::VeryHungry { energy: after }),
    }
}

/// Snapshot of the pet for rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PetView {
    pub name: String,
    pub energy: u8,
    pub mood: Mood,
    pub appearance: Appearance,
    pub seconds_without_food: u32,
}

impl Displayable for PetView {
    fn display_label(&self) -> String {
        format!(
            "{} {} {}/{} ({})",
            self.appearance.symbol(),
            self.name,
            self.energy,
            MAX_ENERGY,
            self.mood
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mood_breakpoints() {
        assert_eq!(Mood::from_energy(0), Mood::Asleep);
        assert_eq!(Mood::from_energy(1), Mood::VeryHungry);
        assert_eq!(Mood::from_energy(20), Mood::VeryHungry);
        assert_eq!(Mood::from_energy(21), Mood::WantsFood);
        assert_eq!(Mood::from_energy(40), Mood::WantsFood);
        assert_eq!(Mood::from_energy(41), Mood::Neutral);
        assert_eq!(Mood::from_energy(60), Mood::Neutral);
        assert_eq!(Mood::from_energy(61), Mood::Good);
        assert_eq!(Mood::from_energy(80), Mood::Good);
        assert_eq!(Mood::from_energy(81), Mood::Excellent);
        assert_eq!(Mood::from_energy(100), Mood::Excellent);
    }

    #[test]
    fn view_label_shows_symbol_and_energy() {
        let pet = PetState::new("Cashy", 80, 10);
        assert_eq!(pet.view().display_label(), "🙂 Cashy 80/100 (good)");
        let asleep = PetState::new("Cashy", 0, 10);
        assert!(asleep.view().display_label().starts_with("😴"));
    }

    #[test]
    fn adjust_energy_clamps_both_ends() {
        let mut pet = PetState::new("Cashy", 95, 10);
        let up = pet.adjust_energy(20, PetActionKind::Feed, Utc::now());
        assert_eq!(up.after, 100);
        let down = pet.adjust_energy(-250, PetActionKind::Decay, Utc::now());
        assert_eq!(down.after, 0);
        assert_eq!(down.warning, Some(PetEvent::FellAsleep));
    }

    #[test]
    fn warning_only_on_downward_crossing() {
        let mut pet = PetState::new("Cashy", 25, 10);
        let first = pet.adjust_energy(-5, PetActionKind::Decay, Utc::now());
        assert_eq!(first.warning, Some(PetEvent::VeryHungry { energy: 20 }));
        let second = pet.adjust_energy(-5, PetActionKind::Decay, Utc::now());
        assert_eq!(second.warning, None);
        let rising = pet.adjust_energy(3, PetActionKind::Income, Utc::now());
        assert_eq!(rising.warning, None);
    }

    #[test]
    fn history_is_bounded() {
        let mut pet = PetState::new("Cashy", 50, 3);
        for _ in 0..5 {
            pet.adjust_energy(-1, PetActionKind::Decay, Utc::now());
        }
        let kept: Vec<u8> = pet.history().map(|a| a.energy_after).collect();
        assert_eq!(kept, vec![47, 46, 45]);
        assert_eq!(pet.history().next().map(PetAction::energy_change), Some(-1));
    }
}
