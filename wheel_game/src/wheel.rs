//! Wheel collaborators that pick the sector a spin lands on.

use enum_dispatch::enum_dispatch;
use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};
use std::collections::VecDeque;

use crate::game::entities::WheelSector;

/// Chooses one sector per spin.
#[enum_dispatch]
pub trait Wheel {
    /// `None` when no sector can be produced.
    fn pick(&mut self, sectors: &[WheelSector]) -> Option<WheelSector>;
}

/// Uniform choice over the configured sectors
#[derive(Debug)]
pub struct RandomWheel {
    rng: StdRng,
}

impl Default for RandomWheel {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomWheel {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible sequence of picks
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Wheel for RandomWheel {
    fn pick(&mut self, sectors: &[WheelSector]) -> Option<WheelSector> {
        sectors.choose(&mut self.rng).cloned()
    }
}

/// Replays a fixed list of outcomes, ignoring the configured sectors.
#[derive(Debug, Default)]
pub struct ScriptedWheel {
    outcomes: VecDeque<WheelSector>,
}

impl ScriptedWheel {
    #[must_use]
    pub fn new(outcomes: impl IntoIterator<Item = WheelSector>) -> Self {
        Self {
            outcomes: outcomes.into_iter().collect(),
        }
    }

    pub fn push(&mut self, sector: WheelSector) {
        self.outcomes.push_back(sector);
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.outcomes.len()
    }
}

impl Wheel for ScriptedWheel {
    fn pick(&mut self, _sectors: &[WheelSector]) -> Option<WheelSector> {
        self.outcomes.pop_front()
    }
}

#[enum_dispatch(Wheel)]
#[derive(Debug)]
pub enum WheelKind {
    RandomWheel,
    ScriptedWheel,
}
