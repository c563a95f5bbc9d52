//! Dice rolling for checks and combat.
//!
//! Gameplay rolls are 2d6 sums, but both die faces are kept so the
//! presentation layer can show the individual dice. Rollers never fail:
//! the entropy-backed roller falls back to a fixed face when the OS
//! source errors.

use std::collections::VecDeque;

use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng, TryRngCore};
use serde::{Deserialize, Serialize};

/// The face reported when an entropy source fails or a script runs dry.
const FALLBACK_FACE: i32 = 1;

/// The result of one 2d6 roll, keeping both faces for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    /// The first die face (1-6).
    pub d1: i32,
    /// The second die face (1-6).
    pub d2: i32,
}

impl DiceRoll {
    /// Sum of the two faces (2-12).
    pub fn total(self) -> i32 {
        self.d1 + self.d2
    }
}

impl std::fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}] = {}", self.d1, self.d2, self.total())
    }
}

/// A source of single d6 values.
pub trait Roller {
    /// Roll one die, returning a face in 1-6.
    fn die(&mut self) -> i32;

    /// Roll 2d6: two independent faces.
    fn roll_2d6(&mut self) -> DiceRoll {
        DiceRoll {
            d1: self.die(),
            d2: self.die(),
        }
    }
}

/// A roller backed by the operating system's entropy source.
///
/// On source failure it returns [`FALLBACK_FACE`] instead of
/// propagating an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntropyRoller;

impl Roller for EntropyRoller {
    fn die(&mut self) -> i32 {
        match OsRng.try_next_u64() {
            Ok(n) => (n % 6) as i32 + 1,
            Err(_) => FALLBACK_FACE,
        }
    }
}

/// A deterministic roller seeded from a u64, for simulations and
/// reproducible play sessions.
#[derive(Debug, Clone)]
pub struct SeededRoller {
    rng: StdRng,
}

impl SeededRoller {
    /// Create a roller from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Roller for SeededRoller {
    fn die(&mut self) -> i32 {
        self.rng.random_range(1..=6)
    }
}

/// A roller that replays a fixed sequence of faces, for tests and demos.
///
/// Faces are clamped to 1-6; an exhausted script yields
/// [`FALLBACK_FACE`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedRoller {
    faces: VecDeque<i32>,
}

impl ScriptedRoller {
    /// Create a roller that yields the given faces in order.
    pub fn new(faces: impl IntoIterator<Item = i32>) -> Self {
        Self {
            faces: faces.into_iter().collect(),
        }
    }

    /// Number of faces left in the script.
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl Roller for ScriptedRoller {
    fn die(&mut self) -> i32 {
        self.faces
            .pop_front()
            .map_or(FALLBACK_FACE, |face| face.clamp(1, 6))
    }
}
