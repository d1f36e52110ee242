//! Ambient flame texture.
//!
//! Every call regenerates the whole matrix: each column gets a fresh random
//! base heat at the bottom row, and every row above it is cooled by a random
//! amount. Nothing is carried over between frames.

use crate::colors::heat_color;
use crate::frame::{Frame, MATRIX_HEIGHT, MATRIX_WIDTH};
use oorandom::Rand32;

/// Frame generator for the ember phase.
pub struct EmberAnimation {
    rng: Rand32,
    max_cooldown: u8,
}

impl EmberAnimation {
    /// Creates a flame generator. Cooldowns are drawn from `0..max_cooldown`.
    pub fn new(seed: u64, max_cooldown: u8) -> Self {
        Self {
            rng: Rand32::new(seed),
            max_cooldown,
        }
    }

    /// Returns the upper bound of the per-row cooldown.
    pub fn max_cooldown(&self) -> u8 {
        self.max_cooldown
    }

    /// Fills `frame` with a new flame texture.
    pub fn advance(&mut self, frame: &mut Frame) {
        for x in 0..MATRIX_WIDTH {
            let mut heat = self.rng.rand_range(0..256) as u8;
            for row in 0..MATRIX_HEIGHT {
                frame.set(x, MATRIX_HEIGHT - 1 - row, heat_color(heat));
                heat = heat.saturating_sub(self.cooldown());
            }
        }
    }

    fn cooldown(&mut self) -> u8 {
        if self.max_cooldown == 0 {
            return 0;
        }
        self.rng.rand_range(0..self.max_cooldown as u32) as u8
    }
}
