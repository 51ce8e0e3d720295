//! Injected randomness for seat colors and the opening turn.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use cots_rules::Color;

/// Source of the coin flips the engine makes: the host's color and which
/// side moves first.
pub trait ColorSource {
    /// Draws the next color.
    fn next_color(&mut self) -> Color;
}

/// Fair coin backed by a seedable RNG.
#[derive(Debug, Clone)]
pub struct RandomColors<R = StdRng> {
    rng: R,
}

impl RandomColors<StdRng> {
    /// Seeds from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic sequence for a given seed.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        debug!("Using seeded color source");
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomColors<R> {
    /// Wraps an existing RNG.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> ColorSource for RandomColors<R> {
    fn next_color(&mut self) -> Color {
        if self.rng.random_bool(0.5) {
            Color::White
        } else {
            Color::Black
        }
    }
}

/// Replays a fixed list of colors, then repeats the fallback.
///
/// Pins host colors and opening turns in tests.
#[derive(Debug, Clone)]
pub struct ScriptedColors {
    script: VecDeque<Color>,
    fallback: Color,
}

impl ScriptedColors {
    /// Plays `script` in order, then `Color::White` forever.
    pub fn new(script: impl IntoIterator<Item = Color>) -> Self {
        Self {
            script: script.into_iter().collect(),
            fallback: Color::White,
        }
    }

    /// Always draws `color`.
    pub fn always(color: Color) -> Self {
        Self {
            script: VecDeque::new(),
            fallback: color,
        }
    }
}

impl Default for ScriptedColors {
    fn default() -> Self {
        Self::always(Color::White)
    }
}

impl ColorSource for ScriptedColors {
    fn next_color(&mut self) -> Color {
        self.script.pop_front().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_sources_agree() {
        let mut a = RandomColors::seeded(7);
        let mut b = RandomColors::seeded(7);
        let first: Vec<_> = (0..32).map(|_| a.next_color()).collect();
        let second: Vec<_> = (0..32).map(|_| b.next_color()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_random_source_draws_both_colors() {
        let mut colors = RandomColors::seeded(42);
        let draws: Vec<_> = (0..256).map(|_| colors.next_color()).collect();
        assert!(draws.contains(&Color::White));
        assert!(draws.contains(&Color::Black));
    }

    #[test]
    fn test_scripted_then_fallback() {
        let mut colors = ScriptedColors::new([Color::Black, Color::White]);
        assert_eq!(colors.next_color(), Color::Black);
        assert_eq!(colors.next_color(), Color::White);
        assert_eq!(colors.next_color(), Color::White);

        let mut always = ScriptedColors::always(Color::Black);
        assert_eq!(always.next_color(), Color::Black);
        assert_eq!(always.next_color(), Color::Black);
    }
}
