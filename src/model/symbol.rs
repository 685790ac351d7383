use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The fixed symbol palette every game draws from. Rounds use a random
/// subset sized to the difficulty, so two sessions rarely look alike.
pub const SYMBOL_PALETTE: [char; 24] = [
    '🍎', '🍌', '🍇', '🍒', '🍋', '🥝', '🍑', '🍍', '🌸', '🌻', '🍀', '🌙', '⭐', '🔥', '💧',
    '⚡', '🎈', '🎲', '🎯', '🎁', '🚀', '🛸', '⚓', '🔔',
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Symbol(pub char);

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Symbol {
    /// Draw `count` distinct symbols from the palette.
    pub fn draw(rng: &mut StdRng, count: usize) -> Vec<Symbol> {
        let mut palette: Vec<char> = SYMBOL_PALETTE.to_vec();
        palette.shuffle(rng);
        palette.truncate(count.min(palette.len()));
        palette.into_iter().map(Symbol).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_draw_yields_distinct_symbols() {
        let mut rng = StdRng::seed_from_u64(7);
        let drawn = Symbol::draw(&mut rng, 10);
        assert_eq!(drawn.len(), 10);
        for (i, a) in drawn.iter().enumerate() {
            for b in drawn.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_draw_is_capped_at_palette_size() {
        let mut rng = StdRng::seed_from_u64(7);
        let drawn = Symbol::draw(&mut rng, 99);
        assert_eq!(drawn.len(), SYMBOL_PALETTE.len());
    }
}
