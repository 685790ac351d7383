use serde::{Deserialize, Serialize};

use super::Symbol;

/// One card slot in a match-pairs board as the player sees it: `None` while
/// face down, the symbol while face up or matched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardView {
    pub symbol: Option<Symbol>,
    pub matched: bool,
}

/// Presentation snapshot of the active round, emitted after every change.
/// Hidden answers only appear in the phases that are allowed to show them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum BoardView {
    MatchPairs {
        cards: Vec<CardView>,
    },
    RecallSequence {
        /// The sequence to memorize; empty outside the Reveal phase.
        revealed: Vec<Symbol>,
        /// Answer choices, stable for the whole session.
        palette: Vec<Symbol>,
        entered: usize,
        sequence_len: usize,
    },
    CardLocator {
        card_count: usize,
        /// Target indices; populated only during Reveal.
        revealed_targets: Vec<usize>,
        found: Vec<usize>,
    },
    SpeedMatch {
        shown: Symbol,
        previous: Option<Symbol>,
    },
}
