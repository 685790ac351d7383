mod achievement;
mod board_view;
mod difficulty;
mod game_mode;
mod game_outcome;
mod game_type;
mod palace;
mod round_command;
mod round_event;
mod round_phase;
mod statistics;
mod symbol;
mod timer_state;
mod trophy_event;

pub use achievement::{Achievement, AchievementKind, RewardGroup, UnlockError};
pub use board_view::{BoardView, CardView};
pub use difficulty::Difficulty;
pub use game_mode::GameMode;
pub use game_outcome::GameOutcome;
pub use game_type::GameType;
pub use palace::{Locus, MemoryPalace};
pub use round_command::{PlayerInput, RoundCommand};
pub use round_event::RoundEvent;
pub use round_phase::RoundPhase;
pub use statistics::{AppliedDeltas, GameTypeStatistic, GlobalStatistic};
pub use symbol::{Symbol, SYMBOL_PALETTE};
pub use timer_state::TimerState;
pub use trophy_event::TrophyEvent;
