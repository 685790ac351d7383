use std::cell::RefCell;
use std::rc::Rc;
use std::time::SystemTime;

use log::trace;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use uuid::Uuid;

use super::round_clock::{ClockTick, RoundClock};
use super::variants::{self, GameVariant, Judgment, Penalty, WonRound};
use crate::destroyable::Destroyable;
use crate::events::{EventEmitter, EventHandler, EventObserver, Unsubscriber};
use crate::model::{
    BoardView, Difficulty, GameMode, GameOutcome, GameType, PlayerInput, RoundCommand, RoundEvent,
    RoundPhase, TimerState,
};

/// Feedback pause between a judged answer and the next unit of work.
const RESOLVE_DELAY_TICKS: u32 = 1;
/// Life pool for Infinite mode.
const MAX_LIVES: u8 = 3;

/// What to do once a Resolving delay elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AfterResolve {
    BackToActive,
    NextRound,
}

/// The shared round state machine. One engine serves all four mini-games;
/// the active `GameVariant` supplies board content, judging and win rules,
/// while the engine owns phase, score, lives, clocks and the outcome.
pub struct RoundEngine {
    variant: Option<Box<dyn GameVariant>>,
    game_type: Option<GameType>,
    mode: GameMode,
    difficulty: Difficulty,
    phase: RoundPhase,
    score: i32,
    lives: u8,
    round_index: u32,
    hits: u32,
    faults: u32,
    reveal_clock: RoundClock,
    session_clock: RoundClock,
    pending_resolve: Option<AfterResolve>,
    /// Bumped on every session teardown; pending resolve callbacks from a
    /// previous generation compare-and-bail.
    generation: u64,
    session_id: Uuid,
    timer_state: TimerState,
    is_paused: bool,
    rng: StdRng,
    last_outcome: Option<GameOutcome>,
    command_subscription: Option<Unsubscriber<RoundCommand>>,
    event_emitter: EventEmitter<RoundEvent>,
}

impl Destroyable for RoundEngine {
    fn destroy(&mut self) {
        if let Some(subscription) = self.command_subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl EventHandler<RoundCommand> for RoundEngine {
    fn handle_event(&mut self, command: &RoundCommand) {
        self.handle_command(command);
    }
}

impl RoundEngine {
    pub fn new(
        command_observer: EventObserver<RoundCommand>,
        event_emitter: EventEmitter<RoundEvent>,
    ) -> Rc<RefCell<Self>> {
        let engine = Self {
            variant: None,
            game_type: None,
            mode: GameMode::default(),
            difficulty: Difficulty::default(),
            phase: RoundPhase::Setup,
            score: 0,
            lives: 0,
            round_index: 0,
            hits: 0,
            faults: 0,
            reveal_clock: RoundClock::new(),
            session_clock: RoundClock::new(),
            pending_resolve: None,
            generation: 0,
            session_id: Uuid::new_v4(),
            timer_state: TimerState::started(SystemTime::now()),
            is_paused: false,
            rng: StdRng::seed_from_u64(0),
            last_outcome: None,
            command_subscription: None,
            event_emitter,
        };
        let refcell = Rc::new(RefCell::new(engine));
        RoundEngine::wire_subscription(refcell.clone(), command_observer);
        refcell
    }

    fn wire_subscription(
        engine: Rc<RefCell<Self>>,
        command_observer: EventObserver<RoundCommand>,
    ) {
        let handler = engine.clone();
        let subscription = command_observer.subscribe(move |command| {
            handler.borrow_mut().handle_event(command);
        });
        engine.borrow_mut().command_subscription = Some(subscription);
    }

    pub fn handle_command(&mut self, command: &RoundCommand) {
        trace!(target: "round_engine", "Handling command: {:?}", command);
        match command {
            RoundCommand::NewSession {
                game_type,
                mode,
                difficulty,
                seed,
            } => {
                self.generation += 1;
                self.game_type = Some(*game_type);
                self.mode = *mode;
                self.difficulty = *difficulty;
                let seed = seed.unwrap_or_else(|| rand::rng().next_u64());
                self.rng = StdRng::seed_from_u64(seed);
                self.start_session();
            }
            RoundCommand::Input(input) => self.handle_input(*input),
            RoundCommand::Tick => self.handle_tick(),
            RoundCommand::ResolveFired { generation } => self.handle_resolve_fired(*generation),
            RoundCommand::Pause => self.pause(),
            RoundCommand::Resume => self.resume(),
            RoundCommand::PlayAgain => self.play_again(),
            RoundCommand::Quit => self.quit(),
        }
    }

    fn start_session(&mut self) {
        let Some(game_type) = self.game_type else {
            return;
        };
        let mut variant = variants::build(game_type, self.difficulty);
        variant.begin_round(&mut self.rng);
        self.variant = Some(variant);

        self.score = 0;
        self.hits = 0;
        self.faults = 0;
        self.round_index = 1;
        self.is_paused = false;
        self.session_id = Uuid::new_v4();
        self.last_outcome = None;
        self.timer_state = TimerState::started(SystemTime::now());
        self.lives = match self.mode {
            GameMode::Infinite => MAX_LIVES,
            GameMode::Timed => 0,
        };
        match self.mode {
            GameMode::Timed => self.session_clock.start(self.difficulty.time_budget()),
            GameMode::Infinite => self.session_clock.cancel(),
        }

        self.event_emitter.emit(&RoundEvent::ScoreChanged(self.score));
        self.event_emitter.emit(&RoundEvent::LivesChanged(self.lives));
        if let Some(budget) = self.session_clock.remaining() {
            self.event_emitter
                .emit(&RoundEvent::TimeRemainingChanged(budget));
        }
        self.event_emitter
            .emit(&RoundEvent::TimerStateChanged(self.timer_state.clone()));
        self.event_emitter
            .emit(&RoundEvent::RoundAdvanced(self.round_index));
        self.enter_round_start();
    }

    fn enter_round_start(&mut self) {
        let Some(variant) = self.variant.as_ref() else {
            return;
        };
        let reveal_ticks = variant.reveal_ticks();
        if reveal_ticks > 0 {
            self.reveal_clock.start(reveal_ticks);
            self.set_phase(RoundPhase::Reveal);
        } else {
            self.reveal_clock.cancel();
            self.set_phase(RoundPhase::Active);
        }
        self.emit_board();
    }

    fn handle_input(&mut self, input: PlayerInput) {
        if self.is_paused || !self.phase.accepts_input() {
            // Double-submissions during the Resolving delay and taps in the
            // wrong phase are silent no-ops.
            trace!(target: "round_engine", "Ignoring input outside Active phase: {:?}", input);
            return;
        }
        let Some(variant) = self.variant.as_mut() else {
            return;
        };

        let judgment = variant.judge(input, self.mode);
        trace!(target: "round_engine", "Judged {:?} as {:?}", input, judgment);
        match judgment {
            Judgment::Ignored => {}
            Judgment::Accepted => self.emit_board(),
            Judgment::Neutral => {
                self.emit_board();
                self.enter_resolving(AfterResolve::BackToActive);
            }
            Judgment::Correct {
                reward,
                round_won,
                pause,
            } => {
                self.hits += 1;
                if reward != 0 {
                    self.score += reward;
                    self.event_emitter.emit(&RoundEvent::ScoreChanged(self.score));
                }
                self.emit_board();
                if round_won {
                    match self.variant.as_ref().map(|v| v.on_round_won(self.mode)) {
                        Some(WonRound::FinishSession) => self.finish(),
                        Some(WonRound::Continue) => self.enter_resolving(AfterResolve::NextRound),
                        None => {}
                    }
                } else if pause {
                    self.enter_resolving(AfterResolve::BackToActive);
                }
            }
            Judgment::Incorrect { penalty, pause } => {
                self.faults += 1;
                self.emit_board();
                match penalty {
                    Penalty::None => {}
                    Penalty::Score(deduction) => {
                        self.score -= deduction;
                        self.event_emitter.emit(&RoundEvent::ScoreChanged(self.score));
                    }
                    Penalty::Life => {
                        self.lives = self.lives.saturating_sub(1);
                        self.event_emitter.emit(&RoundEvent::LivesChanged(self.lives));
                        if self.lives == 0 {
                            self.finish();
                            return;
                        }
                    }
                    Penalty::EndSession => {
                        self.finish();
                        return;
                    }
                }
                if pause {
                    self.enter_resolving(AfterResolve::BackToActive);
                }
            }
        }
    }

    fn handle_tick(&mut self) {
        if self.is_paused || self.variant.is_none() {
            return;
        }
        match self.phase {
            RoundPhase::Reveal => {
                if self.reveal_clock.tick() == ClockTick::Expired {
                    self.set_phase(RoundPhase::Active);
                    self.emit_board();
                }
            }
            // The session budget runs while the player answers and while
            // feedback resolves; memorize time is free.
            RoundPhase::Active | RoundPhase::Resolving => match self.session_clock.tick() {
                ClockTick::Ticked(remaining) => {
                    self.event_emitter
                        .emit(&RoundEvent::TimeRemainingChanged(remaining));
                }
                ClockTick::Expired => {
                    self.event_emitter.emit(&RoundEvent::TimeRemainingChanged(0));
                    self.finish();
                }
                ClockTick::Idle => {}
            },
            RoundPhase::Setup | RoundPhase::Finished => {}
        }
    }

    fn enter_resolving(&mut self, then: AfterResolve) {
        self.pending_resolve = Some(then);
        self.set_phase(RoundPhase::Resolving);
        self.event_emitter.emit(&RoundEvent::ResolveScheduled {
            generation: self.generation,
            delay_ticks: RESOLVE_DELAY_TICKS,
        });
    }

    fn handle_resolve_fired(&mut self, generation: u64) {
        if generation != self.generation {
            // A callback outliving its session; the session it belonged to
            // is gone, so it must not touch anything.
            trace!(
                target: "round_engine",
                "Dropping stale resolve callback (generation {} != {})",
                generation,
                self.generation
            );
            return;
        }
        if self.phase != RoundPhase::Resolving {
            return;
        }
        let Some(then) = self.pending_resolve.take() else {
            return;
        };
        if let Some(variant) = self.variant.as_mut() {
            variant.after_resolve(&mut self.rng);
        }
        match then {
            AfterResolve::BackToActive => {
                self.set_phase(RoundPhase::Active);
                self.emit_board();
            }
            AfterResolve::NextRound => self.next_round(),
        }
    }

    fn next_round(&mut self) {
        self.round_index += 1;
        self.event_emitter
            .emit(&RoundEvent::RoundAdvanced(self.round_index));
        if let Some(variant) = self.variant.as_mut() {
            variant.begin_round(&mut self.rng);
        }
        self.enter_round_start();
    }

    fn finish(&mut self) {
        if self.phase == RoundPhase::Finished {
            return;
        }
        let Some(variant) = self.variant.as_ref() else {
            return;
        };
        self.reveal_clock.cancel();
        self.session_clock.cancel();
        self.pending_resolve = None;

        let now = SystemTime::now();
        self.timer_state = self.timer_state.ended(now);
        self.event_emitter
            .emit(&RoundEvent::TimerStateChanged(self.timer_state.clone()));

        let outcome = GameOutcome::new(
            variant.game_type(),
            self.mode,
            self.score,
            self.timer_state.elapsed_at(now),
            variant.extra_stat(),
            self.hits,
            self.faults,
            self.session_id,
        );
        self.last_outcome = Some(outcome.clone());
        self.set_phase(RoundPhase::Finished);
        self.event_emitter.emit(&RoundEvent::SessionFinished(outcome));
    }

    fn pause(&mut self) {
        if !self.is_paused && self.variant.is_some() && !self.phase.is_terminal() {
            self.is_paused = true;
            self.timer_state = self.timer_state.paused(SystemTime::now());
            self.event_emitter
                .emit(&RoundEvent::TimerStateChanged(self.timer_state.clone()));
        }
    }

    fn resume(&mut self) {
        if self.is_paused {
            self.is_paused = false;
            self.timer_state = self.timer_state.resumed(SystemTime::now());
            self.event_emitter
                .emit(&RoundEvent::TimerStateChanged(self.timer_state.clone()));
        }
    }

    fn play_again(&mut self) {
        if self.phase != RoundPhase::Finished || self.game_type.is_none() {
            return;
        }
        // Same game, same table, fresh counters; the RNG stream continues.
        self.generation += 1;
        self.start_session();
    }

    fn quit(&mut self) {
        self.generation += 1;
        self.variant = None;
        self.pending_resolve = None;
        self.reveal_clock.cancel();
        self.session_clock.cancel();
        self.is_paused = false;
        self.last_outcome = None;
        self.set_phase(RoundPhase::Setup);
    }

    fn set_phase(&mut self, phase: RoundPhase) {
        if self.phase != phase {
            self.phase = phase;
            self.event_emitter.emit(&RoundEvent::PhaseChanged(phase));
        }
    }

    fn emit_board(&self) {
        if let Some(variant) = self.variant.as_ref() {
            self.event_emitter
                .emit(&RoundEvent::BoardUpdated(variant.board_view(self.phase)));
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn round_index(&self) -> u32 {
        self.round_index
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn time_remaining(&self) -> Option<u32> {
        self.session_clock.remaining()
    }

    pub fn board_view(&self) -> Option<BoardView> {
        self.variant
            .as_ref()
            .map(|variant| variant.board_view(self.phase))
    }

    pub fn last_outcome(&self) -> Option<&GameOutcome> {
        self.last_outcome.as_ref()
    }
}
