//! Game mode state machine
//!
//! One deterministic FSM over `GameMode`, driven by UI events and
//! simulation outcomes. The transition table is a pure function; the
//! `GameState` wrapper performs the side effects a transition demands
//! (round reset, score submission) and reports what the caller must do
//! (persist, terminate).

use rand::Rng;

use super::state::{GameMode, GameState};
use crate::highscores::ScoreEntry;

/// Events that can drive a mode transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEvent {
    /// Menu "Start" activation
    StartPressed,
    /// Menu "Quit" activation
    QuitPressed,
    /// Pause key edge
    PauseToggled,
    /// Pause screen "Menu" activation
    ReturnToMenu,
    /// Health reached zero this tick
    PlayerDied,
    /// Game-over display delay ran out
    GameOverElapsed,
    /// Enter pressed on the name-entry screen
    NameConfirmed,
    /// Window close signal; honored in any state
    CloseRequested,
}

/// Side effect the caller must carry out after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeAction {
    None,
    /// Reset session and dynamic entities before entering Playing
    ResetRound,
    /// Stop the outer loop
    Terminate,
    /// Append the finished session's score to the high-score store
    SubmitScore,
}

/// The transition table. Returns `None` when the event does not apply in
/// the given mode (ignored, not an error).
pub fn transition(
    mode: GameMode,
    event: ModeEvent,
    name_is_empty: bool,
) -> Option<(GameMode, ModeAction)> {
    use GameMode::*;
    use ModeEvent::*;

    match (mode, event) {
        (_, CloseRequested) => Some((mode, ModeAction::Terminate)),
        (Menu, StartPressed) => Some((Playing, ModeAction::ResetRound)),
        (Menu, QuitPressed) => Some((Menu, ModeAction::Terminate)),
        (Playing, PauseToggled) => Some((Paused, ModeAction::None)),
        (Paused, PauseToggled) => Some((Playing, ModeAction::None)),
        (Paused, ReturnToMenu) => Some((Menu, ModeAction::None)),
        (Playing, PlayerDied) => Some((GameOver, ModeAction::None)),
        (GameOver, GameOverElapsed) => Some((EnterName, ModeAction::None)),
        (EnterName, NameConfirmed) if !name_is_empty => Some((Menu, ModeAction::SubmitScore)),
        _ => None,
    }
}

/// What the outer loop must do after an event was applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// Keep looping
    Continue,
    /// Stop the outer loop
    Terminate,
    /// Persist this entry to the high-score store
    Submit(ScoreEntry),
}

impl GameState {
    /// Apply a mode event, performing any internal side effects
    pub fn handle_event(&mut self, event: ModeEvent) -> EventOutcome {
        let Some((next, action)) = transition(self.mode, event, self.session.name_is_empty())
        else {
            return EventOutcome::Continue;
        };

        let outcome = match action {
            ModeAction::None => EventOutcome::Continue,
            ModeAction::Terminate => EventOutcome::Terminate,
            ModeAction::ResetRound => {
                // Chain the next round's seed off the current RNG so a full
                // session stays reproducible from the initial seed
                let seed = self.rng.random();
                self.reset_round(seed);
                EventOutcome::Continue
            }
            ModeAction::SubmitScore => {
                let entry = ScoreEntry {
                    name: self.session.player_name.clone(),
                    score: self.session.score,
                };
                self.session.reset();
                EventOutcome::Submit(entry)
            }
        };

        self.mode = next;
        outcome
    }

    /// Advance the game-over banner timer; transitions to name entry once
    /// the configured delay has elapsed. Input is not read in this mode.
    pub fn advance_game_over(&mut self, dt_ms: f32) {
        if self.mode != GameMode::GameOver {
            return;
        }
        self.game_over_ms += dt_ms;
        if self.game_over_ms >= self.config.game_over_delay_ms {
            self.handle_event(ModeEvent::GameOverElapsed);
        }
    }
}
