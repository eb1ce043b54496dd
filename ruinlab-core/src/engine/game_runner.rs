//! Complete games: play to absorption (bounded by the round cap) or to a
//! fixed horizon.

use rand::Rng;

use crate::domain::{Capital, GameOutcome, GameParameters, GameState, Termination};
use crate::engine::walk::RandomWalkEngine;

/// Plays whole games for one parameter set.
///
/// Every call starts from a fresh `GameState`; the runner itself holds no
/// per-game state, so one runner can be shared across threads as long as each
/// thread brings its own generator.
#[derive(Debug, Clone)]
pub struct GameRunner {
    params: GameParameters,
    engine: RandomWalkEngine,
    record_history: bool,
}

/// Incremental capital / win-count trajectory.
struct History {
    capital: Vec<Capital>,
    wins: Vec<u64>,
    wins_so_far: u64,
}

impl History {
    fn start(state: &GameState) -> Self {
        Self {
            capital: vec![state.capital_a],
            wins: vec![0],
            wins_so_far: 0,
        }
    }

    fn record(&mut self, state: &GameState, a_won_round: bool) {
        if a_won_round {
            self.wins_so_far += 1;
        }
        self.capital.push(state.capital_a);
        self.wins.push(self.wins_so_far);
    }
}

impl GameRunner {
    pub fn new(params: GameParameters) -> Self {
        Self {
            engine: RandomWalkEngine::new(&params),
            params,
            record_history: false,
        }
    }

    /// Enable or disable capital / win-count history recording.
    pub fn with_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }

    pub fn params(&self) -> &GameParameters {
        &self.params
    }

    pub fn records_history(&self) -> bool {
        self.record_history
    }

    /// Play until one player is ruined or `max_rounds` is reached.
    ///
    /// A capped game reports `player_a_won = capital_a > 0` at the cap.
    pub fn run_to_absorption<R: Rng + ?Sized>(&self, rng: &mut R) -> GameOutcome {
        let max_rounds = self.params.max_rounds();
        let total = self.params.total_capital();
        let mut state = GameState::new(&self.params);
        let mut history = self.record_history.then(|| History::start(&state));

        let termination = loop {
            if let Some(t) = Termination::from_status(state.status(max_rounds)) {
                break t;
            }
            let a_won_round = self.engine.step(&mut state, rng);
            debug_assert_eq!(state.total_capital(), total, "capital must be conserved");
            if let Some(h) = history.as_mut() {
                h.record(&state, a_won_round);
            }
        };

        let (capital_history, wins_history) = match history {
            Some(h) => (Some(h.capital), Some(h.wins)),
            None => (None, None),
        };

        GameOutcome {
            player_a_won: state.capital_a > 0,
            rounds_played: state.round,
            termination,
            final_capital_a: state.capital_a,
            capital_history,
            wins_history,
        }
    }

    /// A's capital after `horizon` rounds, or at the round either player was
    /// ruined if that came first. `max_rounds` does not apply here.
    pub fn run_to_horizon<R: Rng + ?Sized>(&self, horizon: u64, rng: &mut R) -> Capital {
        let mut state = GameState::new(&self.params);
        while state.round < horizon && !state.is_absorbed() {
            self.engine.step(&mut state, rng);
        }
        state.capital_a
    }
}
