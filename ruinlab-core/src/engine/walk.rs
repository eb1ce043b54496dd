//! Single-round Bernoulli step.

use rand::Rng;

use crate::domain::{GameParameters, GameState};

/// Advances a `GameState` by exactly one round.
///
/// `p_a` of 0 or 1 is a legal, deterministic walk: the comparison `u < p_a`
/// with `u ∈ [0, 1)` is never true for 0 and always true for 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomWalkEngine {
    p_a: f64,
}

impl RandomWalkEngine {
    pub fn new(params: &GameParameters) -> Self {
        Self { p_a: params.p_a() }
    }

    pub fn p_a(&self) -> f64 {
        self.p_a
    }

    /// Draw one uniform value and transfer one unit toward the round winner.
    ///
    /// Returns `true` if A won the round. Termination is the caller's concern.
    #[inline]
    pub fn step<R: Rng + ?Sized>(&self, state: &mut GameState, rng: &mut R) -> bool {
        let u: f64 = rng.gen();
        let a_wins = u < self.p_a;
        if a_wins {
            state.capital_a += 1;
            state.capital_b -= 1;
        } else {
            state.capital_a -= 1;
            state.capital_b += 1;
        }
        state.round += 1;
        a_wins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state_for(params: &GameParameters) -> GameState {
        GameState::new(params)
    }

    #[test]
    fn zero_draw_is_a_win_for_any_positive_probability() {
        let params = GameParameters::new(5, 5, 0.2, 100).unwrap();
        let engine = RandomWalkEngine::new(&params);
        let mut state = state_for(&params);
        let mut rng = StepRng::new(0, 0);

        assert!(engine.step(&mut state, &mut rng));
        assert_eq!(state.capital_a, 6);
        assert_eq!(state.capital_b, 4);
        assert_eq!(state.round, 1);
    }

    #[test]
    fn p_zero_always_loses() {
        let params = GameParameters::new(5, 5, 0.0, 100).unwrap();
        let engine = RandomWalkEngine::new(&params);
        let mut state = state_for(&params);
        let mut rng = StepRng::new(0, 0);

        for _ in 0..3 {
            assert!(!engine.step(&mut state, &mut rng));
        }
        assert_eq!(state.capital_a, 2);
        assert_eq!(state.capital_b, 8);
        assert_eq!(state.round, 3);
    }

    #[test]
    fn p_one_always_wins_even_on_largest_draw() {
        let params = GameParameters::new(5, 5, 1.0, 100).unwrap();
        let engine = RandomWalkEngine::new(&params);
        let mut state = state_for(&params);
        // u64::MAX maps to the largest f64 strictly below 1.0
        let mut rng = StepRng::new(u64::MAX, 0);

        assert!(engine.step(&mut state, &mut rng));
        assert_eq!(state.capital_a, 6);
    }

    #[test]
    fn step_does_not_stop_at_boundary() {
        let params = GameParameters::new(1, 1, 0.0, 100).unwrap();
        let engine = RandomWalkEngine::new(&params);
        let mut state = state_for(&params);
        let mut rng = StepRng::new(0, 0);

        engine.step(&mut state, &mut rng);
        engine.step(&mut state, &mut rng);
        assert_eq!(state.capital_a, -1);
        assert_eq!(state.capital_b, 3);
    }

    #[test]
    fn total_capital_conserved_over_many_steps() {
        let params = GameParameters::new(7, 13, 0.37, 100).unwrap();
        let engine = RandomWalkEngine::new(&params);
        let mut state = state_for(&params);
        let mut rng = StdRng::seed_from_u64(9);

        for _ in 0..1_000 {
            engine.step(&mut state, &mut rng);
            assert_eq!(state.total_capital(), 20);
        }
        assert_eq!(state.round, 1_000);
    }
}
