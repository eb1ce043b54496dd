//! Property tests for engine and formula invariants.
//!
//! Uses proptest to verify:
//! 1. Conservation — `capital_a + capital_b` never changes
//! 2. Termination — games stop within the cap, in a terminal state
//! 3. History shape — trajectories are consistent step by step
//! 4. Formula bounds — ruin probability in [0, 1], duration finite and >= 0
//! 5. Monotonicity — ruin probability decreases as `p_a` grows

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ruinlab_core::theory::{expected_rounds, ruin_probability};
use ruinlab_core::{GameParameters, GameRunner, GameState, RandomWalkEngine, Termination};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_capital() -> impl Strategy<Value = i64> {
    1i64..60
}

fn arb_probability() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(0.0),
        Just(0.5),
        Just(1.0),
        (0.0..=1.0_f64),
    ]
}

// ── 1. Conservation ──────────────────────────────────────────────────

proptest! {
    /// Every round transfers exactly one unit between the players.
    #[test]
    fn total_capital_conserved_every_round(
        a in arb_capital(),
        b in arb_capital(),
        p in arb_probability(),
        seed in any::<u64>(),
    ) {
        let params = GameParameters::new(a, b, p, 10_000).unwrap();
        let engine = RandomWalkEngine::new(&params);
        let mut state = GameState::new(&params);
        let mut rng = StdRng::seed_from_u64(seed);

        while !state.is_absorbed() && state.round < params.max_rounds() {
            let before = state.capital_a;
            engine.step(&mut state, &mut rng);
            prop_assert_eq!(state.capital_a + state.capital_b, a + b);
            prop_assert_eq!((state.capital_a - before).abs(), 1);
        }
    }
}

// ── 2. Termination ───────────────────────────────────────────────────

proptest! {
    /// Games stop at a boundary or at the cap, never past either.
    #[test]
    fn games_terminate_within_cap(
        a in arb_capital(),
        b in arb_capital(),
        p in arb_probability(),
        cap in 1u64..5_000,
        seed in any::<u64>(),
    ) {
        let params = GameParameters::new(a, b, p, cap).unwrap();
        let outcome = GameRunner::new(params).run_to_absorption(&mut StdRng::seed_from_u64(seed));

        prop_assert!(outcome.rounds_played <= cap);
        prop_assert_eq!(outcome.player_a_won, outcome.final_capital_a > 0);
        match outcome.termination {
            Termination::RuinedA => prop_assert_eq!(outcome.final_capital_a, 0),
            Termination::RuinedB => prop_assert_eq!(outcome.final_capital_a, a + b),
            Termination::Capped => {
                prop_assert_eq!(outcome.rounds_played, cap);
                prop_assert!(outcome.final_capital_a > 0 && outcome.final_capital_a < a + b);
            }
        }
    }

    /// A game can only end on a boundary after at least min(a, b) rounds.
    #[test]
    fn absorption_needs_at_least_the_smaller_capital(
        a in arb_capital(),
        b in arb_capital(),
        p in arb_probability(),
        seed in any::<u64>(),
    ) {
        let params = GameParameters::new(a, b, p, 100_000).unwrap();
        let outcome = GameRunner::new(params).run_to_absorption(&mut StdRng::seed_from_u64(seed));
        if outcome.termination.is_absorbed() {
            prop_assert!(outcome.rounds_played >= a.min(b) as u64);
        }
    }
}

// ── 3. History shape ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn histories_are_consistent(
        a in arb_capital(),
        b in arb_capital(),
        p in arb_probability(),
        seed in any::<u64>(),
    ) {
        let params = GameParameters::new(a, b, p, 20_000).unwrap();
        let outcome = GameRunner::new(params)
            .with_history(true)
            .run_to_absorption(&mut StdRng::seed_from_u64(seed));

        let capital = outcome.capital_history.as_ref().unwrap();
        let wins = outcome.wins_history.as_ref().unwrap();
        let n = outcome.rounds_played as usize;

        prop_assert_eq!(capital.len(), n + 1);
        prop_assert_eq!(wins.len(), n + 1);
        prop_assert_eq!(capital[0], a);
        prop_assert_eq!(wins[0], 0);
        for i in 1..=n {
            prop_assert!(wins[i] == wins[i - 1] || wins[i] == wins[i - 1] + 1);
            prop_assert_eq!(capital[i], a + 2 * wins[i] as i64 - i as i64);
        }
    }

    /// Horizon samples are reachable capitals for the given number of rounds.
    #[test]
    fn horizon_capital_is_reachable(
        a in arb_capital(),
        b in arb_capital(),
        p in arb_probability(),
        horizon in 0u64..200,
        seed in any::<u64>(),
    ) {
        let params = GameParameters::new(a, b, p, 1).unwrap();
        let k = GameRunner::new(params).run_to_horizon(horizon, &mut StdRng::seed_from_u64(seed));
        let h = horizon as i64;

        prop_assert!(k >= (a - h).max(0));
        prop_assert!(k <= (a + h).min(a + b));
        let absorbed = k == 0 || k == a + b;
        if !absorbed {
            prop_assert_eq!((k - a - h).rem_euclid(2), 0);
        }
    }
}

// ── 4. Formula bounds ────────────────────────────────────────────────

proptest! {
    #[test]
    fn ruin_probability_in_unit_interval(
        a in 1i64..100_000,
        b in 1i64..100_000,
        p in arb_probability(),
    ) {
        let v = ruin_probability(a, b, p).unwrap();
        prop_assert!((0.0..=1.0).contains(&v), "a={} b={} p={} gave {}", a, b, p, v);
    }

    #[test]
    fn expected_rounds_finite_and_non_negative(
        a in 1i64..10_000,
        b in 1i64..10_000,
        p in arb_probability(),
    ) {
        let e = expected_rounds(a, b, p).unwrap();
        prop_assert!(e.is_finite());
        prop_assert!(e >= 0.0);
    }

    #[test]
    fn fair_game_ruin_is_capital_share(a in 1i64..100_000, b in 1i64..100_000) {
        let v = ruin_probability(a, b, 0.5).unwrap();
        prop_assert!((v - b as f64 / (a + b) as f64).abs() < 1e-9);
    }
}

// ── 5. Monotonicity ──────────────────────────────────────────────────

proptest! {
    /// For moderate capitals the probability is strictly decreasing in p_a.
    #[test]
    fn ruin_probability_strictly_decreasing_in_p(
        a in 1i64..8,
        b in 1i64..8,
        p in 0.05..0.94_f64,
        dp in 0.01..0.05_f64,
    ) {
        let lower = ruin_probability(a, b, p).unwrap();
        let higher = ruin_probability(a, b, p + dp).unwrap();
        prop_assert!(higher < lower, "P({}) = {} not < P({}) = {}", p + dp, higher, p, lower);
    }
}
