//! Property-based tests for the engine's invariants.
//!
//! Uses proptest to check that the invariants hold for arbitrary grids,
//! kernels and rules rather than a handful of hand-picked cases.

use gridlife_core::boundary::BoundaryMode;
use gridlife_core::engine::SimulationEngine;
use gridlife_core::grid::{Grid, ALIVE, DEAD};
use gridlife_core::kernel::{build_kernel, Kernel};
use gridlife_core::neighbors::count_neighbors;
use gridlife_core::persistence::{load_grid, save_grid};
use gridlife_core::rules::{CountSet, ProbabilityParams, ProbabilityRule, Rule, ThresholdRule};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn arb_grid() -> impl Strategy<Value = Grid> {
    (1usize..24, 1usize..24).prop_flat_map(|(w, h)| {
        prop::collection::vec(prop::bool::ANY, w * h).prop_map(move |bits| {
            let cells = bits.into_iter().map(|b| if b { ALIVE } else { DEAD }).collect();
            Grid::from_cells(w, h, cells).unwrap()
        })
    })
}

fn arb_boundary() -> impl Strategy<Value = BoundaryMode> {
    prop_oneof![Just(BoundaryMode::Wrap), Just(BoundaryMode::Clamp)]
}

/// Odd-sized 0/1 masks up to 7x7
fn arb_mask() -> impl Strategy<Value = Vec<Vec<u8>>> {
    (0usize..4, 0usize..4).prop_flat_map(|(hr, hc)| {
        let rows = 2 * hr + 1;
        let cols = 2 * hc + 1;
        prop::collection::vec(prop::collection::vec(0u8..=1, cols), rows)
    })
}

fn arb_threshold_rule() -> impl Strategy<Value = ThresholdRule> {
    let set = prop::collection::vec(0u32..=120, 0..5);
    (set.clone(), set).prop_map(|(b, s)| ThresholdRule::from_lists(&b, &s))
}

// =============================================================================
// Persistence
// =============================================================================

proptest! {
    /// Saving then loading reproduces the grid exactly
    #[test]
    fn prop_snapshot_roundtrip(grid in arb_grid()) {
        let mut buf = Vec::new();
        save_grid(&mut buf, &grid).unwrap();
        let loaded = load_grid(buf.as_slice()).unwrap();
        prop_assert_eq!(loaded, grid);
    }

    /// A rejected load leaves the engine's grid as it was
    #[test]
    fn prop_mismatched_load_keeps_grid(grid in arb_grid(), other in arb_grid()) {
        prop_assume!(grid.dimensions() != other.dimensions());
        let mut engine = SimulationEngine::new(
            grid.clone(),
            Kernel::moore(),
            BoundaryMode::Wrap,
            Rule::from(ThresholdRule::life()),
        );
        let mut buf = Vec::new();
        save_grid(&mut buf, &other).unwrap();
        prop_assert!(engine.load(buf.as_slice()).is_err());
        prop_assert_eq!(engine.grid(), &grid);
    }
}

// =============================================================================
// Kernels and counting
// =============================================================================

proptest! {
    /// Kernel size is the number of ones, minus the center if it was set
    #[test]
    fn prop_kernel_has_no_zero_offset(mask in arb_mask()) {
        let kernel = build_kernel(&mask).unwrap();
        let ones: usize = mask.iter().flatten().filter(|&&v| v == 1).count();
        let center = mask[mask.len() / 2][mask[0].len() / 2] as usize;
        prop_assert_eq!(kernel.len(), ones - center);
        prop_assert!(kernel.offsets().iter().all(|o| (o.dx, o.dy) != (0, 0)));
    }

    /// Counts never exceed the kernel size
    #[test]
    fn prop_count_bounded_by_kernel(grid in arb_grid(), boundary in arb_boundary()) {
        let kernel = Kernel::moore();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                prop_assert!(count_neighbors(&grid, x, y, &kernel, boundary) as usize <= kernel.len());
            }
        }
    }
}

// =============================================================================
// Rules
// =============================================================================

proptest! {
    /// Counts in neither set always yield a dead cell
    #[test]
    fn prop_outside_sets_is_dead(rule in arb_threshold_rule(), count in 0u32..=8) {
        if !rule.birth.contains(count) {
            prop_assert_eq!(rule.next_state(DEAD, count), DEAD);
        }
        if !rule.survival.contains(count) {
            prop_assert_eq!(rule.next_state(ALIVE, count), DEAD);
        }
    }

    /// Range sets contain exactly their inclusive bounds
    #[test]
    fn prop_range_contains_inclusive(min in 0u32..100, len in 0u32..100, probe in 0u32..250) {
        let set = CountSet::Range { min, max: min + len };
        prop_assert_eq!(set.contains(probe), probe >= min && probe <= min + len);
    }

    /// Notation printed by Display parses back to the same rule
    #[test]
    fn prop_notation_reparses(rule in arb_threshold_rule()) {
        let text = rule.to_string();
        prop_assert_eq!(text.parse::<ThresholdRule>().unwrap(), rule);
    }

    /// Probabilities stay in [0, 1] for any spread and count
    #[test]
    fn prop_probability_in_unit_interval(spread in 0.0f64..5.0, count in 0u32..200) {
        let rule = ProbabilityRule::new(ProbabilityParams::life_like(spread), 8).unwrap();
        for state in [DEAD, ALIVE] {
            let p = rule.probability(state, count);
            prop_assert!((0.0..=1.0).contains(&p));
        }
    }
}

// =============================================================================
// Engine
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Births and deaths account for the whole population change, and
    /// cells stay in {0, 1}
    #[test]
    fn prop_outcome_matches_population(
        grid in arb_grid(),
        boundary in arb_boundary(),
        seed in any::<u64>(),
        stochastic in any::<bool>(),
    ) {
        let rule = if stochastic {
            Rule::from(ProbabilityRule::new(ProbabilityParams::default(), 8).unwrap())
        } else {
            Rule::from(ThresholdRule::life())
        };
        let mut engine = SimulationEngine::new(grid, Kernel::moore(), boundary, rule).with_seed(seed);
        for _ in 0..3 {
            let before = engine.population() as isize;
            let outcome = engine.step();
            prop_assert_eq!(engine.population() as isize, before + outcome.net());
            prop_assert!(engine.grid().cells().iter().all(|&c| c == DEAD || c == ALIVE));
        }
    }

    /// Same seed, same grid, same trajectory
    #[test]
    fn prop_seeded_runs_reproduce(seed in any::<u64>(), boundary in arb_boundary()) {
        let mut grid = Grid::new(20, 20);
        grid.fill_random(&mut StdRng::seed_from_u64(seed));
        let make = || {
            let rule = ProbabilityRule::new(ProbabilityParams::default(), 8).unwrap();
            SimulationEngine::new(grid.clone(), Kernel::moore(), boundary, Rule::from(rule))
                .with_seed(seed)
        };
        let mut a = make();
        let mut b = make();
        a.run(5);
        b.run(5);
        prop_assert_eq!(a.grid(), b.grid());
    }
}
