//! Integration tests for the stepping engine.
//!
//! Exercises: kernel -> boundary -> neighbor count -> rule -> buffer swap,
//! through the public engine API only.

use gridlife_core::boundary::BoundaryMode;
use gridlife_core::config::{InitialFill, SimConfig};
use gridlife_core::engine::SimulationEngine;
use gridlife_core::grid::{Grid, ALIVE, DEAD};
use gridlife_core::kernel::Kernel;
use gridlife_core::neighbors::count_neighbors;
use gridlife_core::patterns::{BLOCK, GLIDER, LWSS};
use gridlife_core::rules::{ProbabilityParams, ProbabilityRule, Rule, ThresholdRule};
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Helpers ────────────────────────────────────────────────────────────

fn life_engine(grid: Grid, boundary: BoundaryMode) -> SimulationEngine {
    SimulationEngine::new(
        grid,
        Kernel::moore(),
        boundary,
        Rule::from(ThresholdRule::life()),
    )
    .with_seed(17)
}

fn glider_at(width: usize, height: usize, x: usize, y: usize) -> Grid {
    let mut grid = Grid::new(width, height);
    GLIDER.stamp(&mut grid, x, y);
    grid
}

/// Next grid computed cell by cell from the untouched input.
fn reference_step(grid: &Grid, kernel: &Kernel, boundary: BoundaryMode, rule: &ThresholdRule) -> Grid {
    let mut next = grid.clone();
    let domain = boundary.domain(grid.width(), grid.height(), kernel.radius());
    for (x, y) in domain.iter() {
        let count = count_neighbors(grid, x, y, kernel, boundary);
        let state = grid.get(x, y).unwrap();
        next.set(x, y, rule.next_state(state, count));
    }
    next
}

// ── Glider ─────────────────────────────────────────────────────────────

#[test]
fn glider_translates_diagonally_every_four_steps() {
    for (w, h) in [(6, 6), (12, 9), (20, 20)] {
        let mut engine = life_engine(glider_at(w, h, 1, 1), BoundaryMode::Wrap);
        engine.run(4);
        assert_eq!(engine.grid(), &glider_at(w, h, 2, 2), "{}x{}", w, h);
        assert_eq!(engine.population(), 5);
    }
}

#[test]
fn glider_crosses_wrapped_edge() {
    // Starts touching the bottom-right corner and must reappear top-left
    let mut engine = life_engine(glider_at(10, 10, 7, 7), BoundaryMode::Wrap);
    engine.run(4 * 3);
    assert_eq!(engine.grid(), &glider_at(10, 10, 0, 0));
}

#[test]
fn glider_cannot_cross_clamped_border() {
    let mut engine = life_engine(glider_at(8, 8, 1, 1), BoundaryMode::Clamp);
    for _ in 0..40 {
        engine.step();
        let grid = engine.grid();
        for i in 0..8 {
            assert!(!grid.is_alive(i, 0) && !grid.is_alive(i, 7));
            assert!(!grid.is_alive(0, i) && !grid.is_alive(7, i));
        }
    }
}

// ── Synchronous update ─────────────────────────────────────────────────

#[test]
fn step_matches_reference_computed_from_snapshot() {
    let mut grid = Grid::new(30, 20);
    grid.fill_random(&mut StdRng::seed_from_u64(99));
    for boundary in [BoundaryMode::Wrap, BoundaryMode::Clamp] {
        let mut engine = life_engine(grid.clone(), boundary);
        let mut expected = grid.clone();
        for _ in 0..5 {
            expected = reference_step(&expected, &Kernel::moore(), boundary, &ThresholdRule::life());
            engine.step();
            assert_eq!(engine.grid(), &expected, "{:?}", boundary);
        }
    }
}

#[test]
fn larger_than_life_matches_reference() {
    let mut grid = Grid::new(24, 24);
    grid.fill_random(&mut StdRng::seed_from_u64(4));
    let kernel = Kernel::ring(5);
    for boundary in [BoundaryMode::Wrap, BoundaryMode::Clamp] {
        let mut engine = SimulationEngine::new(
            grid.clone(),
            kernel.clone(),
            boundary,
            Rule::from(ThresholdRule::bosco()),
        );
        let expected = reference_step(&grid, &kernel, boundary, &ThresholdRule::bosco());
        engine.step();
        assert_eq!(engine.grid(), &expected, "{:?}", boundary);
    }
}

#[test]
fn block_and_lwss_behave() {
    let mut grid = Grid::new(16, 16);
    BLOCK.stamp(&mut grid, 2, 2);
    let mut engine = life_engine(grid.clone(), BoundaryMode::Wrap);
    engine.run(3);
    assert_eq!(engine.grid(), &grid);
    assert_eq!(engine.last_outcome().births, 0);

    let mut grid = Grid::new(20, 10);
    LWSS.stamp(&mut grid, 10, 3);
    let mut engine = life_engine(grid, BoundaryMode::Wrap);
    engine.run(4);
    let mut shifted = Grid::new(20, 10);
    LWSS.stamp(&mut shifted, 8, 3);
    assert_eq!(engine.grid(), &shifted);
}

// ── Boundaries ─────────────────────────────────────────────────────────

#[test]
fn clamp_border_is_never_mutated() {
    for (kernel, radius) in [(Kernel::moore(), 1), (Kernel::ring(5), 5)] {
        let mut engine = SimulationEngine::new(
            Grid::new(30, 30),
            kernel,
            BoundaryMode::Clamp,
            Rule::from(ThresholdRule::day_and_night()),
        )
        .with_seed(8);
        engine.fill_random();
        let before = engine.snapshot();
        for _ in 0..6 {
            engine.step();
            for y in 0..30 {
                for x in 0..30 {
                    let border = x < radius || y < radius || x >= 30 - radius || y >= 30 - radius;
                    if border {
                        assert_eq!(engine.grid().get(x, y), before.get(x, y), "({}, {})", x, y);
                    }
                }
            }
        }
    }
}

#[test]
fn wrap_corner_counts_opposite_corner() {
    let mut grid = Grid::new(10, 10);
    grid.set(9, 9, ALIVE);
    assert_eq!(count_neighbors(&grid, 0, 0, &Kernel::moore(), BoundaryMode::Wrap), 1);
}

#[test]
fn wrap_updates_edges() {
    // Blinker across the top/bottom seam still oscillates
    let mut grid = Grid::new(6, 6);
    grid.set(3, 5, ALIVE);
    grid.set(3, 0, ALIVE);
    grid.set(3, 1, ALIVE);
    let mut engine = life_engine(grid.clone(), BoundaryMode::Wrap);
    engine.step();
    assert!(engine.grid().is_alive(2, 0));
    assert!(engine.grid().is_alive(4, 0));
    assert_eq!(engine.population(), 3);
    engine.step();
    assert_eq!(engine.grid(), &grid);
}

// ── Threshold rule ─────────────────────────────────────────────────────

#[test]
fn counts_outside_both_sets_always_die() {
    let rule = ThresholdRule::life();
    for count in (0..=8).filter(|n| ![2, 3].contains(n)) {
        assert_eq!(rule.next_state(DEAD, count), DEAD);
        assert_eq!(rule.next_state(ALIVE, count), DEAD);
    }
}

// ── Probability rule ───────────────────────────────────────────────────

#[test]
fn narrow_probability_rule_reproduces_life() {
    let narrow = ProbabilityRule::new(ProbabilityParams::life_like(1e-3), 8).unwrap();
    let mut grid = Grid::new(40, 40);
    grid.fill_random(&mut StdRng::seed_from_u64(21));

    let mut quantum = SimulationEngine::new(
        grid.clone(),
        Kernel::moore(),
        BoundaryMode::Clamp,
        Rule::from(narrow),
    )
    .with_seed(1);
    let mut classic = life_engine(grid, BoundaryMode::Clamp);

    for _ in 0..25 {
        assert_eq!(quantum.step(), classic.step());
        assert_eq!(quantum.grid(), classic.grid());
    }
}

#[test]
fn empirical_birth_frequency_tracks_density() {
    let params = ProbabilityParams::life_like(1.0);
    let rule = Rule::from(ProbabilityRule::new(params, 8).unwrap());
    let mut rng = StdRng::seed_from_u64(555);
    let trials = 20_000;

    for count in [2u32, 3, 4] {
        let expected = params.birth.at(count).clamp(0.0, 1.0);
        let born = (0..trials)
            .filter(|_| rule.evaluate(DEAD, count, &mut rng) == ALIVE)
            .count();
        let freq = born as f64 / trials as f64;
        assert!(
            (freq - expected).abs() < 0.02,
            "count {}: freq {} vs p {}",
            count,
            freq,
            expected
        );
    }

    // Survival is impossible away from 2 and 3
    assert!((0..1000).all(|_| rule.evaluate(ALIVE, 5, &mut rng) == DEAD));
}

#[test]
fn probability_steps_keep_alphabet() {
    let mut config = SimConfig::quantum();
    config.width = 40;
    config.height = 40;
    config.seed = Some(3);
    config.initial_fill = InitialFill::Random;
    let mut engine = SimulationEngine::from_config(&config).unwrap();
    for _ in 0..10 {
        engine.step();
        assert!(engine.grid().cells().iter().all(|&c| c == DEAD || c == ALIVE));
    }
}

// ── Grid edits ─────────────────────────────────────────────────────────

#[test]
fn fill_random_then_clear_is_empty_same_shape() {
    let mut engine = SimulationEngine::from_config(&SimConfig::basic()).unwrap();
    engine.fill_random();
    assert!(engine.population() > 0);
    engine.clear();
    assert_eq!(engine.population(), 0);
    assert_eq!(engine.grid().dimensions(), (30, 30));
}
