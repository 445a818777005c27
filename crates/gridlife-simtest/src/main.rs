//! gridlife Headless Simulation Harness
//!
//! Validates the engine end to end without a window or audio device.
//! Runs entirely in-process: no rendering backend, no sound output.
//!
//! Usage:
//!   cargo run -p gridlife-simtest
//!   cargo run -p gridlife-simtest -- --verbose
//!   cargo run -p gridlife-simtest -- --preset larger_than_life --steps 20
//!   cargo run -p gridlife-simtest -- --config my_rule.json --steps 50
//!
//! Set `RUST_LOG=debug` to see per-step birth/death logging.

use gridlife_core::audio::{ToneModel, ToneState};
use gridlife_core::boundary::BoundaryMode;
use gridlife_core::config::{InitialFill, SimConfig};
use gridlife_core::engine::SimulationEngine;
use gridlife_core::grid::{Grid, ALIVE, DEAD};
use gridlife_core::kernel::{build_kernel, Kernel};
use gridlife_core::neighbors::count_neighbors;
use gridlife_core::patterns::GLIDER;
use gridlife_core::persistence::{self, SaveError};
use gridlife_core::render::{Renderer, TextRenderer, Viewport};
use gridlife_core::rules::{ProbabilityParams, ProbabilityRule, Rule, ThresholdRule};

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

struct Args {
    verbose: bool,
    config: Option<String>,
    preset: Option<String>,
    steps: usize,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        verbose: false,
        config: None,
        preset: None,
        steps: 10,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--verbose" => args.verbose = true,
            "--config" => args.config = Some(iter.next().ok_or("--config needs a path")?),
            "--preset" => args.preset = Some(iter.next().ok_or("--preset needs a name")?),
            "--steps" => {
                let value = iter.next().ok_or("--steps needs a number")?;
                args.steps = value
                    .parse()
                    .map_err(|_| format!("invalid step count '{}'", value))?;
            }
            other => return Err(format!("unknown argument '{}'", other)),
        }
    }
    Ok(args)
}

fn main() {
    env_logger::init();

    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };

    if args.config.is_some() || args.preset.is_some() {
        if let Err(e) = run_configured(&args) {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let verbose = args.verbose;
    println!("=== gridlife Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Kernel construction
    results.extend(validate_kernels(verbose));

    // 2. Boundary policies
    results.extend(validate_boundaries(verbose));

    // 3. Synchronous update & glider
    results.extend(validate_dynamics(verbose));

    // 4. Probability rule degeneration
    results.extend(validate_probability(verbose));

    // 5. Snapshot persistence
    results.extend(validate_persistence(verbose));

    // 6. Presets
    results.extend(validate_presets(verbose));

    // 7. Tone feedback
    results.extend(validate_tone(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── Configured run ──────────────────────────────────────────────────────

fn run_configured(args: &Args) -> Result<(), String> {
    let config = match (&args.config, &args.preset) {
        (Some(path), _) => SimConfig::from_path(path).map_err(|e| e.to_string())?,
        (None, Some(name)) => {
            let mut config =
                SimConfig::preset(name).ok_or_else(|| format!("unknown preset '{}'", name))?;
            config.initial_fill = InitialFill::Random;
            config
        }
        (None, None) => unreachable!("checked by caller"),
    };

    let mut engine = SimulationEngine::from_config(&config).map_err(|e| e.to_string())?;
    let tone = ToneModel::default();
    let mut tone_state = ToneState::default();

    println!(
        "{}x{} grid, {} neighbors, {:?} boundary, population {}",
        config.width,
        config.height,
        engine.kernel().len(),
        config.boundary,
        engine.population()
    );

    for _ in 0..args.steps {
        let outcome = engine.step();
        let (next_state, frequency) = tone.next_frequency(tone_state, &outcome);
        tone_state = next_state;
        println!(
            "gen {:>4}: +{:<5} -{:<5} pop {:<6} tone {}",
            engine.generation(),
            outcome.births,
            outcome.deaths,
            engine.population(),
            frequency.map_or("-".to_string(), |f| format!("{:.1} Hz", f))
        );
    }

    if args.verbose {
        let mut renderer = TextRenderer::default();
        renderer.render(&engine.frame(&Viewport::default()));
        println!("\n{}", renderer.output());
    }
    Ok(())
}

// ── 1. Kernels ──────────────────────────────────────────────────────────

fn validate_kernels(verbose: bool) -> Vec<TestResult> {
    println!("--- Kernels ---");
    let mut results = Vec::new();

    let mask: Vec<Vec<u8>> = vec![vec![1, 1, 1], vec![1, 0, 1], vec![1, 1, 1]];
    let built = build_kernel(&mask);
    results.push(TestResult {
        name: "kernel_moore_from_mask".into(),
        passed: built.as_ref().map_or(false, |k| *k == Kernel::moore()),
        detail: format!("{:?}", built.as_ref().map(|k| k.len())),
    });

    let ring = Kernel::ring(5);
    results.push(TestResult {
        name: "kernel_ring_11x11".into(),
        passed: ring.len() == 120 && ring.radius() == 5,
        detail: format!("{} offsets, radius {}", ring.len(), ring.radius()),
    });

    results.push(TestResult {
        name: "kernel_empty_mask_rejected".into(),
        passed: build_kernel(&[]).is_err(),
        detail: "empty mask fails fast".into(),
    });

    if verbose {
        println!("  Moore offsets: {:?}", Kernel::moore().offsets());
    }

    results
}

// ── 2. Boundaries ───────────────────────────────────────────────────────

fn validate_boundaries(_verbose: bool) -> Vec<TestResult> {
    println!("--- Boundaries ---");
    let mut results = Vec::new();

    let mut grid = Grid::new(10, 10);
    grid.set(9, 9, ALIVE);
    let wrapped = count_neighbors(&grid, 0, 0, &Kernel::moore(), BoundaryMode::Wrap);
    results.push(TestResult {
        name: "wrap_corner_neighbor".into(),
        passed: wrapped == 1,
        detail: format!("(0,0) sees {} neighbor(s) with only (9,9) alive", wrapped),
    });

    // Random board, clamp: the 5-deep border of the ring kernel never moves
    let mut engine = SimulationEngine::new(
        Grid::new(40, 40),
        Kernel::ring(5),
        BoundaryMode::Clamp,
        Rule::from(ThresholdRule::bosco()),
    )
    .with_seed(11);
    engine.fill_random();
    let before = engine.snapshot();
    engine.run(5);
    let after = engine.grid();
    let changed_border = (0..40)
        .flat_map(|y| (0..40).map(move |x| (x, y)))
        .filter(|&(x, y)| x < 5 || y < 5 || x >= 35 || y >= 35)
        .filter(|&(x, y)| before.get(x, y) != after.get(x, y))
        .count();
    results.push(TestResult {
        name: "clamp_border_frozen".into(),
        passed: changed_border == 0,
        detail: format!("{} border cells changed over 5 steps", changed_border),
    });

    results
}

// ── 3. Dynamics ─────────────────────────────────────────────────────────

fn life(grid: Grid, boundary: BoundaryMode) -> SimulationEngine {
    SimulationEngine::new(
        grid,
        Kernel::moore(),
        boundary,
        Rule::from(ThresholdRule::life()),
    )
    .with_seed(0)
}

fn validate_dynamics(verbose: bool) -> Vec<TestResult> {
    println!("--- Dynamics ---");
    let mut results = Vec::new();

    // Glider on a wrapped board comes back shifted by (1, 1) after 4 steps
    let mut start = Grid::new(8, 8);
    GLIDER.stamp(&mut start, 1, 1);
    let mut expected = Grid::new(8, 8);
    GLIDER.stamp(&mut expected, 2, 2);

    let mut engine = life(start, BoundaryMode::Wrap);
    engine.run(4);
    results.push(TestResult {
        name: "glider_translates".into(),
        passed: engine.grid() == &expected,
        detail: format!("population {} after 4 steps", engine.population()),
    });

    // Full lap around the 8x8 torus returns the glider home
    engine.run(28);
    let mut home = Grid::new(8, 8);
    GLIDER.stamp(&mut home, 1, 1);
    results.push(TestResult {
        name: "glider_wraps_torus".into(),
        passed: engine.grid() == &home,
        detail: format!("generation {}", engine.generation()),
    });

    // Blinker: an in-place update would kill the top cell before the
    // middle row counts it, breaking the rotation
    let vertical = Grid::from_ascii(
        "
        .....
        ..#..
        ..#..
        ..#..
        .....
        ",
    );
    let horizontal = Grid::from_ascii(
        "
        .....
        .....
        .###.
        .....
        .....
        ",
    );
    let mut engine = life(vertical, BoundaryMode::Clamp);
    let outcome = engine.step();
    results.push(TestResult {
        name: "synchronous_blinker_rotates".into(),
        passed: engine.grid() == &horizontal && outcome.births == 2 && outcome.deaths == 2,
        detail: format!("{:?}", outcome),
    });

    if verbose {
        let mut renderer = TextRenderer::default();
        renderer.render(&engine.frame(&Viewport::default()));
        print!("{}", renderer.output());
    }

    results
}

// ── 4. Probability ──────────────────────────────────────────────────────

fn validate_probability(_verbose: bool) -> Vec<TestResult> {
    println!("--- Probability Rule ---");
    let mut results = Vec::new();

    let threshold = ThresholdRule::life();
    let narrow = match ProbabilityRule::new(ProbabilityParams::life_like(0.01), 8) {
        Ok(r) => r,
        Err(e) => {
            results.push(TestResult {
                name: "probability_build".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };

    let mut mismatches = 0;
    for state in [DEAD, ALIVE] {
        for n in 0..=8 {
            let p = narrow.probability(state, n);
            let expected = threshold.next_state(state, n) as f64;
            if (p - expected).abs() > 1e-9 {
                mismatches += 1;
            }
        }
    }
    results.push(TestResult {
        name: "probability_degenerates_to_threshold".into(),
        passed: mismatches == 0,
        detail: format!("{} of 18 (state, count) pairs differ", mismatches),
    });

    let default = ProbabilityRule::new(ProbabilityParams::default(), 8);
    let in_range = default.as_ref().map_or(false, |rule| {
        (0..=8).all(|n| {
            let b = rule.probability(DEAD, n);
            let s = rule.probability(ALIVE, n);
            (0.0..=1.0).contains(&b) && (0.0..=1.0).contains(&s)
        })
    });
    results.push(TestResult {
        name: "probability_clamped".into(),
        passed: in_range,
        detail: "all table entries within [0, 1]".into(),
    });

    results
}

// ── 5. Persistence ──────────────────────────────────────────────────────

fn validate_persistence(verbose: bool) -> Vec<TestResult> {
    println!("--- Persistence ---");
    let mut results = Vec::new();

    let dir = std::env::temp_dir().join(format!("gridlife-simtest-{}", std::process::id()));
    let path = persistence::snapshot_path(&dir, "roundtrip");

    let mut engine = match SimulationEngine::from_config(&SimConfig::basic()) {
        Ok(e) => e.with_seed(5),
        Err(e) => {
            results.push(TestResult {
                name: "persistence_engine".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };
    engine.fill_random();
    let original = engine.snapshot();

    let roundtrip = engine
        .save_to_path(&path)
        .and_then(|_| persistence::load_from_path(&path));
    results.push(TestResult {
        name: "snapshot_roundtrip".into(),
        passed: roundtrip.as_ref().map_or(false, |g| *g == original),
        detail: match &roundtrip {
            Ok(g) => format!("{}x{} grid, {} alive", g.width(), g.height(), g.population()),
            Err(e) => e.to_string(),
        },
    });

    engine.clear();
    let missing = engine.load_from_path(dir.join("missing.bin"));
    results.push(TestResult {
        name: "missing_snapshot_keeps_grid".into(),
        passed: matches!(missing, Err(SaveError::NotFound(_))) && engine.population() == 0,
        detail: format!("{:?}", missing.err().map(|e| e.to_string())),
    });

    let small = persistence::save_to_path(dir.join("small.bin"), &Grid::new(3, 3))
        .and_then(|_| engine.load_from_path(dir.join("small.bin")));
    results.push(TestResult {
        name: "mismatched_snapshot_rejected".into(),
        passed: matches!(small, Err(SaveError::DimensionMismatch { .. })),
        detail: format!("{:?}", small.err().map(|e| e.to_string())),
    });

    if verbose {
        println!("  Snapshots written under {}", dir.display());
    }
    let _ = std::fs::remove_dir_all(&dir);

    results
}

// ── 6. Presets ──────────────────────────────────────────────────────────

fn validate_presets(verbose: bool) -> Vec<TestResult> {
    println!("--- Presets ---");
    let mut results = Vec::new();

    for name in ["basic", "conway", "larger_than_life", "quantum", "music"] {
        let Some(mut config) = SimConfig::preset(name) else {
            results.push(TestResult {
                name: format!("preset_{}", name),
                passed: false,
                detail: "missing".into(),
            });
            continue;
        };
        config.seed = Some(2024);
        config.initial_fill = InitialFill::Random;

        match SimulationEngine::from_config(&config) {
            Ok(mut engine) => {
                let outcome = engine.run(3);
                let alphabet_ok = engine.grid().cells().iter().all(|&c| c == DEAD || c == ALIVE);
                if verbose {
                    println!(
                        "  {:18} +{} -{} pop {}",
                        name,
                        outcome.births,
                        outcome.deaths,
                        engine.population()
                    );
                }
                results.push(TestResult {
                    name: format!("preset_{}", name),
                    passed: alphabet_ok && engine.generation() == 3,
                    detail: format!("{} steps, population {}", engine.generation(), engine.population()),
                });
            }
            Err(e) => results.push(TestResult {
                name: format!("preset_{}", name),
                passed: false,
                detail: e.to_string(),
            }),
        }
    }

    results
}

// ── 7. Tone ─────────────────────────────────────────────────────────────

fn validate_tone(verbose: bool) -> Vec<TestResult> {
    println!("--- Tone Feedback ---");
    let mut results = Vec::new();

    let mut config = SimConfig::music();
    config.seed = Some(7);
    config.initial_fill = InitialFill::Random;
    let mut engine = match SimulationEngine::from_config(&config) {
        Ok(e) => e,
        Err(e) => {
            results.push(TestResult {
                name: "tone_engine".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };

    let model = ToneModel::default();
    let mut state = ToneState::default();
    let mut tones = Vec::new();
    for _ in 0..20 {
        let outcome = engine.step();
        let (next, frequency) = model.next_frequency(state, &outcome);
        state = next;
        tones.extend(frequency);
    }

    results.push(TestResult {
        name: "tone_in_band".into(),
        passed: !tones.is_empty() && tones.iter().all(|f| (100.0..=800.0).contains(f)),
        detail: format!("{} tones", tones.len()),
    });

    if verbose {
        let rendered: Vec<String> = tones.iter().map(|f| format!("{:.0}", f)).collect();
        println!("  Frequencies: {}", rendered.join(" "));
    }

    results
}
