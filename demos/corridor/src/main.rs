//! corridor — two groups crossing a 30 m corridor in opposite directions.
//!
//! Loads `data/behavior.json` and `data/scene.csv`, activates the plugins
//! named in `data/plugins/`, runs until every pedestrian has left, and
//! writes trajectories to `output/corridor/`.
//!
//! Usage: `corridor [behavior.json scene.csv [model]]`

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};

use cs_core::Tick;
use cs_fsm::{Fsm, StepReport};
use cs_output::{CsvWriter, OutputWriter, SimOutputObserver, TRAJECTORY_FILE};
use cs_sim::{SimBuilder, SimObserver};
use cs_stress::StressTask;

const DEFAULT_MODEL: &str = "damped";
const OUTPUT_DIR: &str = "output/corridor";

// ── Observer wrapper to count rows and report progress ───────────────────────

struct ProgressObserver<W: OutputWriter> {
    inner:        SimOutputObserver<W>,
    rows:         usize,
    transitions:  usize,
    report_every: u64,
}

impl<W: OutputWriter> SimObserver for ProgressObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, report: &StepReport) {
        self.transitions += report.transitions;
        if tick.0.is_multiple_of(self.report_every) {
            log::info!("{tick}: {:.1} s, {} state transitions so far", report.elapsed_secs, self.transitions);
        }
        self.inner.on_tick_end(tick, report);
    }

    fn on_snapshot(&mut self, tick: Tick, fsm: &Fsm) {
        self.rows += fsm.agent_count();
        self.inner.on_snapshot(tick, fsm);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (behavior, scene, model): (PathBuf, PathBuf, &str) = match args.as_slice() {
        [] => (data.join("behavior.json"), data.join("scene.csv"), DEFAULT_MODEL),
        [b, s] => (b.into(), s.into(), DEFAULT_MODEL),
        [b, s, m] => (b.into(), s.into(), m.as_str()),
        _ => bail!("usage: corridor [behavior.json scene.csv [model]]"),
    };

    println!("=== corridor — crowdsim ===");
    println!("Behavior: {}", behavior.display());
    println!("Scene:    {}", scene.display());
    println!("Model:    {model}");
    println!();

    // 1. Initialize.
    let mut sim = SimBuilder::new(&behavior, &scene, model)
        .plugin_path(data.join("plugins"))
        .linked_plugins()
        .build()
        .context("initialization failed")?;
    println!("Agents: {}  |  Plugins: [{}]", sim.agent_count(), sim.plugins().names().join(", "));
    for task in sim.fsm().tasks().descriptions() {
        println!("Task:   {task}");
    }
    for cmd in sim.draw_goals() {
        log::debug!("goal draw command: {cmd:?}");
    }
    println!();

    // 2. Set up output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = ProgressObserver {
        inner:        SimOutputObserver::new(writer),
        rows:         0,
        transitions:  0,
        report_every: 100,
    };

    // 3. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 4. Summary.
    println!(
        "Simulation complete in {:.3} s: {} ticks, {:.1} s simulated",
        elapsed.as_secs_f64(),
        sim.current_tick().0,
        sim.elapsed_secs()
    );
    println!("  {TRAJECTORY_FILE} : {} rows", obs.rows);
    println!();

    // 5. Final agent table.
    let stress = sim.fsm().tasks().find::<StressTask>();
    println!("{:<6} {:<6} {:>8} {:>8} {:>7}", "Agent", "Class", "x", "z", "Stress");
    println!("{}", "-".repeat(40));
    for i in 0..sim.agent_count() {
        let (Some(pos), Some(class)) = (sim.agent_position(i), sim.agent_class(i)) else {
            continue;
        };
        let s = stress.and_then(|t| t.stress_levels().get(i).copied()).unwrap_or(0.0);
        println!("{i:<6} {class:<6} {:>8.2} {:>8.2} {s:>7.3}", pos.x, pos.z);
    }

    Ok(())
}
