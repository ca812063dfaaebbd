use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use emul8080_invaders::{InvaderMachine, MachineConfig, MachineCrash};

/// Pause between scheduler ticks.
const TICK_SLEEP: Duration = Duration::from_millis(1);

/// Command-line options: `<rom_path> [run_seconds] [crash_snapshot_path]`.
#[derive(Clone, Debug, PartialEq)]
pub struct RunOptions {
    pub rom_path: PathBuf,
    /// Stop after this long. Runs until a crash when absent.
    pub run_for: Option<Duration>,
    /// Where to write the machine snapshot if the CPU fails.
    pub crash_snapshot_path: Option<PathBuf>,
}

impl RunOptions {
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let Some(rom_path) = args.next() else {
            bail!("usage: emul8080 <rom_path> [run_seconds] [crash_snapshot_path]");
        };

        let run_for = match args.next() {
            Some(seconds) => {
                let seconds: f64 = seconds
                    .parse()
                    .with_context(|| format!("invalid run duration '{}'", seconds))?;
                if !seconds.is_finite() || seconds < 0.0 {
                    bail!("run duration must be a non-negative number of seconds");
                }
                Some(Duration::from_secs_f64(seconds))
            }
            None => None,
        };

        Ok(Self {
            rom_path: PathBuf::from(rom_path),
            run_for,
            crash_snapshot_path: args.next().map(PathBuf::from),
        })
    }
}

/// What a run that ended without a crash did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub cycles: u64,
}

pub fn run(options: &RunOptions) -> Result<RunSummary> {
    let rom = std::fs::read(&options.rom_path)
        .with_context(|| format!("failed to read ROM '{}'", options.rom_path.display()))?;

    let mut machine = InvaderMachine::new(MachineConfig::default());
    machine
        .load_rom(&rom)
        .with_context(|| format!("failed to load ROM '{}'", options.rom_path.display()))?;
    log::info!("running '{}'", options.rom_path.display());

    let started = Instant::now();
    let mut summary = RunSummary {
        ticks: 0,
        cycles: 0,
    };

    loop {
        if options.run_for.is_some_and(|limit| started.elapsed() >= limit) {
            break;
        }

        match machine.tick() {
            Ok(cycles) => {
                summary.ticks += 1;
                summary.cycles += u64::from(cycles);
            }
            Err(crash) => {
                log::error!("machine crashed after {} ticks: {}", summary.ticks, crash);
                if let Some(path) = &options.crash_snapshot_path {
                    write_crash_snapshot(path, &crash)?;
                }
                return Err(crash).context("emulation stopped");
            }
        }

        for event in machine.drain_sound_events() {
            log::trace!("{:?}", event);
        }
        thread::sleep(TICK_SLEEP);
    }

    log::info!(
        "finished: {} ticks, {} cycles in {:.2?}",
        summary.ticks,
        summary.cycles,
        started.elapsed()
    );
    Ok(summary)
}

fn write_crash_snapshot(path: &Path, crash: &MachineCrash) -> Result<()> {
    std::fs::write(path, crash.snapshot.serialize())
        .with_context(|| format!("failed to write crash snapshot '{}'", path.display()))?;
    log::info!("crash snapshot written to '{}'", path.display());
    Ok(())
}
