//! Logic processor emulator CLI.
//!
//! This binary is a headless host for the emulator. It performs:
//! 1. **Run:** Drives the simulator for a number of fixed-length frames over a source file.
//! 2. **Check:** Translates every line once and reports faults and unsupported instructions.
//!
//! Printed text, faults, warnings and statistics go to stdout; a display can
//! be dumped to a PPM image after the run.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mlogvm_core::config::Config;
use mlogvm_core::isa::instruction::Program;
use mlogvm_core::isa::translate::{Translation, translate};
use mlogvm_core::sim::{PassthroughCompiler, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "mlogvm",
    author,
    version,
    about = "Logic processor emulator",
    long_about = "Run or check a logic-processor instruction list.\n\nExamples:\n  mlogvm run program.mlog --frames 120\n  mlogvm run program.mlog --config emu.json --dump-display display1 out.ppm\n  mlogvm check program.mlog"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Execute a program for a number of frames.
    Run {
        /// Instruction list, one instruction per line.
        file: PathBuf,

        /// JSON configuration file; built-in defaults otherwise.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of host frames to drive.
        #[arg(short, long, default_value_t = 60)]
        frames: u64,

        /// Host frame rate; each frame advances 1/fps seconds of logical time.
        #[arg(long, default_value_t = 60.0)]
        fps: f64,

        /// Log every executed instruction.
        #[arg(long)]
        trace: bool,

        /// Write a display to a PPM image after the run.
        #[arg(long, num_args = 2, value_names = ["NAME", "PATH"])]
        dump_display: Option<Vec<String>>,

        /// Print the register file after the run.
        #[arg(long)]
        registers: bool,
    },

    /// Translate every line once without executing anything.
    Check {
        /// Instruction list, one instruction per line.
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    let trace = matches!(cli.command, Commands::Run { trace: true, .. });
    init_tracing(trace);

    let result = match cli.command {
        Commands::Run {
            file,
            config,
            frames,
            fps,
            trace,
            dump_display,
            registers,
        } => cmd_run(&RunArgs {
            file,
            config,
            frames,
            fps,
            trace,
            dump_display,
            registers,
        }),
        Commands::Check { file } => cmd_check(&file),
    };

    if let Err(err) = result {
        eprintln!("[!] {err:#}");
        process::exit(1);
    }
}

/// Installs the log subscriber; `RUST_LOG` overrides the default filter.
fn init_tracing(trace: bool) {
    let default = if trace { "mlogvm_core=trace" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

struct RunArgs {
    file: PathBuf,
    config: Option<PathBuf>,
    frames: u64,
    fps: f64,
    trace: bool,
    dump_display: Option<Vec<String>>,
    registers: bool,
}

fn cmd_run(args: &RunArgs) -> Result<()> {
    let source = read_source(&args.file)?;
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.general.trace_instructions |= args.trace;

    if !(args.fps.is_finite() && args.fps > 0.0) {
        bail!("frame rate must be a positive number, got {}", args.fps);
    }
    let delta = Duration::try_from_secs_f64(args.fps.recip())
        .with_context(|| format!("frame rate {} is out of range", args.fps))?;

    let mut sim = Simulator::new(&config, PassthroughCompiler)?;
    println!(
        "[*] Running {} for {} frames at {} fps ({} instructions/s)",
        args.file.display(),
        args.frames,
        args.fps,
        config.processor.instructions_per_second
    );

    for _ in 0..args.frames {
        let _ = sim.frame(&source, delta);
        print!("{}", sim.drain_text());
    }
    println!();

    for fault in sim.faults() {
        println!("[!] {fault}");
    }
    for warning in sim.warnings() {
        println!("[?] {warning}");
    }

    if args.registers {
        println!("[*] pc = {}", sim.processor().pc);
        for (name, value) in sim.processor().registers.snapshot() {
            println!("    {name:<16} {value}");
        }
    }

    if let Some([name, path]) = args.dump_display.as_deref() {
        dump_display(&sim, name, Path::new(path))?;
    }

    println!("{}", sim.stats());
    Ok(())
}

fn cmd_check(file: &Path) -> Result<()> {
    let source = read_source(file)?;
    let program = Program::from_lines(source.lines());
    let mut problems = 0usize;

    for inst in program.slots().flatten() {
        match translate(inst) {
            Ok(Translation::Execute(_)) => {}
            Ok(Translation::Unsupported(unsupported)) => {
                problems += 1;
                println!("[?] line {}: {unsupported}", inst.source_line);
            }
            Err(err) => {
                problems += 1;
                println!("[!] line {}: {err}", inst.source_line);
            }
        }
    }

    println!(
        "[*] {} slots checked, {problems} problem(s)",
        program.len()
    );
    if problems > 0 {
        process::exit(2);
    }
    Ok(())
}

fn read_source(file: &Path) -> Result<String> {
    fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))
}

fn dump_display(sim: &Simulator, name: &str, path: &Path) -> Result<()> {
    let Some(display) = sim.display(name) else {
        bail!("no display named {name}");
    };
    let out = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    display
        .write_ppm(BufWriter::new(out))
        .with_context(|| format!("writing {}", path.display()))?;
    println!("[*] Wrote {name} to {}", path.display());
    Ok(())
}
