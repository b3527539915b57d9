//! RV32IM core model CLI.
//!
//! This binary runs firmware on the core model. It performs:
//! 1. **Run:** Loads a raw binary, word hex file or ELF into the configured memory map,
//!    clocks the model until the program reports through `tohost` or the cycle budget
//!    runs out, then prints the outcome, final registers and statistics.
//! 2. **Disassemble:** Prints a listing of the words of an image.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rv32sim_core::common::SimError;
use rv32sim_core::isa::disasm::disassemble;
use rv32sim_core::sim::loader::{self, Image, ImageFormat};
use rv32sim_core::{Config, RunOutcome, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "rv32sim",
    author,
    version,
    about = "Cycle-accurate RV32IM core model",
    long_about = "Run firmware on a cycle-accurate model of a multi-cycle RV32IM core.\n\nExamples:\n  rv32sim run firmware.elf\n  rv32sim run --hex --tohost 0x1fffc firmware.hex\n  rv32sim run --unified --trace rv32ui-p-add.elf\n  rv32sim disasm firmware.bin"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run an image until it reports through `tohost` or the cycle budget runs out.
    Run {
        /// Firmware image (ELF, raw binary, or word hex).
        image: PathBuf,

        /// Parse the image as `$readmemh` word hex.
        #[arg(long)]
        hex: bool,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Cycle budget (overrides the configuration).
        #[arg(long)]
        max_cycles: Option<u64>,

        /// Address of the `tohost` word (hex with `0x`, or decimal).
        #[arg(long, value_parser = parse_addr)]
        tohost: Option<u32>,

        /// Use one flat memory instead of ROM + RAM.
        #[arg(long)]
        unified: bool,

        /// Trace every retired instruction.
        #[arg(long)]
        trace: bool,
    },

    /// Disassemble the words of an image.
    Disasm {
        /// Firmware image (ELF, raw binary, or word hex).
        image: PathBuf,

        /// Parse the image as `$readmemh` word hex.
        #[arg(long)]
        hex: bool,
    },
}

fn parse_addr(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(&hex.replace('_', ""), 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid address `{s}`: {e}"))
}

fn init_tracing(trace: bool) {
    let filter = if trace {
        EnvFilter::new("trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { image, hex, config, max_cycles, tohost, unified, trace } => {
            init_tracing(trace);
            cmd_run(&image, hex, config.as_deref(), max_cycles, tohost, unified, trace)
        }
        Commands::Disasm { image, hex } => {
            init_tracing(false);
            cmd_disasm(&image, hex).map(|()| ExitCode::SUCCESS)
        }
    };

    result.unwrap_or_else(|e| {
        eprintln!("error: {e}");
        ExitCode::FAILURE
    })
}

fn load(path: &Path, hex: bool, config: &Config) -> Result<Image, SimError> {
    let format = hex.then_some(ImageFormat::Hex);
    loader::load_file(path, format, config.reset_vector())
}

/// Runs an image and reports the outcome.
///
/// Exit status is 0 on pass, or on a budget-limited run when no `tohost`
/// address is known; 1 on a reported failure; 2 when a monitored program
/// never reported.
fn cmd_run(
    image: &Path,
    hex: bool,
    config_path: Option<&Path>,
    max_cycles: Option<u64>,
    tohost: Option<u32>,
    unified: bool,
    trace: bool,
) -> Result<ExitCode, SimError> {
    let mut config = match config_path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.memory.unified |= unified;
    config.general.trace_instructions |= trace;
    if let Some(n) = max_cycles {
        config.general.max_cycles = n;
    }
    if tohost.is_some() {
        config.tohost = tohost;
    }

    let img = load(image, hex, &config)?;
    info!("loaded {} segment(s) from {}", img.segments.len(), image.display());
    let mut sim = Simulator::new(&config);
    sim.load_image(&img)?;

    println!("[*] Running {} (PC = {:#010x})", image.display(), sim.cpu.pc);
    let outcome = sim.run(config.general.max_cycles);

    let code = match outcome {
        RunOutcome::Pass => {
            println!("\n[*] PASS");
            ExitCode::SUCCESS
        }
        RunOutcome::Fail { code } => {
            println!("\n[!] FAIL (test {code})");
            ExitCode::from(1)
        }
        RunOutcome::CycleLimit if sim.system.tohost_addr().is_some() => {
            println!("\n[!] No tohost report within {} cycles", config.general.max_cycles);
            ExitCode::from(2)
        }
        RunOutcome::CycleLimit => {
            println!("\n[*] Stopped after {} cycles", config.general.max_cycles);
            ExitCode::SUCCESS
        }
    };

    println!("{}", sim.cpu.dump_state());
    sim.stats().print();
    Ok(code)
}

fn cmd_disasm(image: &Path, hex: bool) -> Result<(), SimError> {
    let config = Config::default();
    let img = load(image, hex, &config)?;
    for seg in &img.segments {
        println!("\n{:#010x}:", seg.addr);
        for (i, chunk) in seg.data.chunks_exact(4).enumerate() {
            let word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            let addr = seg.addr.wrapping_add((i * 4) as u32);
            println!("  {addr:08x}:  {word:08x}  {}", disassemble(word));
        }
    }
    Ok(())
}
