//! rvmini command-line driver.
//!
//! This binary runs boot images on the RV32I core model. It performs:
//! 1. **Run:** Boot a raw binary or ELF from ROM or SPI flash, run a fixed number
//!    of instructions or cycles, then print the architectural state and statistics.
//! 2. **Disassemble:** List an image as RV32I assembly.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rvmini_core::common::SimError;
use rvmini_core::config::{BootSource, Config};
use rvmini_core::isa::disasm::disassemble;
use rvmini_core::sim::loader;
use rvmini_core::soc::BootImage;
use rvmini_core::{Simulator, System};

#[derive(Parser, Debug)]
#[command(
    name = "rvmini",
    author,
    version,
    about = "Cycle-stepped RV32I core with ROM, RAM and SPI boot flash",
    long_about = "Run a boot image on the RV32I core model.\n\nExamples:\n  rvmini run --rom blink.bin --instructions 100\n  rvmini run --flash firmware.bin --flash-offset 0x200000 --trace\n  rvmini disasm blink.bin"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a boot image.
    Run(RunArgs),
    /// Disassemble a boot image.
    Disasm {
        /// Image to list.
        file: PathBuf,
        /// Treat the image as an ELF file.
        #[arg(long)]
        elf: bool,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Boot from a ROM holding this image.
    #[arg(long, conflicts_with = "flash", required_unless_present = "flash")]
    rom: Option<PathBuf>,

    /// Boot from an SPI flash holding this image.
    #[arg(long)]
    flash: Option<PathBuf>,

    /// Flash address of the image (decimal or 0x-prefixed hex).
    #[arg(long, value_parser = parse_u32)]
    flash_offset: Option<u32>,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of instructions to run.
    #[arg(long, conflicts_with = "cycles")]
    instructions: Option<u64>,

    /// Number of clock ticks to run. Without this or `--instructions` the
    /// run lasts for the whole cycle budget.
    #[arg(long)]
    cycles: Option<u64>,

    /// Cycle budget before giving up.
    #[arg(long)]
    max_cycles: Option<u64>,

    /// Log every retired instruction.
    #[arg(long)]
    trace: bool,

    /// Treat the image as an ELF file.
    #[arg(long)]
    elf: bool,
}

fn parse_u32(s: &str) -> Result<u32, String> {
    let parsed = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .map_or_else(|| s.parse(), |hex| u32::from_str_radix(hex, 16));
    parsed.map_err(|e| format!("invalid number '{s}': {e}"))
}

fn init_tracing(trace: bool) {
    let default = if trace { "info,rvmini_core=trace" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let trace = matches!(&cli.command, Commands::Run(args) if args.trace);
    init_tracing(trace);

    let result = match cli.command {
        Commands::Run(args) => cmd_run(args),
        Commands::Disasm { file, elf } => cmd_disasm(&file, elf),
    };
    if let Err(e) = result {
        error!("{e}");
        process::exit(1);
    }
}

/// Reads an image, flattening it when it is an ELF. Returns the boot and RAM parts.
fn read_image(path: &Path, elf: bool) -> Result<(Vec<u8>, Vec<u8>), SimError> {
    let bytes = loader::load_binary(path)?;
    if elf {
        let image = loader::load_elf(&bytes)?;
        Ok((image.boot, image.ram))
    } else {
        Ok((bytes, Vec::new()))
    }
}

fn cmd_run(args: RunArgs) -> Result<(), SimError> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let image_path = if let Some(path) = args.flash {
        config.boot.source = BootSource::Flash;
        path
    } else if let Some(path) = args.rom {
        config.boot.source = BootSource::Rom;
        path
    } else {
        return Err(SimError::EmptyImage);
    };
    if let Some(offset) = args.flash_offset {
        config.boot.flash_offset = offset;
    }
    if let Some(max) = args.max_cycles {
        config.general.max_cycles = max;
    }
    config.general.trace_instructions |= args.trace;

    let (boot, ram) = read_image(&image_path, args.elf)?;
    let mut system = System::new(&config, BootImage::Bytes(boot))?;
    if !ram.is_empty() {
        system.load_ram(0, &loader::words_from_le_bytes(&ram))?;
    }
    let mut sim = Simulator::new(system, &config);

    info!(image = %image_path.display(), boot = ?config.boot.source, "run: start");
    let outcome = match (args.instructions, args.cycles) {
        (Some(count), _) => sim.run_instructions(count),
        (None, Some(cycles)) => {
            sim.run_cycles(cycles);
            Ok(())
        }
        (None, None) => {
            sim.run_cycles(config.general.max_cycles);
            Ok(())
        }
    };

    println!("\npc       {:#010x}", sim.pc());
    println!("minstret {}", sim.minstret());
    println!("{}", sim.cpu.regs);
    sim.stats().print();

    outcome
}

fn cmd_disasm(path: &Path, elf: bool) -> Result<(), SimError> {
    let (boot, _) = read_image(path, elf)?;
    for (i, word) in loader::words_from_le_bytes(&boot).into_iter().enumerate() {
        println!("{:08x}:  {word:08x}  {}", i * 4, disassemble(word));
    }
    Ok(())
}
