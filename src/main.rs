use clap::Parser;
use clap::error::ErrorKind;
use log::{LevelFilter, info};
use ls8::config;
use ls8::loader;
use ls8::logging;
use ls8::vm::{InstructionExecutor, MachineStatus, VMState, WriterSink};
use std::io;
use std::path::{Path, PathBuf};
use std::process;

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Program image to run (.ls8, one binary byte per line)
    program: PathBuf,

    /// Debug filter to specify log topics (e.g., "vm,stack")
    /// Available topics: vm, instructions, stack, trace, loader
    #[arg(long)]
    debug_filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Print a CPU trace line before every instruction
    #[arg(long)]
    trace: bool,

    /// Exit with status 1 on HLT instead of 0
    #[arg(long)]
    legacy_exit_status: bool,
}

fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Warn,
    }
}

/// Process status for a finished run
fn exit_status(status: MachineStatus, legacy: bool) -> i32 {
    match status {
        MachineStatus::Halted if legacy => config::EXIT_HALT_LEGACY,
        MachineStatus::Halted => config::EXIT_HALT,
        MachineStatus::Faulted(fault) => {
            eprintln!("{}", fault);
            config::EXIT_FAULT
        }
        // run() only returns terminal states
        MachineStatus::Running => config::EXIT_FAULT,
    }
}

/// Load the image at `path` into a fresh machine, or report why not and
/// return the startup exit status
fn load_state(path: &Path) -> Result<VMState, i32> {
    let program = loader::load_file(path).map_err(|e| {
        eprintln!("{}", e);
        config::EXIT_BAD_IMAGE
    })?;
    VMState::with_program(&program).map_err(|e| {
        eprintln!("{}", e);
        config::EXIT_BAD_IMAGE
    })
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            process::exit(config::EXIT_USAGE);
        }
    };

    // --trace turns on the trace topic at trace level
    let (log_level, debug_filter) = if args.trace {
        let filter = match args.debug_filter {
            Some(filter) => format!("{},trace", filter),
            None => "trace".to_string(),
        };
        (LevelFilter::Trace, Some(filter))
    } else {
        (parse_level(&args.log_level), args.debug_filter)
    };

    if let Err(e) = logging::init_logger(log_level, debug_filter) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    let mut state = match load_state(&args.program) {
        Ok(state) => state,
        Err(code) => process::exit(code),
    };

    info!("Running {}", args.program.display());

    let executor = InstructionExecutor::new();
    let mut output = WriterSink::new(io::stdout().lock());

    let status = executor.run(&mut state, &mut output);
    let code = exit_status(status, args.legacy_exit_status);

    info!("Exiting with status {} after {} cycles", code, state.cycles);
    process::exit(code);
}
