use crate::config::{Config, load_config};
use crate::dump::{DumpMode, dump_json, write_output};
use crate::editor::Editor;
use crate::error::EditorError;
use crate::script::{parse_script, run_script};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "nfh", version, about = "Replay graph edit scripts with undo/redo history")]
pub struct Args {
    /// Edit script file or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (JSON). Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// What to write out
    #[arg(short = 'e', long = "emit", value_enum, default_value = "present")]
    pub emit: Emit,

    /// Shorthand for `--emit history`
    #[arg(long = "history", conflicts_with = "emit")]
    pub history: bool,

    /// Config file (.json or .json5)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Seed for the initial random layout
    #[arg(short = 's', long = "seed")]
    pub seed: Option<u64>,

    /// Number of nodes in the initial document
    #[arg(short = 'n', long = "nodes")]
    pub nodes: Option<usize>,

    /// Pretty-print the JSON output
    #[arg(short = 'p', long = "pretty")]
    pub pretty: bool,

    /// Log transitions to stderr (repeat for more detail)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum Emit {
    Present,
    History,
    Summary,
}

impl From<Emit> for DumpMode {
    fn from(emit: Emit) -> Self {
        match emit {
            Emit::Present => DumpMode::Present,
            Emit::History => DumpMode::History,
            Emit::Summary => DumpMode::Summary,
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(args.config.as_deref())
        .with_context(|| format!("loading config {:?}", args.config))?;
    let config = apply_overrides(config, &args)?;

    let input = read_input(args.input.as_deref())?;
    let commands = parse_script(&input)?;
    info!(commands = commands.len(), "parsed edit script");

    let mut editor = Editor::from_config(&config);
    run_script(&mut editor, &commands);

    let mode = if args.history {
        DumpMode::History
    } else {
        args.emit.into()
    };
    let json = dump_json(&editor, mode, args.pretty)?;
    write_output(&json, args.output.as_deref())?;
    Ok(())
}

fn apply_overrides(mut config: Config, args: &Args) -> Result<Config, EditorError> {
    if let Some(seed) = args.seed {
        config.document.seed = Some(seed);
    }
    if let Some(nodes) = args.nodes {
        config.document.node_count = nodes;
    }
    config.validate()?;
    Ok(config)
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("NODEFLOW_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("nodeflow_history={default_level}")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return std::fs::read_to_string(path)
                .with_context(|| format!("reading script {}", path.display()));
        }
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
