use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "fforge",
    about = "Condensed chemical formula expansion and proton sums",
    version,
    author,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Expand each formula into its space-separated atom list
    #[command(visible_alias = "ext")]
    Expand(EvalArgs),

    /// Sum the atomic numbers of each formula
    #[command(visible_alias = "pn")]
    Protons(EvalArgs),

    /// Report whether each formula has balanced parentheses
    #[command(visible_alias = "v")]
    Verify(VerifyArgs),
}

impl Command {
    pub fn io(&self) -> &IoOptions {
        match self {
            Command::Expand(args) | Command::Protons(args) => &args.io,
            Command::Verify(args) => &args.io,
        }
    }
}

/// I/O options shared by all commands.
#[derive(Args)]
pub struct IoOptions {
    /// Formula file, whitespace separated (stdin if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Result file, one line per formula (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Append to the output file instead of truncating it
    #[arg(long, requires = "output")]
    pub append: bool,

    /// Suppress progress and per-formula reports (for scripting)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Raise log verbosity (-v debug, -vv trace); FFORGE_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Periodic table selection.
#[derive(Args)]
#[command(next_help_heading = "Element Table")]
pub struct TableOptions {
    /// Periodic table file (built-in table if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub table: Option<PathBuf>,

    /// Table file format (inferred from extension if not specified)
    #[arg(long = "table-format", value_name = "FORMAT", requires = "table")]
    pub table_format: Option<TableFormatArg>,
}

/// How a batch reacts to bad input.
#[derive(Args)]
#[command(next_help_heading = "Batch Behavior")]
pub struct BatchOptions {
    /// Reject duplicate table symbols and elements without an atomic number
    #[arg(long)]
    pub strict: bool,

    /// Stop at the first formula that cannot be processed
    #[arg(long)]
    pub fail_fast: bool,
}

#[derive(Args)]
pub struct EvalArgs {
    #[command(flatten)]
    pub io: IoOptions,

    #[command(flatten)]
    pub table: TableOptions,

    #[command(flatten)]
    pub batch: BatchOptions,
}

#[derive(Args)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub io: IoOptions,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TableFormatArg {
    /// Two columns: symbol and atomic number
    #[value(alias = "txt")]
    Text,
    /// `[elements]` table of `Symbol = number`
    Toml,
}

pub fn parse() -> Cli {
    Cli::parse()
}
