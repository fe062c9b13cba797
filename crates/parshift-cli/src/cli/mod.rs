use clap::{Parser, Subcommand};
use parshift_core::models::AddressingMode;

mod args;
mod parsers;


pub use args::{CodeArgs, InputArgs, StatsArgs};

use self::parsers::parse_addressing_mode;

#[derive(Debug, Parser)]
#[command(name = "parshift")]
#[command(about = "Participation-shift analysis for multi-party conversations", version)]
pub struct Cli {
    /// Addressing mode of the input (`reply` or `target`). Inferred from the records when omitted.
    #[arg(long, global = true, value_parser = parse_addressing_mode)]
    pub mode: Option<AddressingMode>,

    /// Log at debug level (overridden by `RUST_LOG`).
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Segment the conversation into turns and print each turn's participation shift.
    Annotate(InputArgs),
    /// Print frequency and conditional-probability rows.
    Stats(StatsArgs),
    /// Print turn-receiving, targeting and termination propensities, per part when segmented.
    Propensities(StatsArgs),
    /// Print the full analysis report.
    Analyze(StatsArgs),
    /// Describe a participation shift code.
    Code(CodeArgs),
}
