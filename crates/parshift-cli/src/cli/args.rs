use std::path::PathBuf;

use clap::Args;

use super::parsers::parse_segment_count;

#[derive(Debug, Args)]
pub struct InputArgs {
    /// Conversation file: a JSON array or JSON Lines of
    /// `{id, user_id, message_text, reply_id | target_id}` records.
    pub input: PathBuf,
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    pub input: PathBuf,
    /// Split the conversation into this many parts (1-4). Defaults to `PARSHIFT_SEGMENTS` or 1.
    #[arg(long, value_parser = parse_segment_count)]
    pub segments: Option<usize>,
    /// Fail instead of reporting 0 when a subgroup is empty.
    #[arg(long, default_value_t = false)]
    pub strict_zero_division: bool,
}

#[derive(Debug, Args)]
pub struct CodeArgs {
    /// Participation shift code, e.g. `AB-BA`.
    pub code: String,
}
