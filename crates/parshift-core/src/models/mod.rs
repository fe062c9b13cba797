mod analysis;
mod conversation;
mod statistics;
mod turn;

pub use analysis::{AnalysisReport, StatisticsSection};
pub use conversation::{Addressing, AddressingMode, Conversation, Message};
pub(crate) use conversation::is_blank_identifier;
pub use statistics::{
    FrequencyTable, Propensities, SegmentStatistics, ShiftTypeShare, StatisticsRow,
};
pub use turn::{Addressee, AnnotatedTurn, Classification, GROUP_ADDRESSEE, Turn};
