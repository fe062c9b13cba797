use std::io::{self, Write};

use anyhow::Result;
use parshift_core::models::{AnnotatedTurn, Classification};

pub(super) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

pub(super) fn classifications_of(turns: &[AnnotatedTurn]) -> Vec<Classification> {
    turns
        .iter()
        .map(|annotated| annotated.classification.clone())
        .collect()
}
