use parshift_core::models::AddressingMode;
use parshift_core::stats::MAX_SEGMENTS;

pub(super) fn parse_addressing_mode(raw: &str) -> std::result::Result<AddressingMode, String> {
    raw.parse::<AddressingMode>()
        .map_err(|_| format!("mode must be 'reply' or 'target', got '{raw}'"))
}

pub(super) fn parse_segment_count(raw: &str) -> std::result::Result<usize, String> {
    let value = raw
        .parse::<usize>()
        .map_err(|_| format!("invalid integer value '{raw}'"))?;
    if !(1..=MAX_SEGMENTS).contains(&value) {
        return Err(format!(
            "segments must be within 1..={MAX_SEGMENTS}, got {value}"
        ));
    }
    Ok(value)
}
