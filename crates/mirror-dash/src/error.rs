/// Widget construction failure.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ClockError {
    #[error("panel `{0}` not found in layout")]
    PanelNotFound(String),

    #[error("no font bound for `{0}`")]
    MissingFont(&'static str),
}

/// Malformed time-of-day or UTC offset text.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("invalid time of day `{0}` (expected HH:MM)")]
    TimeOfDay(String),

    #[error("invalid UTC offset `{0}` (expected ±HH:MM)")]
    UtcOffset(String),
}
