use chrono::{NaiveDateTime, ParseResult};

/// Wire format of every timestamp and date exchanged with clients
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Formats a UTC timestamp as `YYYY-MM-DDTHH:MM:SSZ`
pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a `YYYY-MM-DDTHH:MM:SSZ` string into a UTC timestamp
pub fn parse_timestamp(value: &str) -> ParseResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
}
