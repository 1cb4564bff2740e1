use chrono::{DateTime, FixedOffset, Utc};

/// JST is UTC+9
const JST_OFFSET_SECS: i32 = 9 * 3600;

fn jst() -> FixedOffset {
    FixedOffset::east_opt(JST_OFFSET_SECS).expect("JST offset is within +-24h")
}

/// Get current Unix timestamp in JST (milliseconds)
pub fn get_jst_timestamp() -> i64 {
    let now_jst: DateTime<FixedOffset> = Utc::now().with_timezone(&jst());
    now_jst.timestamp_millis()
}

/// Convert a Unix timestamp (milliseconds) to an RFC 3339 string in JST.
///
/// Out-of-range values fall back to the Unix epoch.
pub fn timestamp_to_jst_rfc3339(timestamp_ms: i64) -> String {
    to_jst(timestamp_ms).to_rfc3339()
}

/// Format a Unix timestamp (milliseconds) as `HH:MM:SS` in JST.
pub fn timestamp_to_jst_clock(timestamp_ms: i64) -> String {
    to_jst(timestamp_ms).format("%H:%M:%S").to_string()
}

fn to_jst(timestamp_ms: i64) -> DateTime<FixedOffset> {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .unwrap_or_default()
        .with_timezone(&jst())
}
