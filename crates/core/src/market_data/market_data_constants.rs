use chrono::Duration;

/// How long a cached quote is served before a provider refresh is
/// attempted. Mirrors the hourly refresh window of the quote cache.
pub const QUOTE_MAX_AGE_SECONDS: i64 = 60 * 60;

/// [`QUOTE_MAX_AGE_SECONDS`] as a chrono duration.
pub fn quote_max_age() -> Duration {
    Duration::seconds(QUOTE_MAX_AGE_SECONDS)
}
