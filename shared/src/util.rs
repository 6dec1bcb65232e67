use chrono::{DateTime, TimeZone, Utc};

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert stored epoch milliseconds into a UTC datetime.
///
/// Out-of-range values clamp to the Unix epoch rather than failing a whole listing.
pub fn millis_to_datetime(millis: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// Generate a Snowflake-style i64 for use as resource ID.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: random (4096 values per ms)
///
/// IDs are strictly increasing within a process, so ordering by id breaks
/// ties between rows written in the same millisecond.
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    use std::sync::atomic::{AtomicI64, Ordering};

    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    static LAST: AtomicI64 = AtomicI64::new(0);

    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000); // 12 bits
    let candidate = (ts << 12) | rand_bits;

    let mut last = LAST.load(Ordering::Relaxed);
    loop {
        let next = candidate.max(last + 1);
        match LAST.compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(actual) => last = actual,
        }
    }
}

/// Parse a wire id (decimal string) into the numeric row id.
pub fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}
