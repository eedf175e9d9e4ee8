//! Time utilities

use chrono::{DateTime, Utc};

/// 현재 UTC 타임스탬프 (밀리초)
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// 밀리초를 DateTime으로 변환
pub fn ms_to_datetime(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or_else(Utc::now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_ms_roundtrip() {
        let ms = now_ms();
        assert!(ms > 1_600_000_000_000);
        assert_eq!(ms_to_datetime(ms).timestamp_millis(), ms);
    }
}
