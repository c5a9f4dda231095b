//! Timestamp helpers.
//!
//! All timestamps in the system are Unix milliseconds in UTC.

use chrono::Utc;

/// Current Unix timestamp in milliseconds (UTC).
pub fn get_utc_timestamp() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_utc_timestamp_is_recent() {
        // テスト項目: 現在時刻のタイムスタンプが妥当な範囲にある
        // given (前提条件): 2024 年以降に実行される
        let lower_bound = 1_700_000_000_000; // 2023-11-14

        // when (操作):
        let now = get_utc_timestamp();

        // then (期待する結果):
        assert!(now > lower_bound);
    }
}
