//! Billing-period formatting shared by the scheduler descriptions and
//! off-chain callers.

const MINUTE: i64 = 60;
const HOUR: i64 = 3_600;
const DAY: i64 = 86_400;
const WEEK: i64 = 604_800;
const MONTH: i64 = 2_592_000; // 30 days
const YEAR: i64 = 31_536_000; // 365 days

/// Renders a billing period as a human-readable duration.
///
/// Uses the largest unit that fits at least once: 60s minute, 3600s hour,
/// 86400s day, 604800s week, 2592000s (30-day) month, 31536000s year.
/// `format_period(2_592_000)` is `"1 month"`.
pub fn format_period(seconds: i64) -> String {
    let (count, unit) = if seconds >= YEAR {
        (seconds / YEAR, "year")
    } else if seconds >= MONTH {
        (seconds / MONTH, "month")
    } else if seconds >= WEEK {
        (seconds / WEEK, "week")
    } else if seconds >= DAY {
        (seconds / DAY, "day")
    } else if seconds >= HOUR {
        (seconds / HOUR, "hour")
    } else if seconds >= MINUTE {
        (seconds / MINUTE, "minute")
    } else {
        (seconds.max(0), "second")
    };

    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_boundaries() {
        assert_eq!(format_period(60), "1 minute");
        assert_eq!(format_period(3_600), "1 hour");
        assert_eq!(format_period(86_400), "1 day");
        assert_eq!(format_period(604_800), "1 week");
        assert_eq!(format_period(2_592_000), "1 month");
        assert_eq!(format_period(31_536_000), "1 year");
    }

    #[test]
    fn below_boundary_stays_in_smaller_unit() {
        assert_eq!(format_period(59), "59 seconds");
        assert_eq!(format_period(3_599), "59 minutes");
        assert_eq!(format_period(86_399), "23 hours");
        assert_eq!(format_period(604_799), "6 days");
        assert_eq!(format_period(2_591_999), "4 weeks");
        assert_eq!(format_period(31_535_999), "12 months");
    }

    #[test]
    fn plural_counts() {
        assert_eq!(format_period(5_184_000), "2 months");
        assert_eq!(format_period(120), "2 minutes");
        assert_eq!(format_period(45), "45 seconds");
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(format_period(0), "0 seconds");
        assert_eq!(format_period(-5), "0 seconds");
        assert_eq!(format_period(1), "1 second");
    }
}
