use chrono::prelude::*;
use chrono_tz::Tz;

/// Parses a `YYYY-M-D` date string into its parts, rejecting
/// out-of-range components.
pub fn parse_date(datestr: &str) -> anyhow::Result<(i32, u32, u32)> {
    let parts = datestr.split('-').collect::<Vec<_>>();
    if parts.len() != 3 {
        return Err(anyhow::Error::msg(datestr.to_string()));
    }

    let year: i32 = parts[0]
        .parse()
        .map_err(|_| anyhow::Error::msg(datestr.to_string()))?;
    let month: u32 = parts[1]
        .parse()
        .map_err(|_| anyhow::Error::msg(datestr.to_string()))?;
    let day: u32 = parts[2]
        .parse()
        .map_err(|_| anyhow::Error::msg(datestr.to_string()))?;

    if !(1970..=2100).contains(&year) || !(1..=12).contains(&month) {
        return Err(anyhow::Error::msg(datestr.to_string()));
    }
    if day < 1 || day > month_length(year, month) {
        return Err(anyhow::Error::msg(datestr.to_string()));
    }

    Ok((year, month, day))
}

/// The timestamp in millis of `minute_of_day` on the given date in the
/// given timezone.
pub fn timestamp_at_minute(
    (year, month, day): (i32, u32, u32),
    minute_of_day: u32,
    tz: Tz,
) -> i64 {
    tz.ymd(year, month, day)
        .and_hms(minute_of_day / 60, minute_of_day % 60, 0)
        .timestamp_millis()
}

fn is_leap_year(year: i32) -> bool {
    year % 400 == 0 || (year % 100 != 0 && year % 4 == 0)
}

// month: January -> 1
fn month_length(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => panic!("Invalid month"),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_accepts_valid_dates() {
        let valid_dates = vec![
            "2018-1-1",
            "2025-12-31",
            "2020-2-29",
            "2020-02-2",
            "2025-06-10",
        ];

        for date in &valid_dates {
            assert!(parse_date(date).is_ok());
        }
    }

    #[test]
    fn it_rejects_invalid_dates() {
        let invalid_dates = vec![
            "2018--1-1",
            "2020-1-32",
            "2020-2-30",
            "2021-2-29",
            "2020-0-1",
            "2020-1-0",
            "20200101",
        ];

        for date in &invalid_dates {
            assert!(parse_date(date).is_err());
        }
    }

    #[test]
    fn it_computes_timestamps_within_a_date() {
        let date = parse_date("2025-06-10").unwrap();
        let eight = timestamp_at_minute(date, 8 * 60, chrono_tz::UTC);
        let nine = timestamp_at_minute(date, 9 * 60, chrono_tz::UTC);
        assert_eq!(nine - eight, 1000 * 60 * 60);

        let midnight = timestamp_at_minute(date, 0, chrono_tz::UTC);
        assert_eq!(
            midnight,
            chrono::Utc.ymd(2025, 6, 10).and_hms(0, 0, 0).timestamp_millis()
        );
    }
}
