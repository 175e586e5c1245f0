use thiserror::Error;

#[derive(Error, Debug)]
#[error("Provided timespan start: {start_ts} and end: {end_ts} is invalid, end must be after start")]
pub struct InvalidTimeSpan {
    pub start_ts: i64,
    pub end_ts: i64,
}

/// A half-open interval `[start_ts, end_ts)` in unix millis.
/// `end_ts` is always strictly greater than `start_ts`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSpan {
    start_ts: i64,
    end_ts: i64,
}

impl TimeSpan {
    pub fn new(start_ts: i64, end_ts: i64) -> Result<Self, InvalidTimeSpan> {
        if end_ts <= start_ts {
            return Err(InvalidTimeSpan { start_ts, end_ts });
        }
        Ok(Self { start_ts, end_ts })
    }

    pub fn start(&self) -> i64 {
        self.start_ts
    }

    pub fn end(&self) -> i64 {
        self.end_ts
    }

    pub fn duration(&self) -> i64 {
        self.end_ts - self.start_ts
    }

    pub fn greater_than(&self, duration_limit: i64) -> bool {
        self.duration() > duration_limit
    }

    /// Half-open overlap check, two spans that only touch at an
    /// endpoint do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        other.start_ts < self.end_ts && other.end_ts > self.start_ts
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn span(start: i64, end: i64) -> TimeSpan {
        TimeSpan::new(start, end).expect("Valid timespan")
    }

    #[test]
    fn it_rejects_invalid_timespans() {
        assert!(TimeSpan::new(10, 10).is_err());
        assert!(TimeSpan::new(10, 5).is_err());
        assert!(TimeSpan::new(10, 11).is_ok());
    }

    #[test]
    fn overlapping_spans() {
        assert!(span(0, 10).overlaps(&span(5, 15)));
        assert!(span(5, 15).overlaps(&span(0, 10)));
        assert!(span(0, 10).overlaps(&span(2, 8)));
        assert!(span(2, 8).overlaps(&span(0, 10)));
        assert!(span(0, 10).overlaps(&span(0, 10)));
        assert!(span(0, 10).overlaps(&span(9, 10)));
    }

    #[test]
    fn touching_endpoints_do_not_overlap() {
        assert!(!span(0, 10).overlaps(&span(10, 20)));
        assert!(!span(10, 20).overlaps(&span(0, 10)));
        assert!(!span(0, 10).overlaps(&span(20, 30)));
    }
}
