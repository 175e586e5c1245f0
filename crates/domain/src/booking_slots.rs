use crate::date;
use crate::timespan::TimeSpan;
use chrono_tz::Tz;
use serde::Serialize;

/// A free interval on a resource that a reservation of the requested
/// duration would fit into.
#[derive(Serialize, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BookingSlot {
    pub start_ts: i64,
    pub end_ts: i64,
}

/// The hours of a day during which resources are bookable, expressed as
/// minutes from midnight. Half-open: a slot may end exactly at
/// `close_minute` but not extend past it.
#[derive(Debug, Clone)]
pub struct BusinessHours {
    pub open_minute: u32,
    pub close_minute: u32,
    pub timezone: Tz,
}

impl BusinessHours {
    /// The `[open, close)` window for a parsed date.
    pub fn window(&self, date: (i32, u32, u32)) -> (i64, i64) {
        (
            date::timestamp_at_minute(date, self.open_minute, self.timezone),
            date::timestamp_at_minute(date, self.close_minute, self.timezone),
        )
    }
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            open_minute: 8 * 60,
            close_minute: 18 * 60,
            timezone: chrono_tz::UTC,
        }
    }
}

pub struct BookingSlotsOptions {
    pub open_ts: i64,
    pub close_ts: i64,
    pub duration: i64,
    pub interval: i64,
}

fn first_busy_overlap<'a>(
    cursor: i64,
    duration: i64,
    busy: &'a [TimeSpan],
) -> Option<&'a TimeSpan> {
    busy.iter()
        .find(|span| span.start() < cursor + duration && span.end() > cursor)
}

/// Walks candidate start times from `open_ts` forward in `interval`
/// steps and emits every candidate of `duration` length that fits inside
/// the window without overlapping any busy span. Pure and restartable,
/// results reflect the busy set it was handed and may race with
/// concurrent bookings.
pub fn get_booking_slots(busy: &[TimeSpan], options: &BookingSlotsOptions) -> Vec<BookingSlot> {
    let mut booking_slots = Vec::new();
    let &BookingSlotsOptions {
        open_ts,
        close_ts,
        duration,
        interval,
    } = options;

    if duration < 1 || interval < 1 {
        return booking_slots;
    }

    let mut cursor = open_ts;
    while cursor + duration <= close_ts {
        if first_busy_overlap(cursor, duration, busy).is_none() {
            booking_slots.push(BookingSlot {
                start_ts: cursor,
                end_ts: cursor + duration,
            });
        }

        cursor += interval;
    }

    booking_slots
}

pub fn validate_slots_duration(duration: i64) -> bool {
    let min_duration = 1000 * 60 * 15;
    let max_duration = 1000 * 60 * 60 * 10;
    duration >= min_duration && duration <= max_duration
}

pub struct BookingSlotsQuery {
    pub date: String,
    pub duration: i64,
}

#[derive(Debug)]
pub enum BookingQueryError {
    InvalidDuration,
    InvalidDate(String),
}

pub fn validate_bookingslots_query(
    query: &BookingSlotsQuery,
    business_hours: &BusinessHours,
) -> Result<BookingSlotsOptions, BookingQueryError> {
    if !validate_slots_duration(query.duration) {
        return Err(BookingQueryError::InvalidDuration);
    }

    let parsed_date = match date::parse_date(&query.date) {
        Ok(val) => val,
        Err(_) => return Err(BookingQueryError::InvalidDate(query.date.clone())),
    };

    let (open_ts, close_ts) = business_hours.window(parsed_date);

    Ok(BookingSlotsOptions {
        open_ts,
        close_ts,
        duration: query.duration,
        interval: 1000 * 60 * 30,
    })
}
