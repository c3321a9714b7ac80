//! Text labels backed by fixed size buffers

use core::fmt;

use chrono::Weekday;

use super::ClockReading;

/// Longest time string the face produces
const LONGEST_TIME: &str = "12:59 PM";
/// Longest date string the face produces
const LONGEST_DATE: &str = "Wednesday, Sep 30";

pub const TIME_BUF_LEN: usize = 9;
pub const DATE_BUF_LEN: usize = 18;

// Buffers must stay strictly larger than anything written into them
const _: () = assert!(LONGEST_TIME.len() < TIME_BUF_LEN);
const _: () = assert!(LONGEST_DATE.len() < DATE_BUF_LEN);

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Text label reusing the same buffer for every update
pub struct Label<const N: usize> {
    str_buf: [u8; N],
}

impl<const N: usize> Default for Label<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Label<N> {
    /// Create new label
    pub const fn new() -> Self {
        Self { str_buf: [0; N] }
    }

    /// Overwrite the label text.
    ///
    /// Fails if the formatted text does not fit the buffer.
    pub fn show(&mut self, args: fmt::Arguments<'_>) -> Result<&str, fmt::Error> {
        format_no_std::show(&mut self.str_buf, args)
    }
}

/// Format the time of `reading` as `HH:MM` or `H:MM AM`
pub fn format_time<'a, const N: usize>(
    label: &'a mut Label<N>,
    reading: &ClockReading,
) -> Result<&'a str, fmt::Error> {
    if reading.twenty_four_hour {
        label.show(format_args!("{:02}:{:02}", reading.hour, reading.minute))
    } else {
        // No padding on the hour of a 12 hour clock
        label.show(format_args!(
            "{}:{:02} {}",
            reading.hour12(),
            reading.minute,
            if reading.is_pm() { "PM" } else { "AM" }
        ))
    }
}

/// Format the date of `reading` as `Weekday, Mon D`
pub fn format_date<'a, const N: usize>(
    label: &'a mut Label<N>,
    reading: &ClockReading,
) -> Result<&'a str, fmt::Error> {
    let month = MONTHS
        .get(usize::from(reading.month).wrapping_sub(1))
        .ok_or(fmt::Error)?;
    label.show(format_args!(
        "{}, {} {}",
        weekday_name(reading.weekday),
        month,
        reading.day
    ))
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
