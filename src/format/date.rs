//! # Date helpers with .NET-style format strings.
//!
//! | Specifier | Output                                   |
//! |-----------|------------------------------------------|
//! | `d` `dd`  | day of month, `dd` zero-padded           |
//! | `ddd`     | abbreviated weekday (`Tue`)              |
//! | `dddd`    | full weekday (`Tuesday`)                 |
//! | `f` `ff` `fff` | tenths / hundredths / milliseconds  |
//! | `h` `hh`  | 12-hour clock (1..12)                    |
//! | `H` `HH`  | 24-hour clock (0..23)                    |
//! | `m` `mm`  | minute                                   |
//! | `M` `MM`  | month number                             |
//! | `MMM`     | abbreviated month (`Mar`)                |
//! | `MMMM`    | full month (`March`)                     |
//! | `s` `ss`  | second                                   |
//! | `t` `tt`  | `A`/`P`, `AM`/`PM`                       |
//! | `yy`      | two-digit year                           |
//! | `yyyy`    | full year                                |
//!
//! Text inside `{...}` is copied verbatim (without the braces). UTC versus local
//! output is chosen by the time zone of the value passed in.

use std::fmt::{Display, Write};

use chrono::{DateTime, Datelike, Days, TimeZone, Timelike};

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const DAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Formatting extension for anything with a date and a time of day.
pub trait DateFormat: Datelike + Timelike + Display {
    /// Renders `self` with `format` (see the module table).
    ///
    /// A blank format falls back to `Display`.
    fn to_string_format(&self, format: &str) -> String {
        if format.trim().is_empty() {
            return self.to_string();
        }
        render(self, format)
    }

    /// `true` if the year of `self` is a leap year.
    fn is_leap_year(&self) -> bool {
        is_leap_year(self.year())
    }
}

impl<T: Datelike + Timelike + Display> DateFormat for T {}

/// Gregorian leap year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Moves `dt` by `days` calendar days, keeping the local time of day.
///
/// Returns `None` when the result is out of range or does not exist in the zone.
pub fn add_days<Tz: TimeZone>(dt: DateTime<Tz>, days: i64) -> Option<DateTime<Tz>> {
    let n = Days::new(days.unsigned_abs());
    if days >= 0 {
        dt.checked_add_days(n)
    } else {
        dt.checked_sub_days(n)
    }
}

/// Longest token first.
fn token_lengths(c: char) -> &'static [usize] {
    match c {
        'd' | 'M' => &[4, 3, 2, 1],
        'f' => &[3, 2, 1],
        'h' | 'H' | 'm' | 's' | 't' => &[2, 1],
        'y' => &[4, 2],
        _ => &[],
    }
}

fn render<T: Datelike + Timelike + ?Sized>(dt: &T, format: &str) -> String {
    let chars: Vec<char> = format.chars().collect();
    let mut out = String::with_capacity(format.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '{' => {
                let close = chars[i + 1..].iter().position(|&x| x == '}');
                let end = close.map_or(chars.len(), |p| i + 1 + p);
                out.extend(&chars[i + 1..end]);
                i = end + 1;
            }
            '}' => i += 1,
            _ => {
                let run = chars[i..].iter().take_while(|&&x| x == c).count();
                match token_lengths(c).iter().copied().find(|&n| n <= run) {
                    Some(n) => {
                        push_token(&mut out, dt, c, n);
                        i += n;
                    }
                    None => {
                        out.push(c);
                        i += 1;
                    }
                }
            }
        }
    }
    out
}

fn push_token<T: Datelike + Timelike + ?Sized>(out: &mut String, dt: &T, c: char, n: usize) {
    let millis = (dt.nanosecond() / 1_000_000).min(999);
    let hour12 = match dt.hour() % 12 {
        0 => 12,
        h => h,
    };
    let pm = dt.hour() >= 12;
    let month = MONTHS[dt.month0() as usize];
    let day = DAYS[dt.weekday().num_days_from_sunday() as usize];

    // Writing into a String cannot fail.
    let _ = match (c, n) {
        ('y', 4) => write!(out, "{}", dt.year()),
        ('y', _) => write!(out, "{:02}", dt.year().rem_euclid(100)),
        ('M', 4) => write!(out, "{month}"),
        ('M', 3) => write!(out, "{}", &month[..3]),
        ('M', 2) => write!(out, "{:02}", dt.month()),
        ('M', _) => write!(out, "{}", dt.month()),
        ('d', 4) => write!(out, "{day}"),
        ('d', 3) => write!(out, "{}", &day[..3]),
        ('d', 2) => write!(out, "{:02}", dt.day()),
        ('d', _) => write!(out, "{}", dt.day()),
        ('H', 2) => write!(out, "{:02}", dt.hour()),
        ('H', _) => write!(out, "{}", dt.hour()),
        ('h', 2) => write!(out, "{hour12:02}"),
        ('h', _) => write!(out, "{hour12}"),
        ('m', 2) => write!(out, "{:02}", dt.minute()),
        ('m', _) => write!(out, "{}", dt.minute()),
        ('s', 2) => write!(out, "{:02}", dt.second()),
        ('s', _) => write!(out, "{}", dt.second()),
        ('f', 3) => write!(out, "{millis:03}"),
        ('f', 2) => write!(out, "{:02}", millis / 10),
        ('f', _) => write!(out, "{}", millis / 100),
        ('t', 2) => out.write_str(if pm { "PM" } else { "AM" }),
        ('t', _) => out.write_str(if pm { "P" } else { "A" }),
        _ => write!(out, "{c}"),
    };
}
