use std::{fmt::Display, str::FromStr};

use anyhow::{anyhow, bail};
use chrono::{DateTime, FixedOffset, Local, Utc};

/// Time zone used to derive the calendar fields (hour of day, weekday) of log entries.
///
/// `SystemLocal` follows whatever the host reports at the moment of acceptance, so DST changes
/// are picked up. `Fixed` pins the offset, which keeps classification reproducible across
/// machines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarZone {
    #[default]
    SystemLocal,
    Fixed(FixedOffset),
}

impl CalendarZone {
    pub fn utc() -> Self {
        CalendarZone::Fixed(FixedOffset::east_opt(0).expect("Zero offset is always valid"))
    }

    /// Converts an instant into the wall clock of this zone, keeping the offset that was used.
    pub fn localize(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            CalendarZone::SystemLocal => instant.with_timezone(&Local).fixed_offset(),
            CalendarZone::Fixed(offset) => instant.with_timezone(offset),
        }
    }
}

impl Display for CalendarZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalendarZone::SystemLocal => write!(f, "local"),
            CalendarZone::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

impl FromStr for CalendarZone {
    type Err = anyhow::Error;

    /// Accepts `local`, `utc`/`Z`, or an offset like `+09:00`, `-0530`, `+3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("local") {
            return Ok(CalendarZone::SystemLocal);
        }
        if s.eq_ignore_ascii_case("utc") || s.eq_ignore_ascii_case("z") {
            return Ok(CalendarZone::utc());
        }

        let (sign, rest) = match s.split_at_checked(1) {
            Some(("+", rest)) => (1, rest),
            Some(("-", rest)) => (-1, rest),
            _ => bail!("Offset {s} should start with + or -"),
        };
        let (hours, minutes) = match rest.split_once(':') {
            Some((h, m)) => (h, m),
            None if rest.len() == 4 => match rest.split_at_checked(2) {
                Some(parts) => parts,
                None => bail!("Can't parse {s} into an offset"),
            },
            None => (rest, "0"),
        };
        // Digits only, so a second sign like `+-05:00` is rejected.
        let is_number = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !is_number(hours) || !is_number(minutes) {
            bail!("Can't parse {s} into an offset: expected digits after the sign");
        }
        let hours = hours.parse::<u32>()?;
        let minutes = minutes.parse::<u32>()?;
        if hours > 23 || minutes > 59 {
            bail!("Can't parse {s} into an offset: out of range");
        }
        let seconds = (hours * 3600 + minutes * 60) as i32;

        FixedOffset::east_opt(sign * seconds)
            .map(CalendarZone::Fixed)
            .ok_or_else(|| anyhow!("Can't parse {s} into an offset"))
    }
}

/// Standard way of printing an acceptance instant in notifications.
pub fn format_timestamp(time: &DateTime<FixedOffset>) -> String {
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Minute precision, used by log dumps.
pub fn format_minute(time: &DateTime<FixedOffset>) -> String {
    time.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Timelike};

    use super::*;

    #[test]
    fn parses_zone_variants() {
        assert_eq!("local".parse::<CalendarZone>().unwrap(), CalendarZone::SystemLocal);
        assert_eq!("UTC".parse::<CalendarZone>().unwrap(), CalendarZone::utc());
        assert_eq!(
            "+09:00".parse::<CalendarZone>().unwrap(),
            CalendarZone::Fixed(FixedOffset::east_opt(9 * 3600).unwrap())
        );
        assert_eq!(
            "-0530".parse::<CalendarZone>().unwrap(),
            CalendarZone::Fixed(FixedOffset::west_opt(5 * 3600 + 30 * 60).unwrap())
        );
        assert_eq!(
            "+3".parse::<CalendarZone>().unwrap(),
            CalendarZone::Fixed(FixedOffset::east_opt(3 * 3600).unwrap())
        );
    }

    #[test]
    fn rejects_bad_zones() {
        assert!("09:00".parse::<CalendarZone>().is_err());
        assert!("+25:00".parse::<CalendarZone>().is_err());
        assert!("+01:75".parse::<CalendarZone>().is_err());
        assert!("".parse::<CalendarZone>().is_err());
        assert!("+".parse::<CalendarZone>().is_err());
        assert!("+4000000000".parse::<CalendarZone>().is_err());
    }

    #[test]
    fn rejects_multibyte_offset_without_panicking() {
        let parsed = std::panic::catch_unwind(|| "+1é1".parse::<CalendarZone>());
        assert!(matches!(parsed, Ok(Err(_))));
    }

    #[test]
    fn rejects_doubled_sign() {
        assert!("+-05:00".parse::<CalendarZone>().is_err());
        assert!("-+05:00".parse::<CalendarZone>().is_err());
        assert!("+05:-30".parse::<CalendarZone>().is_err());
    }

    #[test]
    fn fixed_zone_shifts_wall_clock() {
        let instant = Utc.from_utc_datetime(
            &NaiveDate::from_ymd_opt(2018, 7, 4)
                .unwrap()
                .and_hms_opt(23, 30, 0)
                .unwrap(),
        );
        let local = "+09:00".parse::<CalendarZone>().unwrap().localize(instant);
        assert_eq!(local.hour(), 8);
        assert_eq!(format_timestamp(&local), "2018-07-05 08:30:00");
        assert_eq!(format_minute(&local), "2018-07-05 08:30");
    }
}
