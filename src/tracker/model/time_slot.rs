use std::{fmt::Display, ops::Range};

use serde::{Deserialize, Serialize};

/// Part of the day a log entry was accepted in. Boundaries are half-open hour ranges:
/// `[6, 12)`, `[12, 18)`, `[18, 22)` and everything else is night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 4] = [
        TimeSlot::Morning,
        TimeSlot::Afternoon,
        TimeSlot::Evening,
        TimeSlot::Night,
    ];

    /// Classifies an hour of day. Ranges are checked in order and the first match wins, so any
    /// value outside 6..22 (including nonsense above 23) is night.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..12 => TimeSlot::Morning,
            12..18 => TimeSlot::Afternoon,
            18..22 => TimeSlot::Evening,
            _ => TimeSlot::Night,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "Morning",
            TimeSlot::Afternoon => "Afternoon",
            TimeSlot::Evening => "Evening",
            TimeSlot::Night => "Night",
        }
    }

    /// First hour belonging to the slot.
    pub fn start_hour(&self) -> u32 {
        match self {
            TimeSlot::Morning => 6,
            TimeSlot::Afternoon => 12,
            TimeSlot::Evening => 18,
            TimeSlot::Night => 22,
        }
    }

    /// First hour after the slot. Night wraps around midnight, so its end is smaller than its
    /// start.
    pub fn end_hour(&self) -> u32 {
        match self {
            TimeSlot::Night => TimeSlot::Morning.start_hour(),
            _ => self.next().start_hour(),
        }
    }

    /// Half-open hour ranges covered by the slot. Night wraps around midnight, so it is split
    /// into `22..24` and `0..6`.
    pub fn hours(&self) -> Vec<Range<u32>> {
        let (start, end) = (self.start_hour(), self.end_hour());
        if start < end {
            vec![start..end]
        } else {
            vec![start..24, 0..end]
        }
    }

    pub fn contains_hour(&self, hour: u32) -> bool {
        TimeSlot::from_hour(hour) == *self
    }

    fn next(&self) -> Self {
        match self {
            TimeSlot::Morning => TimeSlot::Afternoon,
            TimeSlot::Afternoon => TimeSlot::Evening,
            TimeSlot::Evening => TimeSlot::Night,
            TimeSlot::Night => TimeSlot::Morning,
        }
    }
}

impl Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::TimeSlot;

    #[test]
    fn test_every_hour_has_expected_slot() {
        let expected = [
            (0..6, TimeSlot::Night),
            (6..12, TimeSlot::Morning),
            (12..18, TimeSlot::Afternoon),
            (18..22, TimeSlot::Evening),
            (22..24, TimeSlot::Night),
        ];
        for (hours, slot) in expected {
            for hour in hours {
                assert_eq!(TimeSlot::from_hour(hour), slot, "hour {hour}");
            }
        }
    }

    #[test]
    fn test_boundaries_belong_to_starting_slot() {
        assert_eq!(TimeSlot::from_hour(5), TimeSlot::Night);
        assert_eq!(TimeSlot::from_hour(6), TimeSlot::Morning);
        assert_eq!(TimeSlot::from_hour(12), TimeSlot::Afternoon);
        assert_eq!(TimeSlot::from_hour(18), TimeSlot::Evening);
        assert_eq!(TimeSlot::from_hour(22), TimeSlot::Night);
        assert_eq!(TimeSlot::from_hour(23), TimeSlot::Night);
    }

    #[test]
    fn test_start_hours_classify_to_own_slot() {
        for slot in TimeSlot::ALL {
            assert!(slot.contains_hour(slot.start_hour()));
            assert!(!slot.contains_hour(slot.end_hour()));
        }
    }

    #[test]
    fn test_hours_partition_the_day() {
        assert_eq!(TimeSlot::Morning.hours(), vec![6..12]);
        assert_eq!(TimeSlot::Afternoon.hours(), vec![12..18]);
        assert_eq!(TimeSlot::Evening.hours(), vec![18..22]);
        assert_eq!(TimeSlot::Night.hours(), vec![22..24, 0..6]);

        for hour in 0..24 {
            let owners = TimeSlot::ALL
                .iter()
                .filter(|slot| slot.hours().iter().any(|range| range.contains(&hour)))
                .collect::<Vec<_>>();
            assert_eq!(owners, vec![&TimeSlot::from_hour(hour)], "hour {hour}");
        }
    }

    #[test]
    fn test_out_of_range_hour_is_night() {
        assert_eq!(TimeSlot::from_hour(24), TimeSlot::Night);
        assert_eq!(TimeSlot::from_hour(u32::MAX), TimeSlot::Night);
    }
}
