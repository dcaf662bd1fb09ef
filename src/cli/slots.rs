use crate::tracker::model::time_slot::TimeSlot;

/// One row per slot, e.g. `Morning    06:00 - 12:00`.
pub fn slot_table() -> Vec<String> {
    TimeSlot::ALL
        .iter()
        .map(|slot| {
            format!(
                "{:<10} {:02}:00 - {:02}:00",
                slot.label(),
                slot.start_hour(),
                slot.end_hour()
            )
        })
        .collect()
}

pub fn print_slots() {
    for row in slot_table() {
        println!("{row}");
    }
}

#[cfg(test)]
mod tests {
    use super::slot_table;

    #[test]
    fn table_covers_day() {
        assert_eq!(
            slot_table(),
            vec![
                "Morning    06:00 - 12:00",
                "Afternoon  12:00 - 18:00",
                "Evening    18:00 - 22:00",
                "Night      22:00 - 06:00",
            ]
        );
    }
}
