use chrono::{DateTime, Datelike, Utc};

/// Formats a due date for list views as "{Mon} {day}{suffix}", e.g.
/// "Jan 2nd". A missing due date stays `None` rather than becoming an error
/// or a placeholder string.
pub fn format_due_date(due_date: Option<DateTime<Utc>>) -> Option<String> {
    due_date.map(|date| {
        let day = date.day();
        format!("{} {}{}", date.format("%b"), day, ordinal_suffix(day))
    })
}

fn ordinal_suffix(day: u32) -> &'static str {
    match day % 100 {
        11 | 12 | 13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_none_stays_none() {
        assert_eq!(format_due_date(None), None);
    }

    #[test]
    fn test_ordinal_suffixes() {
        assert_eq!(format_due_date(date(2024, 1, 1)).as_deref(), Some("Jan 1st"));
        assert_eq!(format_due_date(date(2024, 1, 2)).as_deref(), Some("Jan 2nd"));
        assert_eq!(format_due_date(date(2024, 1, 3)).as_deref(), Some("Jan 3rd"));
        assert_eq!(format_due_date(date(2024, 1, 4)).as_deref(), Some("Jan 4th"));
        assert_eq!(
            format_due_date(date(2024, 3, 11)).as_deref(),
            Some("Mar 11th")
        );
        assert_eq!(
            format_due_date(date(2024, 3, 12)).as_deref(),
            Some("Mar 12th")
        );
        assert_eq!(
            format_due_date(date(2024, 3, 13)).as_deref(),
            Some("Mar 13th")
        );
        assert_eq!(
            format_due_date(date(2024, 8, 21)).as_deref(),
            Some("Aug 21st")
        );
        assert_eq!(
            format_due_date(date(2024, 8, 22)).as_deref(),
            Some("Aug 22nd")
        );
        assert_eq!(
            format_due_date(date(2024, 12, 31)).as_deref(),
            Some("Dec 31st")
        );
    }
}
