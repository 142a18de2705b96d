use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// Fixed avatar palette. Assignment must stay byte-identical across
/// releases, so the order is load-bearing.
const PROGRAM_PALETTE: [&str; 12] = [
    "#2080f0", "#18a058", "#f0a020", "#d03050", "#8a2be2", "#1890ff", "#52c41a", "#faad14",
    "#722ed1", "#eb2f96", "#f5222d", "#fa541c",
];

/// Formats a backend timestamp relative to today's calendar date.
///
/// Empty or unparseable input yields an empty string; a program with a
/// broken timestamp renders with no date rather than an error.
pub fn format_date(raw: &str) -> String {
    format_date_on(raw, Local::now().date_naive())
}

/// Same as [`format_date`] with an explicit "today", so the bucket
/// boundaries are testable without faking the clock.
pub fn format_date_on(raw: &str, today: NaiveDate) -> String {
    let Some(date) = parse_calendar_date(raw) else {
        return String::new();
    };

    // Compare calendar dates only; two timestamps on the same day are
    // both "Today" regardless of clock time.
    let diff_days = today.signed_duration_since(date).num_days();
    match diff_days {
        0 => "Today".to_owned(),
        1 => "Yesterday".to_owned(),
        2..=7 => format!("{diff_days} days ago"),
        _ => date.format("%b %-d, %Y").to_string(),
    }
}

fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    if raw.is_empty() {
        return None;
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Local).date_naive());
    }

    if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(timestamp.date());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Picks a deterministic palette color for a program name.
///
/// The hash folds each UTF-16 code unit via `code + ((hash << 5) - hash)`
/// in wrapping signed 32-bit arithmetic; keeping that exact overflow
/// behavior keeps avatar colors stable for data created by older builds.
pub fn program_color(name: &str) -> &'static str {
    let mut hash: i32 = 0;
    for code in name.encode_utf16() {
        hash = (hash << 5).wrapping_sub(hash).wrapping_add(i32::from(code));
    }

    let index = hash.unsigned_abs() as usize % PROGRAM_PALETTE.len();
    PROGRAM_PALETTE[index]
}

/// Extracts up to two uppercase initials for avatar display.
///
/// Splits on single spaces and skips empty tokens, so consecutive or
/// trailing spaces contribute nothing.
pub fn initials(name: &str) -> String {
    name.split(' ')
        .filter_map(|word| word.chars().next())
        .collect::<String>()
        .to_uppercase()
        .chars()
        .take(2)
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{PROGRAM_PALETTE, format_date, format_date_on, initials, program_color};

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, 15).expect("fixed date should be valid")
    }

    #[test]
    fn format_date_returns_empty_for_empty_input() {
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn format_date_returns_empty_for_unparseable_input() {
        assert_eq!(format_date_on("not-a-date", fixed_today()), "");
        assert_eq!(format_date_on("2023-13-45", fixed_today()), "");
    }

    #[test]
    fn format_date_buckets_today_regardless_of_clock_time() {
        assert_eq!(format_date_on("2023-01-15T00:00:00", fixed_today()), "Today");
        assert_eq!(
            format_date_on("2023-01-15T23:59:59.123", fixed_today()),
            "Today"
        );
    }

    #[test]
    fn format_date_buckets_yesterday() {
        assert_eq!(
            format_date_on("2023-01-14T08:30:00", fixed_today()),
            "Yesterday"
        );
    }

    #[test]
    fn format_date_buckets_recent_days() {
        assert_eq!(format_date_on("2023-01-10", fixed_today()), "5 days ago");
        assert_eq!(format_date_on("2023-01-08", fixed_today()), "7 days ago");
    }

    #[test]
    fn format_date_uses_short_form_beyond_a_week() {
        assert_eq!(
            format_date_on("2022-12-16T12:00:00", fixed_today()),
            "Dec 16, 2022"
        );
    }

    #[test]
    fn format_date_uses_short_form_for_future_dates() {
        assert_eq!(
            format_date_on("2023-02-01T00:00:00", fixed_today()),
            "Feb 1, 2023"
        );
    }

    #[test]
    fn format_date_accepts_bare_dates() {
        assert_eq!(format_date_on("2023-01-15", fixed_today()), "Today");
    }

    #[test]
    fn program_color_is_deterministic() {
        assert_eq!(program_color("Test Program"), program_color("Test Program"));
    }

    #[test]
    fn program_color_matches_reference_assignment() {
        assert_eq!(program_color("Cardio"), "#52c41a");
    }

    #[test]
    fn program_color_stays_in_palette_for_arbitrary_input() {
        for name in ["", "x", "Full Body Workout", &"overflow".repeat(64)] {
            assert!(PROGRAM_PALETTE.contains(&program_color(name)));
        }
    }

    #[test]
    fn initials_returns_empty_for_empty_name() {
        assert_eq!(initials(""), "");
    }

    #[test]
    fn initials_uses_first_letter_of_single_word() {
        assert_eq!(initials("Cardio"), "C");
    }

    #[test]
    fn initials_truncates_to_two_uppercase_letters() {
        assert_eq!(initials("Full Body Workout"), "FB");
        assert_eq!(initials("push pull"), "PP");
    }

    #[test]
    fn initials_skips_empty_tokens_from_repeated_spaces() {
        assert_eq!(initials("Leg  Day"), "LD");
        assert_eq!(initials("Deload "), "D");
        assert_eq!(initials("  Core"), "C");
    }
}
