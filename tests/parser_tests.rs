use chrono::NaiveDate;
use taskflow::model::{Priority, parse_task_text};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn high_priority_keyword_without_date() {
    let today = day(2026, 3, 10);
    let parsed = parse_task_text("Complete report urgent", today);
    assert_eq!(parsed.title, "Complete report urgent");
    assert_eq!(parsed.priority, Some(Priority::High));
    assert_eq!(parsed.due, None);
    assert_eq!(parsed.description, None);
}

#[test]
fn tomorrow_is_one_calendar_day_out() {
    let today = day(2026, 3, 10);
    let parsed = parse_task_text("Meet with team tomorrow", today);
    assert_eq!(parsed.due, Some(day(2026, 3, 11)));

    // Month rollover
    let parsed = parse_task_text("call back tomorrow", day(2026, 3, 31));
    assert_eq!(parsed.due, Some(day(2026, 4, 1)));
}

#[test]
fn priority_and_date_compose() {
    let today = day(2026, 3, 10);
    let parsed = parse_task_text("Finish slides tomorrow urgent", today);
    assert_eq!(parsed.priority, Some(Priority::High));
    assert_eq!(parsed.due, Some(day(2026, 3, 11)));
}

#[test]
fn priority_scan_order_is_high_medium_low() {
    let today = day(2026, 3, 10);
    // All three levels present: high wins.
    let parsed = parse_task_text("urgent but low and normal", today);
    assert_eq!(parsed.priority, Some(Priority::High));
    // Medium beats low.
    let parsed = parse_task_text("normal backlog cleanup", today);
    assert_eq!(parsed.priority, Some(Priority::Medium));
}

#[test]
fn low_priority_keywords() {
    let today = day(2026, 3, 10);
    let parsed = parse_task_text("Clean up backlog low", today);
    assert_eq!(parsed.priority, Some(Priority::Low));
    assert_eq!(parsed.due, None);
}

#[test]
fn keywords_do_not_match_inside_words() {
    let today = day(2026, 3, 10);
    assert_eq!(parse_task_text("asapx", today).priority, None);
    assert_eq!(parse_task_text("lowest common denominator", today).priority, None);
    assert_eq!(parse_task_text("slowest runner", today).priority, None);
    // As a standalone word it still counts.
    assert_eq!(
        parse_task_text("low effort", today).priority,
        Some(Priority::Low)
    );
}

#[test]
fn multi_word_keyword_matches() {
    let today = day(2026, 3, 10);
    let parsed = parse_task_text("this is high priority stuff", today);
    assert_eq!(parsed.priority, Some(Priority::High));
}

#[test]
fn today_synonyms() {
    let today = day(2026, 3, 10);
    assert_eq!(parse_task_text("do it today", today).due, Some(today));
    assert_eq!(parse_task_text("party tonight", today).due, Some(today));
    assert_eq!(
        parse_task_text("call mom this evening", today).due,
        Some(today)
    );
}

#[test]
fn next_week_and_next_monday() {
    let today = day(2026, 3, 10);
    assert_eq!(
        parse_task_text("review next week", today).due,
        Some(day(2026, 3, 17))
    );
    assert_eq!(
        parse_task_text("standup next monday", today).due,
        Some(day(2026, 3, 17))
    );
}

#[test]
fn next_month_is_calendar_aware() {
    // Jan 31 + 1 month clamps to Feb 28 (2026 is not a leap year), it is
    // not a fixed 30-day jump.
    let parsed = parse_task_text("invoice next month", day(2026, 1, 31));
    assert_eq!(parsed.due, Some(day(2026, 2, 28)));

    let parsed = parse_task_text("invoice next month", day(2026, 3, 10));
    assert_eq!(parsed.due, Some(day(2026, 4, 10)));
}

#[test]
fn date_patterns_are_ordered_first_match_wins() {
    let today = day(2026, 3, 10);
    // Both "today" and "tomorrow" present: the today pattern is tested first.
    let parsed = parse_task_text("today or tomorrow", today);
    assert_eq!(parsed.due, Some(today));
}

#[test]
fn numeric_specific_date() {
    let today = day(2026, 3, 10);
    assert_eq!(
        parse_task_text("taxes 3/15", today).due,
        Some(day(2026, 3, 15))
    );
    // Already passed this year: rolls to next year.
    assert_eq!(
        parse_task_text("taxes 3/5", today).due,
        Some(day(2027, 3, 5))
    );
    // Nonsense combinations do not match.
    assert_eq!(parse_task_text("ratio 13/45", today).due, None);
}

#[test]
fn month_name_specific_date() {
    let today = day(2026, 3, 10);
    assert_eq!(
        parse_task_text("Pay rent march 15", today).due,
        Some(day(2026, 3, 15))
    );
    assert_eq!(
        parse_task_text("gift shopping dec 25", today).due,
        Some(day(2026, 12, 25))
    );
    // A month name without a day number is not a date.
    assert_eq!(parse_task_text("the march of progress", today).due, None);
}

#[test]
fn blank_input_yields_minimal_result() {
    let today = day(2026, 3, 10);
    for input in ["", "   ", "\t\n"] {
        let parsed = parse_task_text(input, today);
        assert_eq!(parsed.title, "");
        assert_eq!(parsed.priority, None);
        assert_eq!(parsed.due, None);
    }
}

#[test]
fn same_input_same_today_is_deterministic() {
    let today = day(2026, 3, 10);
    let a = parse_task_text("Ship it tomorrow urgent", today);
    let b = parse_task_text("Ship it tomorrow urgent", today);
    assert_eq!(a, b);
}

#[test]
fn title_is_trimmed_but_otherwise_untouched() {
    let today = day(2026, 3, 10);
    let parsed = parse_task_text("  Buy milk tomorrow  ", today);
    assert_eq!(parsed.title, "Buy milk tomorrow");
}

#[test]
fn parser_is_total_over_odd_inputs() {
    let today = day(2026, 3, 10);
    // None of these should panic.
    for input in [
        "////",
        "1/2/3/4",
        "émojis 🎉 tomorrow",
        "@#$%^&*",
        "march",
        "/",
        "00/00",
        "a b c d e f g h i j k l m n o p",
    ] {
        let _ = parse_task_text(input, today);
    }
}
