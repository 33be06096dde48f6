// File: src/model/parser.rs
use crate::model::Priority;
use chrono::{Datelike, Duration, Months, NaiveDate};

/// The structured result of interpreting free-text task input.
///
/// Built fresh from the full input on every edit; nothing is persisted.
/// `description` exists on the wire but no current rule populates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTask {
    pub title: String,
    pub due: Option<NaiveDate>,
    pub priority: Option<Priority>,
    pub description: Option<String>,
}

/// Heuristically extract a priority and a due date from free text.
///
/// Total over all inputs: empty or unmatched text yields a trimmed title
/// with no priority and no date. The caller supplies `today` so the result
/// is deterministic for a fixed clock reading.
pub fn parse_task_text(input: &str, today: NaiveDate) -> ParsedTask {
    let lower = input.to_lowercase();
    ParsedTask {
        title: input.trim().to_string(),
        due: extract_due(&lower, today),
        priority: extract_priority(&lower),
        description: None,
    }
}

// Scan order is fixed: the first level with a keyword present wins.
const PRIORITY_KEYWORDS: &[(Priority, &[&str])] = &[
    (
        Priority::High,
        &["urgent", "asap", "critical", "important", "high priority"],
    ),
    (Priority::Medium, &["medium", "normal", "standard"]),
    (Priority::Low, &["low", "whenever", "someday", "backlog"]),
];

fn extract_priority(lower: &str) -> Option<Priority> {
    for (level, keywords) in PRIORITY_KEYWORDS {
        if keywords.iter().any(|kw| contains_word(lower, kw)) {
            return Some(*level);
        }
    }
    None
}

// Patterns are tested in this fixed order; the first match wins.
fn extract_due(lower: &str, today: NaiveDate) -> Option<NaiveDate> {
    if ["today", "this evening", "tonight"]
        .iter()
        .any(|kw| contains_word(lower, kw))
    {
        return Some(today);
    }
    if contains_word(lower, "tomorrow") {
        return Some(today + Duration::days(1));
    }
    if contains_word(lower, "next week") || contains_word(lower, "next monday") {
        return Some(today + Duration::days(7));
    }
    if contains_word(lower, "next month") {
        // Calendar-aware month step (clamps the day), not a fixed 30 days.
        return today.checked_add_months(Months::new(1));
    }
    parse_specific_date(lower, today)
}

/// Word-boundary containment check. A keyword embedded in a longer
/// alphanumeric run ("asapx", "follow") does not count as present.
/// Multi-word keywords match across single spaces.
fn contains_word(haystack: &str, needle: &str) -> bool {
    let bytes = haystack.as_bytes();
    haystack.match_indices(needle).any(|(start, _)| {
        let end = start + needle.len();
        let before_ok = start == 0 || !bytes[start - 1].is_ascii_alphanumeric();
        let after_ok = end == bytes.len() || !bytes[end].is_ascii_alphanumeric();
        before_ok && after_ok
    })
}

// --- SPECIFIC DATE PARSING ---

/// Recognizes "3/15" and "march 15" style dates, resolving them to the
/// next occurrence on or after `today`.
fn parse_specific_date(lower: &str, today: NaiveDate) -> Option<NaiveDate> {
    let words: Vec<&str> = lower.split_whitespace().collect();
    for (i, word) in words.iter().enumerate() {
        // Numeric M/D
        if let Some((m_str, d_str)) = word.split_once('/')
            && let Ok(month) = m_str.parse::<u32>()
            && let Ok(day) = d_str.trim_end_matches(|c: char| !c.is_ascii_digit()).parse::<u32>()
            && let Some(date) = upcoming(month, day, today)
        {
            return Some(date);
        }

        // "<month name> <day>"
        if let Some(month) = parse_month_name(word)
            && let Some(next) = words.get(i + 1)
        {
            let digits = next.trim_matches(|c: char| !c.is_ascii_digit());
            if (1..=2).contains(&digits.len())
                && let Ok(day) = digits.parse::<u32>()
                && let Some(date) = upcoming(month, day, today)
            {
                return Some(date);
            }
        }
    }
    None
}

fn upcoming(month: u32, day: u32, today: NaiveDate) -> Option<NaiveDate> {
    match NaiveDate::from_ymd_opt(today.year(), month, day) {
        Some(d) if d >= today => Some(d),
        // Already passed this year (or an invalid date like Feb 29): roll over.
        _ => NaiveDate::from_ymd_opt(today.year() + 1, month, day),
    }
}

fn parse_month_name(s: &str) -> Option<u32> {
    let token = s.trim_matches(|c: char| !c.is_ascii_alphabetic());
    match token {
        "jan" | "january" => Some(1),
        "feb" | "february" => Some(2),
        "mar" | "march" => Some(3),
        "apr" | "april" => Some(4),
        "may" => Some(5),
        "jun" | "june" => Some(6),
        "jul" | "july" => Some(7),
        "aug" | "august" => Some(8),
        "sep" | "september" => Some(9),
        "oct" | "october" => Some(10),
        "nov" | "november" => Some(11),
        "dec" | "december" => Some(12),
        _ => None,
    }
}
