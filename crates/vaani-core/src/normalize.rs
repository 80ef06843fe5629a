//! Turning recognizer prose into usable values.
//!
//! Speech-to-text output arrives as free text: "john at example dot com",
//! "pass word one two three", "20 September 2025". The helpers here map that
//! prose onto the values the flows need. They are deliberately forgiving
//! about near-homophones ("won" for one, "tree" for three) because Indian
//! English recognizers produce them constantly.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static YES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\byes\b").expect("valid pattern"));
static NO_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bno\b").expect("valid pattern"));
static CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:close|sign out|logout|log out)\b").expect("valid pattern"));
static BACK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bback\b").expect("valid pattern"));

static SPOKEN_AT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+at\s+").expect("valid pattern"));
static SPOKEN_PLUS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+plus\s+").expect("valid pattern"));
static SPOKEN_DOT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+dot\s+").expect("valid pattern"));
static SPOKEN_UNDERSCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+underscore\s+").expect("valid pattern"));
static SPOKEN_DASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+(?:dash|hyphen|minus)\s+").expect("valid pattern"));
static SPOKEN_SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+space\s+").expect("valid pattern"));

static NUMBER_WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:zero|oh|one|won|van|two|too|tu|three|tree|free|four|fore|for|five|six|seven|eight|ate|nine|to|o)\b",
    )
    .expect("valid pattern")
});

static ORDINAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b").expect("valid pattern"));

/// A recognized yes-or-no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    #[must_use]
    pub const fn is_yes(self) -> bool {
        matches!(self, Self::Yes)
    }
}

/// Finds an unambiguous yes or no in an utterance.
///
/// Whole words only, so "know" is not a refusal. An utterance containing
/// both words ("yes no wait") is treated as no answer at all.
#[must_use]
pub fn yes_no(text: &str) -> Option<YesNo> {
    let lowered = text.to_lowercase();
    let has_yes = YES_RE.is_match(&lowered);
    let has_no = NO_RE.is_match(&lowered);
    match (has_yes, has_no) {
        (true, false) => Some(YesNo::Yes),
        (false, true) => Some(YesNo::No),
        _ => None,
    }
}

/// True when the utterance asks to close the assistant and sign out.
///
/// Close phrases win over whatever question is currently pending, so this
/// must be checked before any other parsing of a reply.
#[must_use]
pub fn is_close_command(text: &str) -> bool {
    CLOSE_RE.is_match(&text.to_lowercase())
}

/// True when the utterance asks to go back (whole word, so "backlog" is not).
#[must_use]
pub fn is_back_command(text: &str) -> bool {
    BACK_RE.is_match(&text.to_lowercase())
}

/// Case-insensitive substring search over a keyword list.
#[must_use]
pub fn contains_any(text: &str, needles: &[&str]) -> bool {
    let lowered = text.to_lowercase();
    needles.iter().any(|needle| lowered.contains(needle))
}

fn digit_for_word(token: &str) -> Option<char> {
    // Includes the homophones recognizers substitute for spoken digits.
    match token {
        "zero" | "oh" | "o" => Some('0'),
        "one" | "won" | "van" => Some('1'),
        "two" | "to" | "too" | "tu" => Some('2'),
        "three" | "tree" | "free" => Some('3'),
        "four" | "for" | "fore" => Some('4'),
        "five" => Some('5'),
        "six" => Some('6'),
        "seven" => Some('7'),
        "eight" | "ate" => Some('8'),
        "nine" => Some('9'),
        _ => None,
    }
}

/// Collapses an utterance to a digit string ("one two free" becomes "123").
///
/// Tokens that are already digit runs pass through, number words map to
/// their digit, anything else is dropped. If nothing converts, falls back to
/// stripping non-digits from the original text.
#[must_use]
pub fn digits_from_words(text: &str) -> String {
    let lowered: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();
    let mut digits = String::new();
    for token in lowered.split_whitespace() {
        if token.bytes().all(|b| b.is_ascii_digit()) {
            digits.push_str(token);
        } else if let Some(digit) = digit_for_word(token) {
            digits.push(digit);
        }
    }
    if digits.is_empty() {
        text.chars().filter(char::is_ascii_digit).collect()
    } else {
        digits
    }
}

/// Rebuilds an email address from its spoken form.
///
/// "john underscore doe at example dot com" becomes
/// "john_doe@example.com". Whatever whitespace survives the marker
/// substitutions is removed, since addresses contain none.
#[must_use]
pub fn email_from_speech(text: &str) -> String {
    let lowered = text.to_lowercase();
    let trimmed = lowered.trim();
    let step = SPOKEN_AT_RE.replace_all(trimmed, "@");
    let step = SPOKEN_DOT_RE.replace_all(&step, ".");
    let step = SPOKEN_UNDERSCORE_RE.replace_all(&step, "_");
    let step = SPOKEN_DASH_RE.replace_all(&step, "-");
    let step = SPOKEN_PLUS_RE.replace_all(&step, "+");
    step.split_whitespace().collect()
}

/// Replaces number words with digits while keeping the rest of the text.
///
/// Lowercases its input; "Pass word One Two" becomes "pass word 1 2".
#[must_use]
pub fn number_words_inline(text: &str) -> String {
    let lowered = text.to_lowercase();
    NUMBER_WORD_RE
        .replace_all(&lowered, |caps: &regex::Captures<'_>| {
            digit_for_word(&caps[0]).map_or_else(String::new, |d| d.to_string())
        })
        .trim()
        .to_string()
}

/// Replaces spoken symbol names (underscore, dash, dot, space) in place,
/// preserving the case of everything else.
#[must_use]
pub fn symbols_from_speech(text: &str) -> String {
    let padded = format!(" {text} ");
    let step = SPOKEN_UNDERSCORE_RE.replace_all(&padded, "_");
    let step = SPOKEN_DASH_RE.replace_all(&step, "-");
    let step = SPOKEN_DOT_RE.replace_all(&step, ".");
    let step = SPOKEN_SPACE_RE.replace_all(&step, "");
    step.trim().to_string()
}

fn despace(text: &str) -> String {
    text.split_whitespace().collect()
}

fn push_candidate(candidates: &mut Vec<String>, value: String) {
    if !value.is_empty() && !candidates.contains(&value) {
        candidates.push(value);
    }
}

/// Builds the ordered ladder of password guesses for one spoken password.
///
/// A recognizer renders "p4ss_word" as something like "pass underscore word
///. " so the ladder tries, in order: the raw text, the text without trailing
/// punctuation, the de-spaced form, the symbol-substituted forms, and the
/// number-word forms. Duplicates are skipped and the ladder is capped at six
/// candidates.
#[must_use]
pub fn password_candidates(spoken: &str) -> Vec<String> {
    let mut candidates = Vec::new();
    let base = spoken.trim();
    let no_trail = base.trim_end_matches(['.', ',', ';', '!', '?']).trim();

    push_candidate(&mut candidates, base.to_string());
    push_candidate(&mut candidates, no_trail.to_string());
    push_candidate(&mut candidates, despace(no_trail));

    let symbols = symbols_from_speech(no_trail);
    push_candidate(&mut candidates, symbols.clone());
    push_candidate(&mut candidates, despace(&symbols));

    let numbers = number_words_inline(no_trail);
    push_candidate(&mut candidates, numbers.clone());
    push_candidate(&mut candidates, despace(&numbers));

    let symbol_numbers = number_words_inline(&symbols);
    push_candidate(&mut candidates, symbol_numbers.clone());
    push_candidate(&mut candidates, despace(&symbol_numbers));

    candidates.truncate(6);
    candidates
}

/// Parses a spoken date into `YYYY-MM-DD`.
///
/// Tries textual month forms first ("20 September 2025", "September 20,
/// 2025", ordinals allowed), then falls back to the first three digit groups
/// read as day/month/year, or year/month/day when the first group exceeds
/// 31. Two-digit years are taken as 20xx. Returns `None` when no plausible
/// calendar date results.
#[must_use]
pub fn parse_date_ymd(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    textual_date(trimmed)
        .or_else(|| digit_group_date(trimmed))
        .map(|date| date.format("%Y-%m-%d").to_string())
}

fn textual_date(text: &str) -> Option<NaiveDate> {
    // "20th September, 2025" -> "20 September 2025"
    let no_commas = text.replace(',', " ");
    let no_ordinals = ORDINAL_RE.replace_all(&no_commas, "$1");
    let cleaned = no_ordinals.split_whitespace().collect::<Vec<_>>().join(" ");
    for format in ["%d %B %Y", "%d %b %Y", "%B %d %Y", "%b %d %Y", "%Y %B %d"] {
        if let Ok(date) = NaiveDate::parse_from_str(&cleaned, format) {
            return Some(date);
        }
    }
    None
}

fn digit_group_date(text: &str) -> Option<NaiveDate> {
    let spaced: String = text
        .chars()
        .map(|c| if c.is_ascii_digit() { c } else { ' ' })
        .collect();
    let mut groups = spaced.split_whitespace();
    let a: i64 = groups.next()?.parse().ok()?;
    let b: i64 = groups.next()?.parse().ok()?;
    let c: i64 = groups.next()?.parse().ok()?;
    let (year, month, day) = if a > 31 { (a, b, c) } else { (c, b, a) };
    let year = if year < 100 { year + 2000 } else { year };
    NaiveDate::from_ymd_opt(
        i32::try_from(year).ok()?,
        u32::try_from(month).ok()?,
        u32::try_from(day).ok()?,
    )
}
