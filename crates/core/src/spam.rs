//! Heuristic spam scoring for guest wishes.
//!
//! Deterministic and additive: each triggered rule adds its weight and a
//! human-readable reason. The verdict is advisory — a spam-flagged wish is
//! routed to pending moderation, never rejected outright.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Scores strictly above this are classified as spam.
pub const SPAM_SCORE_THRESHOLD: u32 = 5;

static URL_SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://\S+").expect("valid regex"));
static WWW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bwww\.\S+").expect("valid regex"));
static BARE_DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[a-z0-9][a-z0-9-]*\.(?:com|net|org|biz|info|io|xyz|online|site|club|shop|top)\b")
        .expect("valid regex")
});

/// Case-insensitive substrings that mark promotional or scam content.
const SPAM_KEYWORDS: &[&str] = &[
    "free money",
    "click here",
    "buy now",
    "limited time",
    "act now",
    "make money",
    "work from home",
    "earn cash",
    "casino",
    "lottery",
    "you won",
    "claim your",
    "viagra",
    "crypto",
    "bitcoin",
    "investment opportunity",
    "subscribe to",
    "follow me",
    "check out my",
    "promo code",
    "discount code",
];

/// Result of scoring one wish.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpamVerdict {
    pub is_spam: bool,
    pub spam_score: u32,
    pub reasons: Vec<String>,
}

/// Score a wish's message plus guest name.
///
/// Link and keyword rules scan the name too (spam links get stuffed into
/// any free-text field); the shape heuristics look at the message alone.
pub fn score_wish(guest_name: &str, message: &str) -> SpamVerdict {
    let mut score = 0u32;
    let mut reasons = Vec::new();

    let combined = format!("{guest_name} {message}");

    // Three overlapping URL classes, weight 4 per match.
    let url_hits = URL_SCHEME_RE.find_iter(&combined).count()
        + WWW_RE.find_iter(&combined).count()
        + BARE_DOMAIN_RE.find_iter(&combined).count();
    if url_hits > 0 {
        score += 4 * url_hits as u32;
        reasons.push(format!("contains {url_hits} link-like pattern(s)"));
    }

    let lowered = combined.to_lowercase();
    let matched: Vec<&str> = SPAM_KEYWORDS
        .iter()
        .copied()
        .filter(|kw| lowered.contains(kw))
        .collect();
    if !matched.is_empty() {
        score += 3 * matched.len() as u32;
        reasons.push(format!("matches spam keywords: {}", matched.join(", ")));
    }

    let char_len = message.chars().count();

    // Shouting: mostly-uppercase messages longer than 20 characters.
    let letters = message.chars().filter(|c| c.is_alphabetic()).count();
    if char_len > 20 && letters > 0 {
        let upper = message.chars().filter(|c| c.is_uppercase()).count();
        if upper as f64 / letters as f64 > 0.7 {
            score += 2;
            reasons.push("mostly uppercase".to_string());
        }
    }

    let punctuation = message.chars().filter(|c| c.is_ascii_punctuation()).count();
    if punctuation > 10 && punctuation as f64 > 0.3 * char_len as f64 {
        score += 2;
        reasons.push("excessive punctuation".to_string());
    }

    if has_char_run(message, 5) {
        score += 1;
        reasons.push("repeated character run".to_string());
    }

    if message.trim().chars().count() < 10 {
        score += 1;
        reasons.push("very short message".to_string());
    }
    if char_len > 1000 {
        score += 1;
        reasons.push("very long message".to_string());
    }

    // Mostly digits or symbols.
    if char_len > 20 {
        let noisy = message
            .chars()
            .filter(|c| !c.is_alphabetic() && !c.is_whitespace())
            .count();
        if noisy as f64 / char_len as f64 > 0.5 {
            score += 2;
            reasons.push("mostly digits or symbols".to_string());
        }
    }

    SpamVerdict {
        is_spam: score > SPAM_SCORE_THRESHOLD,
        spam_score: score,
        reasons,
    }
}

/// True when `s` contains a run of `min_run` or more identical characters.
fn has_char_run(s: &str, min_run: usize) -> bool {
    let mut run = 0usize;
    let mut previous: Option<char> = None;
    for c in s.chars() {
        if Some(c) == previous {
            run += 1;
        } else {
            run = 1;
            previous = Some(c);
        }
        if run >= min_run {
            return true;
        }
    }
    false
}
