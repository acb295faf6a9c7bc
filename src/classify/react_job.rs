//! React job openings located in, or open to, the United States.

use super::rules::{CITY_STATE, REACT_FALSE_FRIENDS, REACT_TOKEN, US_TERMS};
use crate::domain::{Classification, PageEvidence};

pub const STRUCTURED_MATCH: &str = "React job in the US found via JSON-LD JobPosting.";
pub const STRUCTURED_PARTIAL: &str = "React job found via JSON-LD, but US location not clear.";
pub const TEXT_MATCH: &str = "React job in the US found via page text.";
pub const TEXT_PARTIAL: &str = "React job found, but US location not clear.";
pub const NO_SIGNALS: &str = "No React job signals found.";

/// True when `text` names React. Any "reactive"/"reaction"-style word
/// anywhere in the text disqualifies it.
pub fn contains_react(text: &str) -> bool {
    if REACT_FALSE_FRIENDS.is_match(text) {
        return false;
    }
    REACT_TOKEN.is_match(text)
}

pub fn is_us_location(text: &str) -> bool {
    US_TERMS.is_match(&text.to_lowercase()) || CITY_STATE.is_match(text)
}

pub fn classify(evidence: &PageEvidence) -> Classification {
    let mut structured_partial = false;
    for job in &evidence.jobs {
        let has_react = contains_react(&job.title) || contains_react(&job.description);
        if !has_react {
            continue;
        }
        if is_us_location(&job.locations) || is_us_location(&job.description) {
            return Classification::confirmed(STRUCTURED_MATCH);
        }
        structured_partial = true;
    }

    let has_react = contains_react(&evidence.raw_text);
    if has_react && is_us_location(&evidence.raw_text) {
        return Classification::confirmed(TEXT_MATCH);
    }
    if structured_partial {
        return Classification::partial(STRUCTURED_PARTIAL);
    }
    if has_react {
        return Classification::partial(TEXT_PARTIAL);
    }
    Classification::absent(NO_SIGNALS)
}
