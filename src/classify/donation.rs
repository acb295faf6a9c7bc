use super::rules::DONATION_TERMS;
use crate::domain::{Classification, PageEvidence};

pub const NO_SIGNALS: &str = "No donation signals found.";

pub fn classify(evidence: &PageEvidence) -> Classification {
    match DONATION_TERMS
        .iter()
        .find(|term| evidence.text.contains(*term))
    {
        Some(term) => Classification::confirmed(format!("Found donation term '{term}'.")),
        None => Classification::absent(NO_SIGNALS),
    }
}
