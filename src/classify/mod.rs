pub mod donation;
pub mod portal;
pub mod react_job;
pub mod rules;

use crate::{
    domain::{CheckKind, Classification, PageEvidence},
    extract::ExtractOptions,
};

pub fn classify(kind: CheckKind, evidence: &PageEvidence) -> Classification {
    match kind {
        CheckKind::Portal => portal::classify(evidence),
        CheckKind::Donation => donation::classify(evidence),
        CheckKind::ReactJob => react_job::classify(evidence),
    }
}

pub fn extract_options(kind: CheckKind) -> ExtractOptions {
    ExtractOptions {
        jobs: kind == CheckKind::ReactJob,
    }
}
