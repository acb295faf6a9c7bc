use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{CheckKind, Verdict};

#[derive(Debug, Clone, Serialize)]
pub struct UrlResult {
    pub url: String,
    #[serde(flatten)]
    pub verdict: Verdict,
}

/// Outcome of one batch, split into the two buckets shown to the user.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub check: CheckKind,
    pub started_at: DateTime<Utc>,
    pub confirmed: Vec<UrlResult>,
    pub needs_investigation: Vec<UrlResult>,
}

impl BatchReport {
    pub fn new(check: CheckKind) -> Self {
        Self {
            check,
            started_at: Utc::now(),
            confirmed: Vec::new(),
            needs_investigation: Vec::new(),
        }
    }

    pub fn push(&mut self, url: impl Into<String>, verdict: Verdict) {
        let result = UrlResult {
            url: url.into(),
            verdict,
        };
        if result.verdict.is_match() {
            self.confirmed.push(result);
        } else {
            self.needs_investigation.push(result);
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        if !self.confirmed.is_empty() {
            let _ = writeln!(out, "{}", self.check.found_heading());
            for result in &self.confirmed {
                let _ = writeln!(out, "- {} — {}", result.url, result.verdict.message());
            }
            out.push('\n');
        }

        let _ = writeln!(out, "URLs Needing Further Investigation:");
        if self.needs_investigation.is_empty() {
            let _ = writeln!(out, "None");
        }
        for result in &self.needs_investigation {
            let _ = writeln!(out, "- {} — {}", result.url, result.verdict.message());
        }
        out
    }

    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BatchReport {
        let mut report = BatchReport::new(CheckKind::Portal);
        report.push("https://a.example", Verdict::Match("Found 'client portal' in page text.".into()));
        report.push("https://b.example", Verdict::NoMatch("No client-portal signals found.".into()));
        report.push("https://c.example", Verdict::FetchError("Request failed: timed out".into()));
        report
    }

    #[test]
    fn buckets_by_verdict() {
        let report = sample();
        assert_eq!(report.confirmed.len(), 1);
        assert_eq!(report.needs_investigation.len(), 2);
    }

    #[test]
    fn text_lists_both_buckets() {
        let text = sample().render_text();
        assert_eq!(
            text,
            "Portals Found:\n\
             - https://a.example — Found 'client portal' in page text.\n\
             \n\
             URLs Needing Further Investigation:\n\
             - https://b.example — No client-portal signals found.\n\
             - https://c.example — Request failed: timed out\n"
        );
    }

    #[test]
    fn empty_investigation_bucket_says_none() {
        let mut report = BatchReport::new(CheckKind::Donation);
        report.push("https://give.example", Verdict::Match("Found donation term 'donate'.".into()));
        assert!(report.render_text().ends_with("URLs Needing Further Investigation:\nNone\n"));
    }

    #[test]
    fn json_flattens_verdicts() {
        let json: serde_json::Value = serde_json::from_str(&sample().render_json().unwrap()).unwrap();
        assert_eq!(json["check"], "portal");
        assert_eq!(json["needs_investigation"][1]["verdict"], "fetch_error");
        assert_eq!(json["confirmed"][0]["url"], "https://a.example");
    }
}
