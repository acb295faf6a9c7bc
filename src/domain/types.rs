use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use url::Url;

/// Which classifier a batch runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckKind {
    Portal,
    Donation,
    ReactJob,
}

impl CheckKind {
    pub fn found_heading(self) -> &'static str {
        match self {
            CheckKind::Portal => "Portals Found:",
            CheckKind::Donation => "Donation Pages Found:",
            CheckKind::ReactJob => "React Jobs (US) Found:",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckKind::Portal => "portal",
            CheckKind::Donation => "donation",
            CheckKind::ReactJob => "react-job",
        };
        f.write_str(name)
    }
}

/// Final outcome of probing one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", content = "message", rename_all = "snake_case")]
pub enum Verdict {
    Match(String),
    NoMatch(String),
    FetchError(String),
}

impl Verdict {
    pub fn message(&self) -> &str {
        match self {
            Verdict::Match(message) | Verdict::NoMatch(message) | Verdict::FetchError(message) => {
                message
            }
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Verdict::Match(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Confirmed,
    /// Not a match, but part of the evidence was present.
    Partial,
    Absent,
}

/// Classifier output for a single page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub signal: Signal,
    pub message: String,
}

impl Classification {
    pub fn confirmed(message: impl Into<String>) -> Self {
        Self {
            signal: Signal::Confirmed,
            message: message.into(),
        }
    }

    pub fn partial(message: impl Into<String>) -> Self {
        Self {
            signal: Signal::Partial,
            message: message.into(),
        }
    }

    pub fn absent(message: impl Into<String>) -> Self {
        Self {
            signal: Signal::Absent,
            message: message.into(),
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.signal == Signal::Confirmed
    }

    pub fn into_verdict(self) -> Verdict {
        match self.signal {
            Signal::Confirmed => Verdict::Match(self.message),
            Signal::Partial | Signal::Absent => Verdict::NoMatch(self.message),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOrigin {
    GuessedPath,
    CareersLink,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget {
    pub url: Url,
    pub origin: ProbeOrigin,
}

impl ProbeTarget {
    /// Prefix used when a secondary target supplies the reported message.
    pub fn provenance(&self) -> String {
        match self.origin {
            ProbeOrigin::GuessedPath => format!("Found via probe {}", self.url),
            ProbeOrigin::CareersLink => format!("Found via careers page {}", self.url),
        }
    }
}
