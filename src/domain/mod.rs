pub mod evidence;
pub mod types;

pub use evidence::{JobRecord, LinkKind, PageEvidence, PageLink};
pub use types::{CheckKind, Classification, ProbeOrigin, ProbeTarget, Signal, Verdict};
