//! Summary counts describing what an import run created or updated.

use std::fmt;

/// Counts returned by a successful import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Regions created because the batch named them for the first time.
    pub regions_created: u64,
    /// Countries inserted for names not previously in the store.
    pub countries_created: u64,
    /// Countries whose fields were overwritten by the batch.
    pub countries_updated: u64,
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "created {} regions, created {} countries, updated {} countries",
            self.regions_created, self.countries_created, self.countries_updated
        )
    }
}
