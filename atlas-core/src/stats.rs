//! Per-region aggregate statistics.

use serde::{Deserialize, Serialize};

/// Aggregate statistics for a single region.
///
/// Regions without countries report zero for both aggregates, never null.
///
/// # Examples
/// ```
/// use atlas_core::RegionStats;
///
/// let stats = RegionStats {
///     name: "Africa".to_owned(),
///     number_countries: 2,
///     total_population: 300_000_000,
/// };
/// let json = serde_json::to_value(&stats).expect("serialise stats");
/// assert_eq!(json["number_countries"], 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionStats {
    /// The region's name.
    pub name: String,
    /// Count of countries referencing this region.
    pub number_countries: i64,
    /// Sum of `population` over those countries.
    pub total_population: i64,
}
