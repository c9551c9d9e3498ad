//! The country record and its owning-region reference.

/// A country as persisted in the store.
///
/// `name` is the upsert key: importing the same name twice overwrites the
/// remaining fields instead of creating a duplicate row. `region` carries the
/// owning region's name; the store resolves it to a row, creating the region
/// on first sight.
///
/// # Examples
/// ```
/// use atlas_core::Country;
///
/// let nigeria = Country::new("Nigeria", "NG", "NGA", 200_000_000, "Africa")
///     .with_capital("Abuja")
///     .with_top_level_domains([".ng"]);
/// assert_eq!(nigeria.capital.as_deref(), Some("Abuja"));
/// assert_eq!(nigeria.top_level_domains, vec![".ng".to_owned()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    /// Display name; unique per country in practice.
    pub name: String,
    /// ISO 3166-1 alpha-2 code.
    pub alpha2_code: String,
    /// ISO 3166-1 alpha-3 code.
    pub alpha3_code: String,
    /// Head count; defaults to 0 when the source omits the value.
    pub population: i64,
    /// Name of the owning region.
    pub region: String,
    /// Capital city, when the source provides one.
    pub capital: Option<String>,
    /// Top-level domains; empty when the source omits them.
    pub top_level_domains: Vec<String>,
}

impl Country {
    /// Construct a country with the required fields and no optional data.
    pub fn new(
        name: impl Into<String>,
        alpha2_code: impl Into<String>,
        alpha3_code: impl Into<String>,
        population: i64,
        region: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            alpha2_code: alpha2_code.into(),
            alpha3_code: alpha3_code.into(),
            population,
            region: region.into(),
            capital: None,
            top_level_domains: Vec::new(),
        }
    }

    /// Attach a capital city.
    #[must_use]
    pub fn with_capital(mut self, capital: impl Into<String>) -> Self {
        self.capital = Some(capital.into());
        self
    }

    /// Attach top-level domains.
    #[must_use]
    pub fn with_top_level_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.top_level_domains = domains.into_iter().map(Into::into).collect();
        self
    }
}
