//! Data-driven enum/string registry
//!
//! Each enumeration domain is described once as an ordered list of
//! `(value, canonical string)` pairs. Lookups in both directions are built
//! generically over that list.

/// Display string for values missing from a registry
pub const INVALID: &str = "INVALID";

/// Ordered, closed table of canonical spellings for one enumeration domain
#[derive(Debug)]
pub struct Registry<T: 'static> {
    domain: &'static str,
    entries: &'static [(T, &'static str)],
}

impl<T: Copy + PartialEq + 'static> Registry<T> {
    /// Create a registry over a fixed table
    pub const fn new(domain: &'static str, entries: &'static [(T, &'static str)]) -> Self {
        Self { domain, entries }
    }

    /// Human-readable name of the domain, e.g. `"texture format"`
    pub fn domain(&self) -> &'static str {
        self.domain
    }

    /// Canonical string of `value`, or [`INVALID`] if the table lacks it
    pub fn name(&self, value: T) -> &'static str {
        self.entries
            .iter()
            .find(|(v, _)| *v == value)
            .map_or(INVALID, |(_, name)| name)
    }

    /// Exact, case-sensitive lookup in table order
    pub fn parse(&self, name: &str) -> Option<T> {
        self.entries
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(value, _)| *value)
    }

    /// Every value in table order
    pub fn values(&self) -> impl Iterator<Item = T> + '_ {
        self.entries.iter().map(|(value, _)| *value)
    }

    /// Every canonical string in table order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(_, name)| *name)
    }

    /// Canonical strings joined with `", "`, for help and error text
    pub fn list(&self) -> String {
        self.names().collect::<Vec<_>>().join(", ")
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
