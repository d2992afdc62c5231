//! Loaded reference data and the queries served from it.

use crate::equity::Equity;
use gics_data::{DataConfig, load_constituents, load_hierarchy, validate_constituents};
use gics_taxonomy::{
    Classification, CommonNames, ConstituentIndex, GicsSector, HierarchyLevel, SharedTaxonomy,
    TaxonomyTable, peers_at,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// GICS hierarchy, constituent index and common names, loaded once.
///
/// All queries are read-only. The hierarchy can be swapped with
/// [`reload_taxonomy`](Self::reload_taxonomy) while other threads keep
/// classifying against the table they already hold.
#[derive(Debug)]
pub struct Gics {
    taxonomy: SharedTaxonomy,
    constituents: ConstituentIndex,
    names: CommonNames,
}

impl Gics {
    /// Assemble from already loaded parts.
    pub fn new(table: TaxonomyTable, constituents: ConstituentIndex, names: CommonNames) -> Self {
        Self {
            taxonomy: SharedTaxonomy::new(table),
            constituents,
            names,
        }
    }

    /// Load the hierarchy and constituents named in `config`.
    ///
    /// Constituents that do not fit the hierarchy are kept but logged.
    ///
    /// # Errors
    ///
    /// Any failure reading or filling the hierarchy, or reading the
    /// constituents. Nothing is constructed on error.
    pub fn from_config(config: &DataConfig) -> gics_data::Result<Self> {
        let table = load_hierarchy(&config.hierarchy_path)?;
        let constituents = load_constituents(&config.constituents_path)?;

        let rejected = validate_constituents(&constituents, &table);
        if !rejected.is_empty() {
            warn!(
                count = rejected.len(),
                "constituents with classifications outside the hierarchy"
            );
        }

        info!(
            sub_industries = table.sub_industries().len(),
            constituents = constituents.len(),
            "GICS reference data loaded"
        );
        Ok(Self::new(table, constituents, CommonNames::builtin()))
    }

    /// Replace the common-name lookup.
    pub fn with_names(mut self, names: CommonNames) -> Self {
        self.names = names;
        self
    }

    /// Snapshot of the current hierarchy.
    pub fn taxonomy(&self) -> Arc<TaxonomyTable> {
        self.taxonomy.current()
    }

    /// Constituent index.
    pub const fn constituents(&self) -> &ConstituentIndex {
        &self.constituents
    }

    /// Common-name lookup.
    pub const fn names(&self) -> &CommonNames {
        &self.names
    }

    /// Map shorthand such as `"it"` or `"45"` to a sector in the hierarchy.
    ///
    /// Names already in the hierarchy are returned unchanged. Input that is
    /// neither a known name nor a recognised shorthand is returned as given,
    /// so [`classify`](Self::classify) reports it with the valid sectors.
    pub fn resolve_sector(&self, input: &str) -> String {
        let table = self.taxonomy();
        if table.is_sector(input) {
            return input.to_string();
        }
        match GicsSector::parse(input) {
            Some(sector) if table.is_sector(sector.name()) => sector.name().to_string(),
            _ => input.to_string(),
        }
    }

    /// See [`TaxonomyTable::classify`].
    pub fn classify(
        &self,
        sector: &str,
        industry: Option<&str>,
        sub_industry: Option<&str>,
    ) -> gics_taxonomy::Result<Classification> {
        self.taxonomy().classify(sector, industry, sub_industry)
    }

    /// See [`TaxonomyTable::classify_strict`].
    pub fn classify_strict(
        &self,
        sector: &str,
        industry: Option<&str>,
        sub_industry: Option<&str>,
    ) -> gics_taxonomy::Result<Classification> {
        self.taxonomy()
            .classify_strict(sector, industry, sub_industry)
    }

    /// See [`TaxonomyTable::belongs_to`].
    pub fn belongs_to(&self, industry: &str, sector: &str) -> bool {
        self.taxonomy().belongs_to(industry, sector)
    }

    /// Index members sharing `classification` at `level`.
    pub fn peers_at(&self, level: HierarchyLevel, classification: &Classification) -> Vec<String> {
        peers_at(level, classification, &self.constituents)
    }

    /// Peers of an index member, excluding itself. `None` if not a member.
    pub fn peers(&self, symbol: &str, level: HierarchyLevel) -> Option<Vec<String>> {
        self.constituents.peers_of(symbol, level)
    }

    /// An index member with its common name and classification.
    pub fn equity(&self, symbol: &str) -> Option<Equity> {
        let classification = self.constituents.classification(symbol)?;
        let common_name = self.names.get(symbol).map(str::to_owned);
        Some(Equity::new(symbol, common_name, classification))
    }

    /// Load a new hierarchy from `path` and publish it.
    ///
    /// On error the current hierarchy stays in place.
    pub fn reload_taxonomy(&self, path: impl AsRef<Path>) -> gics_data::Result<()> {
        let table = load_hierarchy(path)?;
        self.taxonomy.publish(table);
        Ok(())
    }
}
