//! Fully populated GICS lookup table.

use crate::error::{MalformedHierarchy, Result};
use crate::hierarchy::{HierarchyColumn, TaxonomyRow};
use std::collections::{HashMap, HashSet};

/// Number of valid values shown when a lookup is rejected.
const SAMPLE_SIZE: usize = 5;

/// Immutable GICS hierarchy with O(1) membership and parent lookups.
///
/// Built once by [`load`](crate::hierarchy::load) and never mutated. Share it
/// behind an `Arc` (or [`SharedTaxonomy`](crate::shared::SharedTaxonomy)) to
/// serve classification calls from several threads.
#[derive(Debug, Clone)]
pub struct TaxonomyTable {
    rows: Vec<TaxonomyRow>,

    // Distinct values in first-seen order.
    sectors: Vec<String>,
    industry_groups: Vec<String>,
    industries: Vec<String>,
    sub_industries: Vec<String>,

    valid_sectors: HashSet<String>,
    group_to_sector: HashMap<String, String>,
    industry_to_group: HashMap<String, String>,
    industry_to_sector: HashMap<String, String>,
    sub_industry_to_industry: HashMap<String, String>,
    sub_industry_row: HashMap<String, usize>,
}

impl TaxonomyTable {
    /// Build the table from resolved rows, enforcing strict nesting.
    pub(crate) fn from_rows(rows: Vec<TaxonomyRow>) -> Result<Self> {
        let mut table = Self {
            rows: Vec::with_capacity(rows.len()),
            sectors: Vec::new(),
            industry_groups: Vec::new(),
            industries: Vec::new(),
            sub_industries: Vec::new(),
            valid_sectors: HashSet::new(),
            group_to_sector: HashMap::new(),
            industry_to_group: HashMap::new(),
            industry_to_sector: HashMap::new(),
            sub_industry_to_industry: HashMap::new(),
            sub_industry_row: HashMap::new(),
        };

        for (i, row) in rows.into_iter().enumerate() {
            if table.valid_sectors.insert(row.sector.clone()) {
                table.sectors.push(row.sector.clone());
            }
            link(
                &mut table.group_to_sector,
                &mut table.industry_groups,
                i,
                HierarchyColumn::IndustryGroup,
                &row.industry_group,
                &row.sector,
            )?;
            link(
                &mut table.industry_to_group,
                &mut table.industries,
                i,
                HierarchyColumn::Industry,
                &row.industry,
                &row.industry_group,
            )?;
            link(
                &mut table.sub_industry_to_industry,
                &mut table.sub_industries,
                i,
                HierarchyColumn::SubIndustry,
                &row.sub_industry,
                &row.industry,
            )?;

            table
                .industry_to_sector
                .entry(row.industry.clone())
                .or_insert_with(|| row.sector.clone());
            table
                .sub_industry_row
                .entry(row.sub_industry.clone())
                .or_insert(i);
            table.rows.push(row);
        }

        Ok(table)
    }

    /// Resolved rows in source order.
    pub fn rows(&self) -> &[TaxonomyRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows. A loaded table never is.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct sectors in source order.
    pub fn sectors(&self) -> &[String] {
        &self.sectors
    }

    /// Distinct industry groups in source order.
    pub fn industry_groups(&self) -> &[String] {
        &self.industry_groups
    }

    /// Distinct industries in source order.
    pub fn industries(&self) -> &[String] {
        &self.industries
    }

    /// Distinct sub-industries in source order.
    pub fn sub_industries(&self) -> &[String] {
        &self.sub_industries
    }

    /// Check if a sector exists.
    pub fn is_sector(&self, sector: &str) -> bool {
        self.valid_sectors.contains(sector)
    }

    /// Check if an industry group exists.
    pub fn is_industry_group(&self, group: &str) -> bool {
        self.group_to_sector.contains_key(group)
    }

    /// Check if an industry exists.
    pub fn is_industry(&self, industry: &str) -> bool {
        self.industry_to_sector.contains_key(industry)
    }

    /// Check if a sub-industry exists.
    pub fn is_sub_industry(&self, sub_industry: &str) -> bool {
        self.sub_industry_to_industry.contains_key(sub_industry)
    }

    /// Sector an industry belongs to.
    pub fn sector_of(&self, industry: &str) -> Option<&str> {
        self.industry_to_sector.get(industry).map(String::as_str)
    }

    /// Industry group an industry belongs to.
    pub fn industry_group_of(&self, industry: &str) -> Option<&str> {
        self.industry_to_group.get(industry).map(String::as_str)
    }

    /// Industry a sub-industry belongs to.
    pub fn industry_of(&self, sub_industry: &str) -> Option<&str> {
        self.sub_industry_to_industry
            .get(sub_industry)
            .map(String::as_str)
    }

    /// Full path of a sub-industry.
    pub fn path_of(&self, sub_industry: &str) -> Option<&TaxonomyRow> {
        self.sub_industry_row
            .get(sub_industry)
            .map(|&i| &self.rows[i])
    }

    /// Industries under a sector, in source order.
    pub fn industries_in(&self, sector: &str) -> Vec<&str> {
        self.industries
            .iter()
            .filter(|industry| self.sector_of(industry) == Some(sector))
            .map(String::as_str)
            .collect()
    }

    /// Sub-industries under an industry, in source order.
    pub fn sub_industries_in(&self, industry: &str) -> Vec<&str> {
        self.sub_industries
            .iter()
            .filter(|sub| self.industry_of(sub) == Some(industry))
            .map(String::as_str)
            .collect()
    }

    /// A sorted sample of valid values for a column, for error messages.
    ///
    /// Sectors are always listed in full.
    pub fn sample(&self, column: HierarchyColumn) -> Vec<String> {
        let (values, limit) = match column {
            HierarchyColumn::Sector => (&self.sectors, usize::MAX),
            HierarchyColumn::IndustryGroup => (&self.industry_groups, SAMPLE_SIZE),
            HierarchyColumn::Industry => (&self.industries, SAMPLE_SIZE),
            HierarchyColumn::SubIndustry => (&self.sub_industries, SAMPLE_SIZE),
        };
        let mut sorted = values.clone();
        sorted.sort();
        sorted.truncate(limit);
        sorted
    }
}

impl PartialEq for TaxonomyTable {
    fn eq(&self, other: &Self) -> bool {
        // Everything else is derived from the rows.
        self.rows == other.rows
    }
}

impl Eq for TaxonomyTable {}

/// Record `child -> parent`, rejecting a second, different parent.
fn link(
    parents: &mut HashMap<String, String>,
    order: &mut Vec<String>,
    row: usize,
    column: HierarchyColumn,
    child: &str,
    parent: &str,
) -> std::result::Result<(), MalformedHierarchy> {
    match parents.get(child) {
        Some(existing) if existing != parent => Err(MalformedHierarchy::ConflictingParent {
            row,
            column,
            value: child.to_owned(),
            existing: existing.clone(),
            found: parent.to_owned(),
        }),
        Some(_) => Ok(()),
        None => {
            parents.insert(child.to_owned(), parent.to_owned());
            order.push(child.to_owned());
            Ok(())
        }
    }
}
