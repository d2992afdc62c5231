//! Validation of a partial GICS assignment against the loaded hierarchy.

use crate::error::{Result, TaxonomyError};
use crate::hierarchy::HierarchyColumn;
use crate::table::TaxonomyTable;
use serde::Serialize;
use std::fmt;

/// A validated GICS assignment for one equity or query.
///
/// Fields are resolved once in [`TaxonomyTable::classify`] and cannot be
/// changed afterwards. `industry` may have been filled in from the
/// sub-industry; `sector` is always the caller's value.
///
/// Serialize-only, so there is no way around the table's checks:
///
/// ```compile_fail
/// let c: gics_taxonomy::Classification =
///     serde_json::from_str(r#"{"sector":"Nowhere","industry":null,"sub_industry":"Made Up"}"#)
///         .unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Classification {
    sector: String,
    industry: Option<String>,
    sub_industry: Option<String>,
}

impl Classification {
    /// Sector.
    pub fn sector(&self) -> &str {
        &self.sector
    }

    /// Industry, if known.
    pub fn industry(&self) -> Option<&str> {
        self.industry.as_deref()
    }

    /// Sub-industry, if known.
    pub fn sub_industry(&self) -> Option<&str> {
        self.sub_industry.as_deref()
    }

    /// Industry group, resolved through the table from the industry.
    pub fn industry_group<'a>(&self, table: &'a TaxonomyTable) -> Option<&'a str> {
        self.industry().and_then(|i| table.industry_group_of(i))
    }

    /// Build a classification without validating it.
    ///
    /// Used for index entries that were validated elsewhere.
    pub(crate) fn unchecked(
        sector: String,
        industry: Option<String>,
        sub_industry: Option<String>,
    ) -> Self {
        Self {
            sector,
            industry,
            sub_industry,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sector)?;
        if let Some(industry) = &self.industry {
            write!(f, " / {industry}")?;
        }
        if let Some(sub) = &self.sub_industry {
            write!(f, " / {sub}")?;
        }
        Ok(())
    }
}

impl TaxonomyTable {
    /// Validate a sector with optional industry and sub-industry.
    ///
    /// Each given value is checked for membership in its own level only. A
    /// valid industry from another sector is accepted; use
    /// [`belongs_to`](Self::belongs_to) or
    /// [`classify_strict`](Self::classify_strict) when cross-level consistency
    /// matters.
    ///
    /// When `sub_industry` is given without `industry`, the industry is
    /// filled in from the sub-industry's parent. The sector is never inferred.
    /// Empty strings are treated as omitted.
    ///
    /// # Errors
    ///
    /// [`TaxonomyError::InvalidSector`], [`TaxonomyError::InvalidIndustry`] or
    /// [`TaxonomyError::InvalidSubIndustry`], checked in that order.
    ///
    /// # Example
    ///
    /// ```
    /// use gics_taxonomy::{RawTaxonomyRow, load};
    ///
    /// let table = load([RawTaxonomyRow::new(
    ///     Some("Energy"),
    ///     Some("Energy"),
    ///     Some("Oil, Gas & Consumable Fuels"),
    ///     Some("Integrated Oil & Gas"),
    /// )])?;
    ///
    /// let c = table.classify("Energy", None, Some("Integrated Oil & Gas"))?;
    /// assert_eq!(c.industry(), Some("Oil, Gas & Consumable Fuels"));
    /// # Ok::<(), gics_taxonomy::TaxonomyError>(())
    /// ```
    pub fn classify(
        &self,
        sector: &str,
        industry: Option<&str>,
        sub_industry: Option<&str>,
    ) -> Result<Classification> {
        let industry = industry.filter(|v| !v.is_empty());
        let sub_industry = sub_industry.filter(|v| !v.is_empty());

        if !self.is_sector(sector) {
            return Err(TaxonomyError::InvalidSector {
                value: sector.to_owned(),
                sample: self.sample(HierarchyColumn::Sector),
            });
        }

        if let Some(industry) = industry
            && !self.is_industry(industry)
        {
            return Err(TaxonomyError::InvalidIndustry {
                value: industry.to_owned(),
                sample: self.sample(HierarchyColumn::Industry),
            });
        }

        let inferred = match sub_industry {
            Some(sub) => {
                let parent = self
                    .industry_of(sub)
                    .ok_or_else(|| TaxonomyError::InvalidSubIndustry {
                        value: sub.to_owned(),
                        sample: self.sample(HierarchyColumn::SubIndustry),
                    })?;
                industry.or(Some(parent))
            }
            None => industry,
        };

        Ok(Classification {
            sector: sector.to_owned(),
            industry: inferred.map(str::to_owned),
            sub_industry: sub_industry.map(str::to_owned),
        })
    }

    /// Whether `industry` sits under `sector`.
    ///
    /// Unknown industries never belong anywhere.
    pub fn belongs_to(&self, industry: &str, sector: &str) -> bool {
        self.sector_of(industry) == Some(sector)
    }

    /// [`classify`](Self::classify) plus cross-level consistency checks.
    ///
    /// The industry must sit under the sector and, when both are given, the
    /// sub-industry must sit under the industry.
    ///
    /// # Errors
    ///
    /// Everything [`classify`](Self::classify) returns, and
    /// [`TaxonomyError::InconsistentClassification`] on a parent mismatch.
    pub fn classify_strict(
        &self,
        sector: &str,
        industry: Option<&str>,
        sub_industry: Option<&str>,
    ) -> Result<Classification> {
        let classification = self.classify(sector, industry, sub_industry)?;

        if let (Some(sub), Some(industry)) =
            (classification.sub_industry(), classification.industry())
            && let Some(expected) = self.industry_of(sub)
            && expected != industry
        {
            return Err(TaxonomyError::InconsistentClassification {
                child: sub.to_owned(),
                expected: expected.to_owned(),
                given: industry.to_owned(),
            });
        }

        if let Some(industry) = classification.industry()
            && !self.belongs_to(industry, sector)
        {
            return Err(TaxonomyError::InconsistentClassification {
                child: industry.to_owned(),
                expected: self.sector_of(industry).unwrap_or_default().to_owned(),
                given: sector.to_owned(),
            });
        }

        Ok(classification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::{RawTaxonomyRow, load};
    use rstest::{fixture, rstest};

    #[fixture]
    fn table() -> TaxonomyTable {
        let row = |s: &str, g: &str, i: &str, sub: &str| {
            RawTaxonomyRow::new(Some(s), Some(g), Some(i), Some(sub))
        };
        load([
            row("Energy", "Energy", "Energy Equipment & Services", "Oil & Gas Drilling"),
            row("Energy", "Energy", "Oil, Gas & Consumable Fuels", "Integrated Oil & Gas"),
            row("Materials", "Materials", "Chemicals", "Specialty Chemicals"),
            row(
                "Information Technology",
                "Semiconductors & Semiconductor Equipment",
                "Semiconductors & Semiconductor Equipment",
                "Semiconductors",
            ),
        ])
        .unwrap()
    }

    #[rstest]
    fn test_sector_only(table: TaxonomyTable) {
        let c = table.classify("Energy", None, None).unwrap();
        assert_eq!(c.sector(), "Energy");
        assert_eq!(c.industry(), None);
        assert_eq!(c.sub_industry(), None);
    }

    #[rstest]
    fn test_invalid_sector(table: TaxonomyTable) {
        let err = table.classify("NotARealSector", None, None).unwrap_err();
        assert!(matches!(err, TaxonomyError::InvalidSector { ref value, .. } if value == "NotARealSector"));
    }

    #[rstest]
    fn test_invalid_industry(table: TaxonomyTable) {
        let err = table
            .classify("Energy", Some("Oil & Gas"), None)
            .unwrap_err();
        assert!(matches!(err, TaxonomyError::InvalidIndustry { .. }));
    }

    #[rstest]
    fn test_invalid_sub_industry(table: TaxonomyTable) {
        let err = table
            .classify("Energy", None, Some("Shale"))
            .unwrap_err();
        assert!(matches!(err, TaxonomyError::InvalidSubIndustry { .. }));
    }

    #[rstest]
    fn test_sector_checked_before_industry(table: TaxonomyTable) {
        let err = table
            .classify("Nowhere", Some("Nothing"), Some("Nada"))
            .unwrap_err();
        assert!(matches!(err, TaxonomyError::InvalidSector { .. }));
    }

    #[rstest]
    fn test_industry_inferred_from_sub_industry(table: TaxonomyTable) {
        let c = table
            .classify("Energy", None, Some("Integrated Oil & Gas"))
            .unwrap();
        assert_eq!(c.industry(), Some("Oil, Gas & Consumable Fuels"));
        assert_eq!(c.sub_industry(), Some("Integrated Oil & Gas"));
        assert_eq!(c.industry_group(&table), Some("Energy"));
    }

    #[rstest]
    fn test_empty_strings_are_omitted(table: TaxonomyTable) {
        let c = table.classify("Energy", Some(""), Some("")).unwrap();
        assert_eq!(c, table.classify("Energy", None, None).unwrap());
    }

    #[rstest]
    fn test_sector_is_not_inferred_or_cross_checked(table: TaxonomyTable) {
        // Semiconductors belong to Information Technology, yet the sector
        // stays as given.
        let c = table
            .classify("Materials", None, Some("Semiconductors"))
            .unwrap();
        assert_eq!(c.sector(), "Materials");
        assert_eq!(
            c.industry(),
            Some("Semiconductors & Semiconductor Equipment")
        );
    }

    #[rstest]
    fn test_industry_not_cross_checked_against_sector(table: TaxonomyTable) {
        let c = table.classify("Energy", Some("Chemicals"), None).unwrap();
        assert_eq!(c.industry(), Some("Chemicals"));
        assert!(!table.belongs_to("Chemicals", "Energy"));
    }

    #[rstest]
    #[case("Chemicals", "Materials", true)]
    #[case("Chemicals", "Energy", false)]
    #[case("Oil, Gas & Consumable Fuels", "Energy", true)]
    #[case("Unknown Industry", "Energy", false)]
    fn test_belongs_to(
        table: TaxonomyTable,
        #[case] industry: &str,
        #[case] sector: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(table.belongs_to(industry, sector), expected);
    }

    #[rstest]
    fn test_strict_rejects_foreign_industry(table: TaxonomyTable) {
        let err = table
            .classify_strict("Energy", Some("Chemicals"), None)
            .unwrap_err();
        assert_eq!(
            err,
            TaxonomyError::InconsistentClassification {
                child: "Chemicals".to_string(),
                expected: "Materials".to_string(),
                given: "Energy".to_string(),
            }
        );
    }

    #[rstest]
    fn test_strict_rejects_sub_industry_mismatch(table: TaxonomyTable) {
        let err = table
            .classify_strict(
                "Energy",
                Some("Energy Equipment & Services"),
                Some("Integrated Oil & Gas"),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            TaxonomyError::InconsistentClassification { ref child, .. } if child == "Integrated Oil & Gas"
        ));
    }

    #[rstest]
    fn test_strict_accepts_consistent_path(table: TaxonomyTable) {
        let c = table
            .classify_strict("Energy", None, Some("Oil & Gas Drilling"))
            .unwrap();
        assert_eq!(c.industry(), Some("Energy Equipment & Services"));
    }

    #[rstest]
    fn test_display(table: TaxonomyTable) {
        let c = table
            .classify("Energy", None, Some("Integrated Oil & Gas"))
            .unwrap();
        assert_eq!(
            c.to_string(),
            "Energy / Oil, Gas & Consumable Fuels / Integrated Oil & Gas"
        );
        assert_eq!(table.classify("Energy", None, None).unwrap().to_string(), "Energy");
    }

    #[rstest]
    fn test_serializes_absent_levels_as_null(table: TaxonomyTable) {
        let c = table.classify("Energy", None, None).unwrap();
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["sector"], "Energy");
        assert!(json["industry"].is_null());
    }
}
