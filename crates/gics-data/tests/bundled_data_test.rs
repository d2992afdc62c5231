//! Integration tests against the reference tables shipped in `data/`.

use gics_data::{DataConfig, load_constituents, load_hierarchy, validate_constituents};
use gics_taxonomy::{HierarchyLevel, TaxonomyError, peers_at};

#[test]
fn test_bundled_hierarchy_shape() {
    let table = load_hierarchy(DataConfig::bundled().hierarchy_path).unwrap();

    assert_eq!(table.sectors().len(), 11);
    assert_eq!(table.industry_groups().len(), 25);
    assert_eq!(table.industries().len(), 74);
    assert_eq!(table.sub_industries().len(), 163);
    assert_eq!(table.len(), 163);
}

#[test]
fn test_bundled_hierarchy_classification() {
    let table = load_hierarchy(DataConfig::bundled().hierarchy_path).unwrap();

    let energy = table.classify("Energy", None, None).unwrap();
    assert_eq!(energy.industry(), None);
    assert_eq!(energy.sub_industry(), None);

    let xom = table
        .classify("Energy", None, Some("Integrated Oil & Gas"))
        .unwrap();
    assert_eq!(xom.industry(), Some("Oil, Gas & Consumable Fuels"));

    assert!(matches!(
        table.classify("NotARealSector", None, None),
        Err(TaxonomyError::InvalidSector { .. })
    ));

    // Accepted without a cross-check, rejected by belongs_to.
    assert!(table.classify("Energy", Some("Chemicals"), None).is_ok());
    assert!(!table.belongs_to("Chemicals", "Energy"));
    assert!(table.belongs_to("Chemicals", "Materials"));
}

#[test]
fn test_bundled_constituents_fit_hierarchy() {
    let config = DataConfig::bundled();
    let table = load_hierarchy(&config.hierarchy_path).unwrap();
    let index = load_constituents(&config.constituents_path).unwrap();

    assert!(index.len() >= 100);
    assert!(validate_constituents(&index, &table).is_empty());

    let counts = index.sector_counts();
    for sector in table.sectors() {
        assert!(counts.get(sector).copied().unwrap_or(0) > 0, "{sector} has no constituents");
    }
}

#[test]
fn test_bundled_peers() {
    let config = DataConfig::bundled();
    let table = load_hierarchy(&config.hierarchy_path).unwrap();
    let index = load_constituents(&config.constituents_path).unwrap();

    let integrated = table
        .classify("Energy", None, Some("Integrated Oil & Gas"))
        .unwrap();
    assert_eq!(
        peers_at(HierarchyLevel::SubIndustry, &integrated, &index),
        ["XOM", "CVX"]
    );

    let airlines = index.peers_of("DAL", HierarchyLevel::SubIndustry).unwrap();
    assert_eq!(airlines, ["UAL", "LUV"]);

    let sector_only = table.classify("Utilities", None, None).unwrap();
    assert!(peers_at(HierarchyLevel::SubIndustry, &sector_only, &index).is_empty());
}

#[test]
fn test_reload_is_deterministic() {
    let path = DataConfig::bundled().hierarchy_path;
    assert_eq!(load_hierarchy(&path).unwrap(), load_hierarchy(&path).unwrap());
}
