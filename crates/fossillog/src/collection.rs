//! Collection progress derived from the find log.
//!
//! Nothing here is cached. Every query re-reads the finds it is given, so the
//! result always reflects the current log.

use std::collections::HashSet;

use serde::Serialize;

use crate::catalog::{sort_names, Catalog, Region};
use crate::find::Find;

/// Distinct non-empty fossil names that appear in any find.
#[must_use]
pub fn collected_fossil_names(finds: &[Find]) -> HashSet<String> {
    finds
        .iter()
        .map(Find::fossil)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// The catalog split into collected and not-yet-collected fossils.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Partition {
    /// Catalog fossils with at least one find, in catalog order.
    pub collected: Vec<String>,
    /// Catalog fossils without a find, in catalog order.
    pub to_collect: Vec<String>,
}

impl Partition {
    /// Total number of catalog fossils.
    #[must_use]
    pub fn total(&self) -> usize {
        self.collected.len() + self.to_collect.len()
    }
}

/// Split catalog fossil names by membership in `collected`.
///
/// Each catalog name lands in exactly one half and both halves keep the
/// order of `catalog_names`. Collected names that are not in the catalog
/// (free-text finds) do not appear in either half.
#[must_use]
pub fn partition(catalog_names: &[String], collected: &HashSet<String>) -> Partition {
    let (collected, to_collect) = catalog_names
        .iter()
        .cloned()
        .partition(|name| collected.contains(name));
    Partition {
        collected,
        to_collect,
    }
}

/// One typical fossil of a region with its collected flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FossilStatus {
    /// Fossil name.
    pub name: String,
    /// Whether any find, in any region, names this fossil.
    pub collected: bool,
}

/// Detail view of one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionProgress<'a> {
    /// The region.
    pub region: &'a Region,
    /// Its typical fossils, alphabetical and without duplicates.
    pub fossils: Vec<FossilStatus>,
}

impl RegionProgress<'_> {
    /// Number of this region's typical fossils already collected.
    #[must_use]
    pub fn collected_count(&self) -> usize {
        self.fossils.iter().filter(|f| f.collected).count()
    }
}

/// Build the detail view of a region.
///
/// Collection status is global: a fossil found in one region counts as
/// collected in every region that lists it. Returns `None` for an unknown
/// region.
#[must_use]
pub fn region_progress<'a>(
    catalog: &'a Catalog,
    region_id: &str,
    finds: &[Find],
) -> Option<RegionProgress<'a>> {
    let region = catalog.find_region(region_id)?;
    let collected = collected_fossil_names(finds);

    let mut names: Vec<String> = region.fossils.clone();
    sort_names(&mut names);
    names.dedup();

    let fossils = names
        .into_iter()
        .map(|name| FossilStatus {
            collected: collected.contains(&name),
            name,
        })
        .collect();
    Some(RegionProgress { region, fossils })
}

/// Catalog-wide collection state for the current log.
#[must_use]
pub fn catalog_partition(catalog: &Catalog, finds: &[Find]) -> Partition {
    partition(catalog.all_fossil_names(), &collected_fossil_names(finds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_catalog;
    use crate::find::{FindLog, NewFind};
    use proptest::prelude::*;

    fn log_with(fossils: &[(&str, &str)]) -> FindLog {
        let mut log = FindLog::new();
        for (fossil, region) in fossils {
            log.append(NewFind {
                fossil: (*fossil).to_string(),
                region_id: (*region).to_string(),
                ..NewFind::default()
            })
            .unwrap();
        }
        log
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_collected_fossil_names_distinct() {
        let log = log_with(&[("Seeigel", "ostsee"), ("Seeigel", "ruegen"), ("Ammonit", "alb")]);
        let collected = collected_fossil_names(log.all());
        assert_eq!(collected.len(), 2);
        assert!(collected.contains("Seeigel"));
        assert!(collected.contains("Ammonit"));
    }

    #[test]
    fn test_collected_fossil_names_empty_log() {
        assert!(collected_fossil_names(&[]).is_empty());
    }

    #[test]
    fn test_partition_complete_and_disjoint() {
        let catalog = names(&["Ammonit", "Belemnit", "Koralle", "Seeigel"]);
        let collected_sets = [
            HashSet::new(),
            ["Belemnit".to_string()].into_iter().collect(),
            ["Ammonit", "Seeigel", "Unbekannt"]
                .iter()
                .map(ToString::to_string)
                .collect::<HashSet<_>>(),
            catalog.iter().cloned().collect(),
        ];
        for collected in &collected_sets {
            let p = partition(&catalog, collected);
            let mut union: Vec<String> = p.collected.iter().chain(&p.to_collect).cloned().collect();
            sort_names(&mut union);
            assert_eq!(union, catalog);
            assert!(p.collected.iter().all(|n| !p.to_collect.contains(n)));
            assert_eq!(p.total(), catalog.len());
        }
    }

    #[test]
    fn test_partition_preserves_catalog_order() {
        let catalog = names(&["Ammonit", "Belemnit", "Koralle", "Seeigel"]);
        let collected: HashSet<String> = names(&["Seeigel", "Ammonit"]).into_iter().collect();
        let p = partition(&catalog, &collected);
        assert_eq!(p.collected, vec!["Ammonit", "Seeigel"]);
        assert_eq!(p.to_collect, vec!["Belemnit", "Koralle"]);
    }

    #[test]
    fn test_new_find_moves_only_its_fossil() {
        let catalog = sample_catalog();
        let mut log = log_with(&[("Seeigel", "ostsee")]);
        let before = catalog_partition(&catalog, log.all());
        assert!(before.to_collect.contains(&"Ammonit".to_string()));

        log.append(NewFind {
            fossil: "Ammonit".to_string(),
            region_id: "ostsee".to_string(),
            ..NewFind::default()
        })
        .unwrap();
        let after = catalog_partition(&catalog, log.all());

        assert!(after.collected.contains(&"Ammonit".to_string()));
        assert!(!after.to_collect.contains(&"Ammonit".to_string()));
        let mut expected_collected = before.collected.clone();
        expected_collected.push("Ammonit".to_string());
        sort_names(&mut expected_collected);
        assert_eq!(after.collected, expected_collected);
        let expected_to_collect: Vec<String> = before
            .to_collect
            .into_iter()
            .filter(|n| n != "Ammonit")
            .collect();
        assert_eq!(after.to_collect, expected_to_collect);
    }

    #[test]
    fn test_free_text_fossil_not_in_partition() {
        let catalog = sample_catalog();
        let log = log_with(&[("Trilobit", "ostsee")]);
        let p = catalog_partition(&catalog, log.all());
        assert!(p.collected.is_empty());
        assert_eq!(p.to_collect.len(), catalog.all_fossil_names().len());
    }

    #[test]
    fn test_region_progress_is_catalog_wide() {
        let catalog = sample_catalog();
        let log = log_with(&[("Belemnit", "alb")]);
        let progress = region_progress(&catalog, "ruegen", log.all()).unwrap();

        let view: Vec<(&str, bool)> = progress
            .fossils
            .iter()
            .map(|f| (f.name.as_str(), f.collected))
            .collect();
        assert_eq!(
            view,
            vec![("Belemnit", true), ("Schwamm", false), ("Seeigel", false)]
        );
        assert_eq!(progress.collected_count(), 1);
    }

    #[test]
    fn test_region_progress_lists_duplicate_entries_once() {
        let region = Region {
            id: "r".to_string(),
            name: "R".to_string(),
            fossils: names(&["Seeigel", "Koralle", "Seeigel"]),
            locations: Vec::new(),
        };
        let catalog = Catalog::from_regions(vec![region]).unwrap();
        assert_eq!(catalog.find_region("r").unwrap().fossils, ["Seeigel", "Koralle"]);
        let progress = region_progress(&catalog, "r", &[]).unwrap();
        let listed: Vec<&str> = progress.fossils.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(listed, vec!["Koralle", "Seeigel"]);
    }

    #[test]
    fn test_region_progress_unknown_region() {
        let catalog = sample_catalog();
        assert!(region_progress(&catalog, "mars", &[]).is_none());
    }

    fn distinct(names: Vec<String>) -> Vec<String> {
        let mut seen = HashSet::new();
        names.into_iter().filter(|n| seen.insert(n.clone())).collect()
    }

    proptest! {
        /// Every catalog name lands in exactly one half, in catalog order.
        #[test]
        fn prop_partition_complete_disjoint_ordered(
            catalog in prop::collection::vec("[A-Za-zÄÖÜäöüß-]{1,8}", 0..16),
            picks in prop::collection::vec(any::<bool>(), 16),
            extra in prop::collection::hash_set("[A-Za-z]{1,8}", 0..6),
        ) {
            let catalog = distinct(catalog);
            let mut collected: HashSet<String> = catalog
                .iter()
                .zip(&picks)
                .filter(|(_, picked)| **picked)
                .map(|(name, _)| name.clone())
                .collect();
            collected.extend(extra);

            let p = partition(&catalog, &collected);

            let expected_collected: Vec<String> =
                catalog.iter().filter(|n| collected.contains(*n)).cloned().collect();
            let expected_to_collect: Vec<String> =
                catalog.iter().filter(|n| !collected.contains(*n)).cloned().collect();
            prop_assert_eq!(&p.collected, &expected_collected);
            prop_assert_eq!(&p.to_collect, &expected_to_collect);
            prop_assert_eq!(p.total(), catalog.len());
            prop_assert!(p.collected.iter().all(|n| !p.to_collect.contains(n)));
        }
    }
}
