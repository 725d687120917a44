//! Region → country → site rollup of query records.
//!
//! Queries whose region or country is `"Unknown"` stay out of the tree; they
//! are still part of the flat query totals. Site ids are never filtered.

use std::collections::{BTreeMap, HashMap, HashSet};

use dqi_model::{QueryRecord, RegionNode, UNKNOWN};

pub fn build_hierarchy(queries: &[QueryRecord]) -> BTreeMap<String, RegionNode> {
    let mut regions: BTreeMap<String, RegionNode> = BTreeMap::new();
    let mut patients: HashMap<(&str, &str, &str), HashSet<&str>> = HashMap::new();

    for query in queries {
        if query.region == UNKNOWN || query.country == UNKNOWN {
            continue;
        }
        let open = usize::from(query.is_open());

        let country = regions
            .entry(query.region.clone())
            .or_default()
            .countries
            .entry(query.country.clone())
            .or_default();
        country.total_queries += 1;
        country.open_queries += open;

        let site = country.sites.entry(query.site_id.clone()).or_default();
        site.total_queries += 1;
        site.open_queries += open;

        patients
            .entry((
                query.region.as_str(),
                query.country.as_str(),
                query.site_id.as_str(),
            ))
            .or_default()
            .insert(query.subject_id.as_str());
    }

    for (region_name, region) in &mut regions {
        for (country_name, country) in &mut region.countries {
            for (site_id, site) in &mut country.sites {
                site.patients = patients
                    .get(&(
                        region_name.as_str(),
                        country_name.as_str(),
                        site_id.as_str(),
                    ))
                    .map_or(0, HashSet::len);
            }
            country.total_sites = country.sites.len();
        }
        region.total_countries = region.countries.len();
    }

    regions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(region: &str, country: &str, site: &str, subject: &str, status: &str) -> QueryRecord {
        QueryRecord {
            study: "Study 1".to_string(),
            region: region.to_string(),
            country: country.to_string(),
            site_id: site.to_string(),
            subject_id: subject.to_string(),
            query_status: status.to_string(),
            days_since_open: 1,
            action_owner: UNKNOWN.to_string(),
        }
    }

    #[test]
    fn builds_nested_counts() {
        let regions = build_hierarchy(&[
            query("EMEA", "DEU", "101", "S-1", "Open"),
            query("EMEA", "DEU", "101", "S-1", "Closed"),
            query("EMEA", "DEU", "101", "S-2", "Open"),
            query("EMEA", "DEU", "102", "S-3", "Closed"),
            query("EMEA", "FRA", "201", "S-4", "Open"),
            query("AMER", "USA", "Unknown", "S-5", "Open"),
        ]);

        assert_eq!(regions.keys().collect::<Vec<_>>(), vec!["AMER", "EMEA"]);
        let emea = &regions["EMEA"];
        assert_eq!(emea.total_countries, 2);

        let deu = &emea.countries["DEU"];
        assert_eq!(deu.total_sites, 2);
        assert_eq!(deu.total_queries, 4);
        assert_eq!(deu.open_queries, 2);

        let site = &deu.sites["101"];
        assert_eq!(site.total_queries, 3);
        assert_eq!(site.open_queries, 2);
        assert_eq!(site.patients, 2);

        // Unknown site ids are kept.
        assert_eq!(regions["AMER"].countries["USA"].sites["Unknown"].total_queries, 1);
    }

    #[test]
    fn unknown_region_and_country_excluded() {
        let regions = build_hierarchy(&[
            query(UNKNOWN, "DEU", "101", "S-1", "Open"),
            query("EMEA", UNKNOWN, "101", "S-1", "Open"),
        ]);
        assert!(regions.is_empty());
    }

    #[test]
    fn same_site_id_in_two_countries_counts_patients_separately() {
        let regions = build_hierarchy(&[
            query("EMEA", "DEU", "1", "S-1", "Open"),
            query("EMEA", "FRA", "1", "S-1", "Open"),
            query("EMEA", "FRA", "1", "S-2", "Open"),
        ]);
        assert_eq!(regions["EMEA"].countries["DEU"].sites["1"].patients, 1);
        assert_eq!(regions["EMEA"].countries["FRA"].sites["1"].patients, 2);
    }

    #[test]
    fn country_totals_equal_site_sums() {
        let regions = build_hierarchy(&[
            query("APAC", "JPN", "1", "S-1", "Open"),
            query("APAC", "JPN", "2", "S-2", "Closed"),
            query("APAC", "JPN", "2", "S-3", "Open"),
            query("APAC", "KOR", "9", "S-9", "Closed"),
        ]);
        for region in regions.values() {
            for country in region.countries.values() {
                let site_total: usize = country.sites.values().map(|s| s.total_queries).sum();
                let site_open: usize = country.sites.values().map(|s| s.open_queries).sum();
                assert_eq!(country.total_queries, site_total);
                assert_eq!(country.open_queries, site_open);
            }
        }
    }
}
