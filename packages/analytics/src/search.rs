//! Free-text and category filtering over the enriched dataset.

use carbon_fleet_analytics_models::{SearchFilter, SearchOutcome};
use carbon_fleet_survey_models::{Dataset, EnrichedVehicle};

/// Filters vehicles by the search predicates, preserving dataset order.
///
/// The text predicate lower-cases the query and passes a vehicle when any
/// of brand, category, or fuel contains it as a substring; a blank query
/// passes everything. The category predicate compares the raw answer for
/// exact equality. Both must hold.
#[must_use]
pub fn search(vehicles: &[EnrichedVehicle], filter: &SearchFilter) -> Vec<EnrichedVehicle> {
    let query = filter.query.trim().to_lowercase();

    vehicles
        .iter()
        .filter(|vehicle| matches_text(vehicle, &query) && matches_category(vehicle, filter))
        .cloned()
        .collect()
}

/// Searches the current dataset, if one has been ingested.
///
/// Returns [`SearchOutcome::NoDataset`] before the first successful
/// ingest — a different answer from a loaded dataset with zero matches.
#[must_use]
pub fn search_dataset(dataset: Option<&Dataset>, filter: &SearchFilter) -> SearchOutcome {
    dataset.map_or(SearchOutcome::NoDataset, |dataset| {
        let vehicles = search(&dataset.vehicles, filter);
        log::debug!(
            "Search {filter:?} matched {}/{} vehicles",
            vehicles.len(),
            dataset.vehicles.len()
        );
        SearchOutcome::Matches { vehicles }
    })
}

fn matches_text(vehicle: &EnrichedVehicle, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    [&vehicle.brand, &vehicle.category, &vehicle.fuel]
        .iter()
        .any(|field| field.to_lowercase().contains(query))
}

fn matches_category(vehicle: &EnrichedVehicle, filter: &SearchFilter) -> bool {
    filter
        .category
        .as_ref()
        .is_none_or(|category| vehicle.category == *category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use carbon_fleet_survey_models::SourceKind;

    fn vehicle(brand: &str, category: &str, fuel: &str) -> EnrichedVehicle {
        EnrichedVehicle {
            brand: brand.to_owned(),
            category: category.to_owned(),
            fuel: fuel.to_owned(),
            environmental_talk: String::new(),
            monthly_distance_km: 0.0,
            monthly_liters: 0.0,
            monthly_footprint_kg: 0.0,
            daily_footprint_kg: 0.0,
        }
    }

    fn fleet() -> Vec<EnrichedVehicle> {
        vec![
            vehicle("Toyota Hilux", "Pickup", "Diésel"),
            vehicle("Honda CB190", "Moto", "Gasolina"),
            vehicle("Toyota Corolla", "Automóvil pequeño", "Híbrido"),
        ]
    }

    #[test]
    fn blank_filter_returns_everything_in_order() {
        let vehicles = fleet();
        let result = search(&vehicles, &SearchFilter::default());
        assert_eq!(result, vehicles);
    }

    #[test]
    fn query_is_case_insensitive_substring() {
        let result = search(
            &fleet(),
            &SearchFilter {
                query: "toyota".to_owned(),
                category: None,
            },
        );
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].brand, "Toyota Hilux");
        assert_eq!(result[1].brand, "Toyota Corolla");
    }

    #[test]
    fn query_matches_fuel_and_category_fields() {
        let by_fuel = search(
            &fleet(),
            &SearchFilter {
                query: "gasolina".to_owned(),
                category: None,
            },
        );
        assert_eq!(by_fuel.len(), 1);
        assert_eq!(by_fuel[0].brand, "Honda CB190");

        let by_category = search(
            &fleet(),
            &SearchFilter {
                query: "pickup".to_owned(),
                category: None,
            },
        );
        assert_eq!(by_category.len(), 1);
    }

    #[test]
    fn category_filter_is_exact_and_case_sensitive() {
        let exact = search(
            &fleet(),
            &SearchFilter {
                query: String::new(),
                category: Some("Moto".to_owned()),
            },
        );
        assert_eq!(exact.len(), 1);

        let wrong_case = search(
            &fleet(),
            &SearchFilter {
                query: String::new(),
                category: Some("moto".to_owned()),
            },
        );
        assert!(wrong_case.is_empty());
    }

    #[test]
    fn both_predicates_must_hold() {
        let result = search(
            &fleet(),
            &SearchFilter {
                query: "toyota".to_owned(),
                category: Some("Pickup".to_owned()),
            },
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].brand, "Toyota Hilux");
    }

    #[test]
    fn no_match_is_an_empty_list_not_an_error() {
        let result = search(
            &fleet(),
            &SearchFilter {
                query: "submarino".to_owned(),
                category: None,
            },
        );
        assert!(result.is_empty());
    }

    #[test]
    fn missing_dataset_is_distinct_from_zero_matches() {
        let filter = SearchFilter::default();
        assert_eq!(search_dataset(None, &filter), SearchOutcome::NoDataset);

        let dataset = Dataset::new(Vec::new(), SourceKind::PublishedSheet);
        assert_eq!(
            search_dataset(Some(&dataset), &filter),
            SearchOutcome::Matches { vehicles: Vec::new() }
        );
    }
}
