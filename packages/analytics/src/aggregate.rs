//! Fleet-wide summary statistics.

use carbon_fleet_analytics_models::{CategoryFootprint, FleetSummary, FuelFootprint};
use carbon_fleet_survey_models::{ENVIRONMENTAL_TALK_YES, EnrichedVehicle};

/// Reduces an enriched dataset into the summary the dashboard cards and
/// charts consume.
///
/// Totals over an empty input are zero; the per-vehicle averages and the
/// environmental-talk share are reported as `None` instead of dividing by
/// zero. Breakdown entries appear in the order their category/fuel label
/// was first seen in the survey.
#[must_use]
pub fn summarize(vehicles: &[EnrichedVehicle]) -> FleetSummary {
    let total_footprint_kg: f64 = vehicles.iter().map(|v| v.monthly_footprint_kg).sum();
    let total_daily_kg: f64 = vehicles.iter().map(|v| v.daily_footprint_kg).sum();
    let total_monthly_distance_km: f64 = vehicles.iter().map(|v| v.monthly_distance_km).sum();

    let (avg_monthly_footprint_kg, avg_daily_footprint_kg, environmental_talk_share) =
        if vehicles.is_empty() {
            (None, None, None)
        } else {
            #[allow(clippy::cast_precision_loss)]
            let count = vehicles.len() as f64;
            let talks = vehicles
                .iter()
                .filter(|v| v.environmental_talk.trim() == ENVIRONMENTAL_TALK_YES)
                .count();
            #[allow(clippy::cast_precision_loss)]
            let talk_share = talks as f64 / count;
            (
                Some(total_footprint_kg / count),
                Some(total_daily_kg / count),
                Some(talk_share),
            )
        };

    let mut footprint_by_category: Vec<CategoryFootprint> = Vec::new();
    let mut footprint_by_fuel: Vec<FuelFootprint> = Vec::new();

    for vehicle in vehicles {
        if let Some(entry) = footprint_by_category
            .iter_mut()
            .find(|e| e.category == vehicle.category)
        {
            entry.footprint_kg += vehicle.monthly_footprint_kg;
        } else {
            footprint_by_category.push(CategoryFootprint {
                category: vehicle.category.clone(),
                footprint_kg: vehicle.monthly_footprint_kg,
            });
        }

        if let Some(entry) = footprint_by_fuel
            .iter_mut()
            .find(|e| e.fuel == vehicle.fuel)
        {
            entry.footprint_kg += vehicle.monthly_footprint_kg;
        } else {
            footprint_by_fuel.push(FuelFootprint {
                fuel: vehicle.fuel.clone(),
                footprint_kg: vehicle.monthly_footprint_kg,
            });
        }
    }

    FleetSummary {
        vehicle_count: vehicles.len() as u64,
        total_footprint_kg,
        total_monthly_distance_km,
        avg_monthly_footprint_kg,
        avg_daily_footprint_kg,
        environmental_talk_share,
        footprint_by_category,
        footprint_by_fuel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(category: &str, fuel: &str, footprint: f64, talk: &str) -> EnrichedVehicle {
        EnrichedVehicle {
            brand: "Test".to_owned(),
            category: category.to_owned(),
            fuel: fuel.to_owned(),
            environmental_talk: talk.to_owned(),
            monthly_distance_km: 100.0,
            monthly_liters: footprint / 2.31,
            monthly_footprint_kg: footprint,
            daily_footprint_kg: footprint / 30.0,
        }
    }

    #[test]
    fn empty_dataset_reports_absent_averages() {
        let summary = summarize(&[]);
        assert_eq!(summary.vehicle_count, 0);
        assert!(summary.total_footprint_kg.abs() < f64::EPSILON);
        assert_eq!(summary.avg_monthly_footprint_kg, None);
        assert_eq!(summary.avg_daily_footprint_kg, None);
        assert_eq!(summary.environmental_talk_share, None);
        assert!(summary.footprint_by_category.is_empty());
        assert!(summary.footprint_by_fuel.is_empty());
    }

    #[test]
    fn totals_and_averages() {
        let vehicles = vec![
            vehicle("Moto", "Gasolina", 20.0, "Sí"),
            vehicle("Pickup", "Diésel", 40.0, "No"),
        ];

        let summary = summarize(&vehicles);
        assert_eq!(summary.vehicle_count, 2);
        assert!((summary.total_footprint_kg - 60.0).abs() < 1e-9);
        assert!((summary.total_monthly_distance_km - 200.0).abs() < 1e-9);
        assert!((summary.avg_monthly_footprint_kg.unwrap() - 30.0).abs() < 1e-9);
        assert!((summary.avg_daily_footprint_kg.unwrap() - 1.0).abs() < 1e-9);
        assert!((summary.environmental_talk_share.unwrap() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn category_breakdown_partitions_the_total() {
        let vehicles = vec![
            vehicle("Moto", "Gasolina", 10.0, "No"),
            vehicle("Pickup", "Diésel", 25.0, "No"),
            vehicle("Moto", "Gasolina", 5.0, "No"),
        ];

        let summary = summarize(&vehicles);
        let partition: f64 = summary
            .footprint_by_category
            .iter()
            .map(|e| e.footprint_kg)
            .sum();
        assert!((partition - summary.total_footprint_kg).abs() < 1e-9);

        let fuel_partition: f64 = summary.footprint_by_fuel.iter().map(|e| e.footprint_kg).sum();
        assert!((fuel_partition - summary.total_footprint_kg).abs() < 1e-9);
    }

    #[test]
    fn breakdown_keeps_first_seen_order() {
        let vehicles = vec![
            vehicle("Pickup", "Diésel", 1.0, "No"),
            vehicle("Moto", "Gasolina", 2.0, "No"),
            vehicle("Pickup", "Gasolina", 3.0, "No"),
        ];

        let summary = summarize(&vehicles);
        let categories: Vec<&str> = summary
            .footprint_by_category
            .iter()
            .map(|e| e.category.as_str())
            .collect();
        assert_eq!(categories, vec!["Pickup", "Moto"]);
        assert!((summary.footprint_by_category[0].footprint_kg - 4.0).abs() < 1e-9);

        let fuels: Vec<&str> = summary
            .footprint_by_fuel
            .iter()
            .map(|e| e.fuel.as_str())
            .collect();
        assert_eq!(fuels, vec!["Diésel", "Gasolina"]);
    }

    #[test]
    fn unknown_labels_group_under_their_raw_answer() {
        let vehicles = vec![
            vehicle("Tractor", "Gasolina", 7.0, "No"),
            vehicle("Tractor", "Gasolina", 3.0, "No"),
        ];

        let summary = summarize(&vehicles);
        assert_eq!(summary.footprint_by_category.len(), 1);
        assert_eq!(summary.footprint_by_category[0].category, "Tractor");
        assert!((summary.footprint_by_category[0].footprint_kg - 10.0).abs() < 1e-9);
    }
}
