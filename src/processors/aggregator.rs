use crate::models::JourneyRecord;
use std::collections::BTreeMap;

/// Total distance per driver, ordered by driver id.
pub type DriverMileage = BTreeMap<String, f64>;

/// Sum `distance_km` per driver id.
///
/// Only drivers that appear in `records` get an entry. Distances are added
/// in input order.
pub fn aggregate_by_driver<'a, I>(records: I) -> DriverMileage
where
    I: IntoIterator<Item = &'a JourneyRecord>,
{
    let mut mileage = DriverMileage::new();

    for record in records {
        *mileage.entry(record.driver_id.clone()).or_insert(0.0) += record.distance_km;
    }

    mileage
}

/// The driver with the highest total distance, or `None` for an empty mapping.
///
/// Ties go to the lexicographically smallest driver id: the map iterates in
/// ascending key order and only a strictly greater total replaces the leader.
pub fn most_active_driver(mileage: &DriverMileage) -> Option<(&str, f64)> {
    let mut leader: Option<(&str, f64)> = None;

    for (driver_id, &total) in mileage {
        match leader {
            Some((_, best)) if total <= best => {}
            _ => leader = Some((driver_id.as_str(), total)),
        }
    }

    leader
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JourneyFields;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn journey(driver: &str, distance: f64) -> JourneyRecord {
        let start = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();

        JourneyRecord::new(JourneyFields {
            journey_id: format!("{}-{}", driver, distance),
            driver_id: driver.to_string(),
            start_time: start,
            end_time: start + chrono::Duration::minutes(45),
            start_lat: "51.5".to_string(),
            start_lon: "-0.1".to_string(),
            end_lat: "51.6".to_string(),
            end_lon: "-0.2".to_string(),
            start_odometer: 500.0,
            end_odometer: 500.0 + distance,
        })
    }

    #[test]
    fn test_aggregate_by_driver() {
        let records = vec![journey("D1", 50.0), journey("D2", 100.0), journey("D1", 30.0)];
        let mileage = aggregate_by_driver(&records);

        let expected: DriverMileage = [("D1".to_string(), 80.0), ("D2".to_string(), 100.0)]
            .into_iter()
            .collect();
        assert_eq!(mileage, expected);
        assert_eq!(most_active_driver(&mileage), Some(("D2", 100.0)));
    }

    #[test]
    fn test_totals_sum_to_overall_distance() {
        let records = vec![
            journey("D3", 12.5),
            journey("D1", 7.25),
            journey("D3", 0.5),
            journey("D2", 40.0),
        ];
        let mileage = aggregate_by_driver(&records);

        let overall: f64 = records.iter().map(|r| r.distance_km).sum();
        let by_driver: f64 = mileage.values().sum();
        assert_eq!(overall, by_driver);
        assert_eq!(mileage["D3"], 13.0);
    }

    #[test]
    fn test_driver_ids_are_exact_strings() {
        let records = vec![journey("d1", 10.0), journey("D1", 20.0), journey("D1 ", 5.0)];
        let mileage = aggregate_by_driver(&records);

        assert_eq!(mileage.len(), 3);
    }

    #[test]
    fn test_tie_goes_to_smallest_driver_id() {
        let records = vec![journey("D9", 40.0), journey("D2", 40.0), journey("D5", 10.0)];
        let mileage = aggregate_by_driver(&records);

        assert_eq!(most_active_driver(&mileage), Some(("D2", 40.0)));
    }

    #[test]
    fn test_empty_input() {
        let mileage = aggregate_by_driver(Vec::<&JourneyRecord>::new());

        assert!(mileage.is_empty());
        assert_eq!(most_active_driver(&mileage), None);
    }
}
