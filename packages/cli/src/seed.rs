//! Random test reports scattered around well-known cities.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use trash_map_report_models::{Cleanliness, Sparcity, TrashReport, TrashType};

/// Seed locations as `(latitude, longitude, name)`.
pub const CITIES: &[(f64, f64, &str)] = &[
    (40.7128, -74.0060, "New York"),
    (51.5074, -0.1278, "London"),
    (48.8566, 2.3522, "Paris"),
    (35.6762, 139.6503, "Tokyo"),
    (-33.8688, 151.2093, "Sydney"),
    (37.7749, -122.4194, "San Francisco"),
    (52.5200, 13.4050, "Berlin"),
    (55.7558, 37.6176, "Moscow"),
    (-22.9068, -43.1729, "Rio de Janeiro"),
    (19.4326, -99.1332, "Mexico City"),
    (25.7617, -80.1918, "Miami Beach"),
    (36.1627, -86.7816, "Nashville"),
    (34.0522, -118.2437, "Los Angeles"),
    (41.9028, 12.4964, "Rome"),
    (39.9042, 116.4074, "Beijing"),
    (45.4215, -75.6972, "Ottawa"),
    (59.9139, 10.7522, "Oslo"),
    (41.3851, 2.1734, "Barcelona"),
    (-37.8136, 144.9631, "Melbourne"),
    (1.3521, 103.8198, "Singapore"),
];

/// Maximum offset applied to each coordinate of a seed city (about 1 km).
pub const JITTER_DEGREES: f64 = 0.01;

/// Reported materials; test data never uses `unknown`.
const TRASH_TYPES: &[TrashType] = &[
    TrashType::Plastic,
    TrashType::Paper,
    TrashType::Metal,
    TrashType::Glass,
    TrashType::Organic,
    TrashType::Electronic,
    TrashType::Mixed,
];

/// Builds `count` random reports near [`CITIES`], all stamped `now`.
///
/// Weights fall in 0.1..=10 kg with one decimal; every categorical field is
/// filled in.
pub fn generate_reports<R: Rng>(
    rng: &mut R,
    count: usize,
    now: DateTime<Utc>,
) -> Vec<TrashReport> {
    (0..count)
        .map(|_| {
            let &(lat, lng, _) = CITIES.choose(rng).unwrap_or(&CITIES[0]);
            let kg: f64 = rng.gen_range(0.1..=10.0);

            TrashReport {
                id: uuid::Uuid::new_v4().to_string(),
                latitude: Some(lat + rng.gen_range(-JITTER_DEGREES..=JITTER_DEGREES)),
                longitude: Some(lng + rng.gen_range(-JITTER_DEGREES..=JITTER_DEGREES)),
                timestamp: Some(now),
                trash_type: TRASH_TYPES.choose(rng).copied(),
                estimated_kg: Some((kg * 10.0).round() / 10.0),
                sparcity: Sparcity::all().choose(rng).copied(),
                cleanliness: Cleanliness::all().choose(rng).copied(),
                image_reference: None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn near_some_city(lat: f64, lng: f64) -> bool {
        CITIES.iter().any(|&(c_lat, c_lng, _)| {
            (lat - c_lat).abs() <= JITTER_DEGREES + 1e-9
                && (lng - c_lng).abs() <= JITTER_DEGREES + 1e-9
        })
    }

    #[test]
    fn generates_requested_number_of_complete_reports() {
        let mut rng = StdRng::seed_from_u64(7);
        let reports = generate_reports(&mut rng, 200, Utc::now());

        assert_eq!(reports.len(), 200);
        for report in &reports {
            let (lat, lng) = report.location().unwrap();
            assert!(near_some_city(lat, lng), "({lat}, {lng})");

            let kg = report.estimated_kg.unwrap();
            assert!((0.1..=10.0).contains(&kg), "{kg}");
            assert!(((kg * 10.0).round() - kg * 10.0).abs() < 1e-9);

            assert!(report.trash_type.is_some());
            assert_ne!(report.trash_type, Some(TrashType::Unknown));
            assert!(report.sparcity.is_some());
            assert!(report.cleanliness.is_some());
        }
    }

    #[test]
    fn ids_are_unique() {
        let mut rng = StdRng::seed_from_u64(1);
        let reports = generate_reports(&mut rng, 50, Utc::now());
        let mut ids: Vec<&str> = reports.iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn zero_count_is_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(generate_reports(&mut rng, 0, Utc::now()).is_empty());
    }
}
