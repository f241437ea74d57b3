//! Reachability checks for sampled candidates.
//!
//! `is_on_water` and `has_ferry_in_route` fail open: when the provider call
//! fails the candidate is treated as passing. `all_modes_available` fails
//! closed. Both behaviors change acceptance rates and must stay as they are.

use super::maps::{MapsProvider, TravelMode};
use super::types::Coordinate;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    OnWater,
    RequiresFerry,
    ModesUnavailable,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RejectReason::OnWater => "On water",
            RejectReason::RequiresFerry => "Requires ferry",
            RejectReason::ModesUnavailable => "Not all modes available",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(RejectReason),
}

/// Decides whether a sampled candidate is kept.
pub trait CandidateFilter {
    fn evaluate(&self, origin: Coordinate, candidate: Coordinate) -> Verdict;
}

/// Returns true if `point` looks like water (lake, ocean, ...).
pub fn is_on_water<P: MapsProvider + ?Sized>(provider: &P, point: Coordinate) -> bool {
    let results = match provider.reverse_geocode(point) {
        Ok(results) => results,
        Err(err) => {
            log::warn!("Could not check if {} is on water: {}", point, err);
            return false;
        }
    };

    let Some(first) = results.first() else {
        return true;
    };

    if first.has_type("natural_feature") && !first.has_component_type(&["route"]) {
        return true;
    }

    // City- or country-level matches with no street detail are usually open water or parkland.
    !first.has_component_type(&["street_number", "route"])
}

/// Returns true if the driving route from `origin` to `destination` uses a ferry.
pub fn has_ferry_in_route<P: MapsProvider + ?Sized>(
    provider: &P,
    origin: Coordinate,
    destination: Coordinate,
) -> bool {
    let routes = match provider.directions(origin, destination, TravelMode::Driving) {
        Ok(routes) => routes,
        Err(err) => {
            log::warn!("Could not check for ferry to {}: {}", destination, err);
            return false;
        }
    };

    let Some(route) = routes.first() else {
        return false;
    };

    let uses_ferry = route.steps().any(|step| {
        step.travel_mode.eq_ignore_ascii_case("ferry")
            || step.instructions.to_lowercase().contains("ferry")
    });
    uses_ferry
}

/// Returns true only if every travel mode reports an `OK` element status.
pub fn all_modes_available<P: MapsProvider + ?Sized>(
    provider: &P,
    origin: Coordinate,
    destination: Coordinate,
) -> bool {
    for mode in TravelMode::ALL {
        match provider.distance_matrix_status(origin, destination, mode) {
            Ok(status) if status == "OK" => {}
            Ok(status) => {
                log::debug!("{} to {} is {} by {}", origin, destination, status, mode);
                return false;
            }
            Err(err) => {
                log::warn!("Distance matrix for {} to {} failed: {}", mode, destination, err);
                return false;
            }
        }
    }
    true
}

/// The three provider-backed checks, evaluated cheapest-rejection first.
pub struct ReachabilityFilter<'a, P: MapsProvider + ?Sized> {
    provider: &'a P,
}

impl<'a, P: MapsProvider + ?Sized> ReachabilityFilter<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }
}

impl<P: MapsProvider + ?Sized> CandidateFilter for ReachabilityFilter<'_, P> {
    fn evaluate(&self, origin: Coordinate, candidate: Coordinate) -> Verdict {
        if is_on_water(self.provider, candidate) {
            return Verdict::Rejected(RejectReason::OnWater);
        }
        if has_ferry_in_route(self.provider, origin, candidate) {
            return Verdict::Rejected(RejectReason::RequiresFerry);
        }
        if !all_modes_available(self.provider, origin, candidate) {
            return Verdict::Rejected(RejectReason::ModesUnavailable);
        }
        Verdict::Accepted
    }
}

/// Re-checks accepted locations and returns the 1-based numbers of any now flagged as water.
pub fn verify_on_land<P: MapsProvider + ?Sized>(
    provider: &P,
    locations: &[Coordinate],
) -> Vec<(usize, Coordinate)> {
    let mut water_points = Vec::new();
    for (i, loc) in locations.iter().enumerate() {
        let number = i + 1;
        if is_on_water(provider, *loc) {
            log::warn!("✗ Location #{} is on water: ({:.4}, {:.4})", number, loc.lat, loc.lng);
            water_points.push((number, *loc));
        } else {
            log::info!("✓ Location #{} is on land", number);
        }
    }
    water_points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::maps::types::{AddressComponent, Leg, Step};
    use crate::sdk::maps::{GeocodeResult, MapsError, RouteResult};
    use std::sync::Mutex;

    const ORIGIN: Coordinate = Coordinate::new(43.6452, -79.3806);
    const DEST: Coordinate = Coordinate::new(43.70, -79.40);

    /// Scripted provider that counts every call it receives.
    struct FakeProvider {
        geocode: Result<Vec<GeocodeResult>, String>,
        routes: Result<Vec<RouteResult>, String>,
        // One entry per mode in `TravelMode::ALL` order; `Err` simulates a failed request.
        matrix: Vec<Result<&'static str, String>>,
        calls: Mutex<Calls>,
    }

    #[derive(Default, Debug)]
    struct Calls {
        geocode: usize,
        directions: usize,
        matrix: Vec<TravelMode>,
    }

    impl FakeProvider {
        fn land() -> Self {
            Self {
                geocode: Ok(vec![street_address()]),
                routes: Ok(vec![route(&[("DRIVING", "Head north on Bay St")])]),
                matrix: vec![Ok("OK"); 4],
                calls: Mutex::new(Calls::default()),
            }
        }

        fn calls(&self) -> std::sync::MutexGuard<'_, Calls> {
            self.calls.lock().unwrap()
        }
    }

    impl MapsProvider for FakeProvider {
        fn reverse_geocode(&self, _point: Coordinate) -> Result<Vec<GeocodeResult>, MapsError> {
            self.calls().geocode += 1;
            self.geocode.clone().map_err(MapsError::Generic)
        }

        fn directions(
            &self,
            _origin: Coordinate,
            _destination: Coordinate,
            mode: TravelMode,
        ) -> Result<Vec<RouteResult>, MapsError> {
            assert_eq!(mode, TravelMode::Driving);
            self.calls().directions += 1;
            self.routes.clone().map_err(MapsError::Generic)
        }

        fn distance_matrix_status(
            &self,
            _origin: Coordinate,
            _destination: Coordinate,
            mode: TravelMode,
        ) -> Result<String, MapsError> {
            let index = {
                let mut calls = self.calls();
                calls.matrix.push(mode);
                calls.matrix.len() - 1
            };
            self.matrix[index]
                .clone()
                .map(str::to_string)
                .map_err(MapsError::Generic)
        }
    }

    fn component(tags: &[&str]) -> AddressComponent {
        AddressComponent {
            long_name: String::new(),
            types: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn geocode(types: &[&str], components: &[&[&str]]) -> GeocodeResult {
        GeocodeResult {
            types: types.iter().map(|t| t.to_string()).collect(),
            address_components: components.iter().map(|c| component(c)).collect(),
            formatted_address: String::new(),
        }
    }

    fn street_address() -> GeocodeResult {
        geocode(
            &["street_address"],
            &[&["street_number"], &["route"], &["locality", "political"]],
        )
    }

    fn route(steps: &[(&str, &str)]) -> RouteResult {
        RouteResult {
            legs: vec![Leg {
                steps: steps
                    .iter()
                    .map(|(mode, text)| Step {
                        travel_mode: mode.to_string(),
                        instructions: text.to_string(),
                    })
                    .collect(),
            }],
        }
    }

    #[test]
    fn street_address_is_land() {
        assert!(!is_on_water(&FakeProvider::land(), DEST));
    }

    #[test]
    fn no_geocode_result_is_water() {
        let provider = FakeProvider {
            geocode: Ok(vec![]),
            ..FakeProvider::land()
        };
        assert!(is_on_water(&provider, DEST));
    }

    #[test]
    fn natural_feature_without_route_is_water() {
        let provider = FakeProvider {
            geocode: Ok(vec![geocode(
                &["natural_feature", "establishment"],
                &[&["natural_feature"], &["country", "political"]],
            )]),
            ..FakeProvider::land()
        };
        assert!(is_on_water(&provider, DEST));
    }

    #[test]
    fn natural_feature_on_a_street_is_land() {
        let provider = FakeProvider {
            geocode: Ok(vec![geocode(&["natural_feature"], &[&["route"]])]),
            ..FakeProvider::land()
        };
        assert!(!is_on_water(&provider, DEST));
    }

    #[test]
    fn city_level_match_is_water() {
        let provider = FakeProvider {
            geocode: Ok(vec![geocode(
                &["locality", "political"],
                &[&["locality", "political"], &["country", "political"]],
            )]),
            ..FakeProvider::land()
        };
        assert!(is_on_water(&provider, DEST));
    }

    #[test]
    fn street_number_alone_is_land() {
        let provider = FakeProvider {
            geocode: Ok(vec![geocode(&["premise"], &[&["street_number"]])]),
            ..FakeProvider::land()
        };
        assert!(!is_on_water(&provider, DEST));
    }

    #[test]
    fn geocode_failure_fails_open_as_land() {
        let provider = FakeProvider {
            geocode: Err("connection reset".to_string()),
            ..FakeProvider::land()
        };
        assert!(!is_on_water(&provider, DEST));
        assert_eq!(provider.calls().geocode, 1);
    }

    #[test]
    fn ferry_travel_mode_is_detected() {
        let provider = FakeProvider {
            routes: Ok(vec![route(&[("DRIVING", "Head south"), ("FERRY", "Board")])]),
            ..FakeProvider::land()
        };
        assert!(has_ferry_in_route(&provider, ORIGIN, DEST));
    }

    #[test]
    fn ferry_in_instructions_is_detected() {
        let provider = FakeProvider {
            routes: Ok(vec![route(&[("DRIVING", "Take the <b>Toronto Island FERRY</b>")])]),
            ..FakeProvider::land()
        };
        assert!(has_ferry_in_route(&provider, ORIGIN, DEST));
    }

    #[test]
    fn only_the_first_route_is_inspected() {
        let provider = FakeProvider {
            routes: Ok(vec![
                route(&[("DRIVING", "Head south")]),
                route(&[("DRIVING", "Take the ferry")]),
            ]),
            ..FakeProvider::land()
        };
        assert!(!has_ferry_in_route(&provider, ORIGIN, DEST));
    }

    #[test]
    fn no_route_means_no_ferry() {
        let provider = FakeProvider {
            routes: Ok(vec![]),
            ..FakeProvider::land()
        };
        assert!(!has_ferry_in_route(&provider, ORIGIN, DEST));
    }

    #[test]
    fn directions_failure_fails_open() {
        let provider = FakeProvider {
            routes: Err("timeout".to_string()),
            ..FakeProvider::land()
        };
        assert!(!has_ferry_in_route(&provider, ORIGIN, DEST));
    }

    #[test]
    fn all_modes_ok_is_available() {
        let provider = FakeProvider::land();
        assert!(all_modes_available(&provider, ORIGIN, DEST));
        assert_eq!(provider.calls().matrix, TravelMode::ALL.to_vec());
    }

    #[test]
    fn first_non_ok_mode_stops_the_checks() {
        for failing in 0..TravelMode::ALL.len() {
            let mut matrix = vec![Ok("OK"); 4];
            matrix[failing] = Ok("ZERO_RESULTS");
            let provider = FakeProvider {
                matrix,
                ..FakeProvider::land()
            };
            assert!(!all_modes_available(&provider, ORIGIN, DEST));
            assert_eq!(provider.calls().matrix.len(), failing + 1);
        }
    }

    #[test]
    fn matrix_failure_fails_closed() {
        for failing in 0..TravelMode::ALL.len() {
            let mut matrix = vec![Ok("OK"); 4];
            matrix[failing] = Err("quota exceeded".to_string());
            let provider = FakeProvider {
                matrix,
                ..FakeProvider::land()
            };
            assert!(!all_modes_available(&provider, ORIGIN, DEST));
            assert_eq!(provider.calls().matrix.len(), failing + 1);
        }
    }

    #[test]
    fn water_rejection_skips_directions_and_matrix() {
        let provider = FakeProvider {
            geocode: Ok(vec![]),
            ..FakeProvider::land()
        };
        let verdict = ReachabilityFilter::new(&provider).evaluate(ORIGIN, DEST);
        assert_eq!(verdict, Verdict::Rejected(RejectReason::OnWater));

        let calls = provider.calls();
        assert_eq!(calls.geocode, 1);
        assert_eq!(calls.directions, 0);
        assert!(calls.matrix.is_empty());
    }

    #[test]
    fn ferry_rejection_skips_matrix() {
        let provider = FakeProvider {
            routes: Ok(vec![route(&[("FERRY", "Board the ferry")])]),
            ..FakeProvider::land()
        };
        let verdict = ReachabilityFilter::new(&provider).evaluate(ORIGIN, DEST);
        assert_eq!(verdict, Verdict::Rejected(RejectReason::RequiresFerry));
        assert_eq!(provider.calls().directions, 1);
        assert!(provider.calls().matrix.is_empty());
    }

    #[test]
    fn passing_every_check_is_accepted() {
        let provider = FakeProvider::land();
        let verdict = ReachabilityFilter::new(&provider).evaluate(ORIGIN, DEST);
        assert_eq!(verdict, Verdict::Accepted);
    }

    #[test]
    fn failing_provider_is_rejected_only_by_modes() {
        let provider = FakeProvider {
            geocode: Err("down".to_string()),
            routes: Err("down".to_string()),
            matrix: vec![Err("down".to_string()); 4],
            calls: Mutex::new(Calls::default()),
        };
        let verdict = ReachabilityFilter::new(&provider).evaluate(ORIGIN, DEST);
        assert_eq!(verdict, Verdict::Rejected(RejectReason::ModesUnavailable));
    }

    #[test]
    fn verification_reports_water_locations_by_number() {
        // Alternates land and water per reverse-geocode call.
        struct Alternating(Mutex<usize>);
        impl MapsProvider for Alternating {
            fn reverse_geocode(&self, _p: Coordinate) -> Result<Vec<GeocodeResult>, MapsError> {
                let mut n = self.0.lock().unwrap();
                *n += 1;
                Ok(if *n % 2 == 0 { vec![] } else { vec![street_address()] })
            }
            fn directions(
                &self,
                _o: Coordinate,
                _d: Coordinate,
                _m: TravelMode,
            ) -> Result<Vec<RouteResult>, MapsError> {
                unreachable!()
            }
            fn distance_matrix_status(
                &self,
                _o: Coordinate,
                _d: Coordinate,
                _m: TravelMode,
            ) -> Result<String, MapsError> {
                unreachable!()
            }
        }

        let locations = [DEST, ORIGIN, DEST];
        let water = verify_on_land(&Alternating(Mutex::new(0)), &locations);
        assert_eq!(water, vec![(2, ORIGIN)]);
    }
}
