use super::filter::{CandidateFilter, Verdict};
use super::maps::TravelMode;
use super::sampler::sample_point_in_radius;
use super::types::Coordinate;
use rand::Rng;

/// Upper bound on attempts per requested location.
pub const ATTEMPTS_PER_LOCATION: usize = 50;

#[derive(Debug, Clone, Copy)]
pub struct SamplingParams {
    pub center: Coordinate,
    pub radius_m: f64,
    pub target_count: usize,
}

impl SamplingParams {
    pub fn max_attempts(&self) -> usize {
        self.target_count * ATTEMPTS_PER_LOCATION
    }
}

/// Result of one run. Fewer locations than requested, even none, is a valid outcome.
#[derive(Debug, Clone)]
pub struct SamplingOutcome {
    pub locations: Vec<Coordinate>,
    pub attempts: usize,
    pub target_count: usize,
}

impl SamplingOutcome {
    pub fn is_complete(&self) -> bool {
        self.locations.len() == self.target_count
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

/// Rejection-samples candidates around `params.center` until `target_count`
/// pass `filter` or the attempt budget runs out.
pub fn generate_valid_locations<R, F>(
    params: &SamplingParams,
    rng: &mut R,
    filter: &F,
) -> SamplingOutcome
where
    R: Rng + ?Sized,
    F: CandidateFilter + ?Sized,
{
    let max_attempts = params.max_attempts();
    let mut locations = Vec::with_capacity(params.target_count);
    let mut attempts = 0;

    log::info!("Generating {} valid random locations...", params.target_count);
    log::info!(
        "Criteria: within {:.1}km of {} / not on water / no ferry routes / all {} transport modes available",
        params.radius_m / 1000.0,
        params.center,
        TravelMode::ALL.len()
    );

    while locations.len() < params.target_count && attempts < max_attempts {
        attempts += 1;

        let candidate = sample_point_in_radius(rng, params.center, params.radius_m);

        match filter.evaluate(params.center, candidate) {
            Verdict::Rejected(reason) => {
                log::info!("  Attempt {}: ✗ {} - skipping", attempts, reason);
            }
            Verdict::Accepted => {
                locations.push(candidate);
                log::info!(
                    "  Attempt {}: ✓ Valid location #{} - ({:.4}, {:.4})",
                    attempts,
                    locations.len(),
                    candidate.lat,
                    candidate.lng
                );
            }
        }
    }

    log::info!(
        "Generated {} valid locations in {} attempts",
        locations.len(),
        attempts
    );

    SamplingOutcome {
        locations,
        attempts,
        target_count: params.target_count,
    }
}
