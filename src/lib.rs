pub mod sdk;

pub use sdk::config::MapsConfig;
pub use sdk::filter::{
    all_modes_available, has_ferry_in_route, is_on_water, verify_on_land, CandidateFilter,
    ReachabilityFilter, RejectReason, Verdict,
};
pub use sdk::maps::{MapsError, MapsProvider, RemoteMapsProvider, TravelMode};
pub use sdk::render::{LeafletHtmlRenderer, MapRenderer, SvgChartRenderer};
pub use sdk::sampler::sample_point_in_radius;
pub use sdk::sampling::{generate_valid_locations, SamplingOutcome, SamplingParams};
pub use sdk::types::{Coordinate, UNION_STATION};
