pub mod error;
pub mod provider;
pub mod service;
pub mod types;

pub use error::MapsError;
pub use provider::RemoteMapsProvider;
pub use service::MapsProvider;
pub use types::{GeocodeResult, RouteResult, TravelMode};
