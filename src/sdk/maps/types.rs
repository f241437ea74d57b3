use serde::Deserialize;
use std::fmt;

// --- Data Structures for parsing Maps web service responses ---

#[derive(Deserialize, Debug)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

/// Nearest known place for a coordinate.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct GeocodeResult {
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
    #[serde(default)]
    pub formatted_address: String,
}

impl GeocodeResult {
    pub fn has_type(&self, tag: &str) -> bool {
        self.types.iter().any(|t| t == tag)
    }

    /// True if any address component carries one of `tags`.
    pub fn has_component_type(&self, tags: &[&str]) -> bool {
        self.address_components
            .iter()
            .any(|c| c.types.iter().any(|t| tags.contains(&t.as_str())))
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct AddressComponent {
    #[serde(default)]
    pub long_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Deserialize, Debug)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub routes: Vec<RouteResult>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct RouteResult {
    #[serde(default)]
    pub legs: Vec<Leg>,
}

impl RouteResult {
    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.legs.iter().flat_map(|leg| leg.steps.iter())
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Leg {
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Step {
    #[serde(default)]
    pub travel_mode: String,
    #[serde(default, rename = "html_instructions")]
    pub instructions: String,
}

#[derive(Deserialize, Debug)]
pub struct DistanceMatrixResponse {
    #[serde(default)]
    pub rows: Vec<MatrixRow>,
}

#[derive(Deserialize, Debug)]
pub struct MatrixRow {
    #[serde(default)]
    pub elements: Vec<MatrixElement>,
}

#[derive(Deserialize, Debug)]
pub struct MatrixElement {
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelMode {
    Driving,
    Transit,
    Bicycling,
    Walking,
}

impl TravelMode {
    /// The order in which modes are checked.
    pub const ALL: [TravelMode; 4] = [
        TravelMode::Driving,
        TravelMode::Transit,
        TravelMode::Bicycling,
        TravelMode::Walking,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Transit => "transit",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Walking => "walking",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
