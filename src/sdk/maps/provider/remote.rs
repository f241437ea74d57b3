use crate::sdk::config::MapsConfig;
use crate::sdk::maps::error::{MapsError, StatusEnvelope};
use crate::sdk::maps::service::MapsProvider;
use crate::sdk::maps::types::{
    DirectionsResponse, DistanceMatrixResponse, GeocodeResponse, GeocodeResult, RouteResult,
    TravelMode,
};
use crate::sdk::types::Coordinate;
use crate::sdk::util::rate_limit::{maps_limiter, wait_for_permit, Limiter};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

const GEOCODE_PATH: &str = "/maps/api/geocode/json";
const DIRECTIONS_PATH: &str = "/maps/api/directions/json";
const DISTANCE_MATRIX_PATH: &str = "/maps/api/distancematrix/json";

pub struct RemoteMapsProvider {
    client: Client,
    api_key: String,
    base_url: String,
    limiter: Limiter,
}

impl RemoteMapsProvider {
    pub fn new(config: &MapsConfig) -> Result<Self, MapsError> {
        Ok(Self {
            client: Client::builder().timeout(Duration::from_secs(15)).build()?,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            limiter: maps_limiter(config.requests_per_second),
        })
    }

    fn get_text(&self, path: &str, params: &[(&str, String)]) -> Result<String, MapsError> {
        wait_for_permit(&self.limiter);
        let url = format!("{}{}", self.base_url, path);
        log::debug!("[PROVIDER] GET {} {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .map_err(|e| e.without_url())?;

        // The request URL carries the API key, so it is stripped from every error.
        let status = response.status();
        let text = response.text().map_err(|e| e.without_url())?;
        if !status.is_success() {
            return Err(MapsError::Http {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(text)
    }
}

fn departure_now() -> String {
    chrono::Utc::now().timestamp().to_string()
}

// Checks the status envelope before decoding the typed body, so API errors surface as such.
fn parse_checked<T: DeserializeOwned>(text: &str) -> Result<T, MapsError> {
    let envelope: StatusEnvelope = serde_json::from_str(text).map_err(|e| {
        log::error!("Failed to parse response envelope. Error: {}. Body: {}", e, text);
        e
    })?;
    if let Some(err) = MapsError::from_envelope(envelope) {
        return Err(err);
    }
    Ok(serde_json::from_str(text)?)
}

pub fn parse_geocode_response(text: &str) -> Result<Vec<GeocodeResult>, MapsError> {
    let body: GeocodeResponse = parse_checked(text)?;
    Ok(body.results)
}

pub fn parse_directions_response(text: &str) -> Result<Vec<RouteResult>, MapsError> {
    let body: DirectionsResponse = parse_checked(text)?;
    Ok(body.routes)
}

/// Extracts the status of the single origin/destination element.
pub fn parse_matrix_status(text: &str) -> Result<String, MapsError> {
    let body: DistanceMatrixResponse = parse_checked(text)?;
    body.rows
        .into_iter()
        .next()
        .and_then(|row| row.elements.into_iter().next())
        .map(|element| element.status)
        .ok_or_else(|| MapsError::Generic("Distance matrix returned no elements".to_string()))
}

impl MapsProvider for RemoteMapsProvider {
    fn reverse_geocode(&self, point: Coordinate) -> Result<Vec<GeocodeResult>, MapsError> {
        let text = self.get_text(GEOCODE_PATH, &[("latlng", point.to_string())])?;
        parse_geocode_response(&text)
    }

    fn directions(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
    ) -> Result<Vec<RouteResult>, MapsError> {
        let text = self.get_text(
            DIRECTIONS_PATH,
            &[
                ("origin", origin.to_string()),
                ("destination", destination.to_string()),
                ("mode", mode.to_string()),
                ("departure_time", departure_now()),
            ],
        )?;
        parse_directions_response(&text)
    }

    fn distance_matrix_status(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
    ) -> Result<String, MapsError> {
        let text = self.get_text(
            DISTANCE_MATRIX_PATH,
            &[
                ("origins", origin.to_string()),
                ("destinations", destination.to_string()),
                ("mode", mode.to_string()),
                ("departure_time", departure_now()),
            ],
        )?;
        parse_matrix_status(&text)
    }
}
