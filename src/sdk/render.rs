use super::sampler::METERS_PER_DEGREE;
use super::types::Coordinate;
use plotters::prelude::*;
use serde::Serialize;
use std::f64::consts::PI;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

pub const SVG_OUTPUT: &str = "sample_locations_map.svg";
pub const HTML_OUTPUT: &str = "sample_locations_map.html";

// Only the first locations get a number label on the static chart.
const LABELLED_LOCATIONS: usize = 30;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Plotting failed: {0}")]
    Plot(String),

    #[error("Failed to write map: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to encode map data: {0}")]
    Encode(#[from] serde_json::Error),
}

fn plot_err<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Plot(err.to_string())
}

/// Writes accepted locations, numbered in acceptance order, to `path`.
pub trait MapRenderer {
    fn render(
        &self,
        locations: &[Coordinate],
        center: Coordinate,
        radius_m: f64,
        path: &Path,
    ) -> Result<(), RenderError>;
}

/// Points on the edge of the search disk, using the same degree conversion as the sampler.
fn radius_ring(center: Coordinate, radius_m: f64) -> Vec<(f64, f64)> {
    let radius_deg = radius_m / METERS_PER_DEGREE;
    let lng_scale = center.lat.to_radians().cos();
    (0..=360)
        .map(|deg| {
            let t = deg as f64 * PI / 180.0;
            (
                center.lng + radius_deg * t.sin() / lng_scale,
                center.lat + radius_deg * t.cos(),
            )
        })
        .collect()
}

/// (min_lng, max_lng, min_lat, max_lat) covering the whole disk and every location, padded by 15%.
fn chart_bounds(
    locations: &[Coordinate],
    center: Coordinate,
    radius_m: f64,
) -> (f64, f64, f64, f64) {
    let ring = radius_ring(center, radius_m);
    let points = ring
        .iter()
        .copied()
        .chain(locations.iter().map(|c| (c.lng, c.lat)))
        .chain(std::iter::once((center.lng, center.lat)));

    let (mut min_x, mut max_x, mut min_y, mut max_y) =
        (f64::MAX, f64::MIN, f64::MAX, f64::MIN);
    for (x, y) in points {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    let padding = (max_x - min_x).max(max_y - min_y).max(1e-6) * 0.15;
    (min_x - padding, max_x + padding, min_y - padding, max_y + padding)
}

/// Static chart of the search area rendered with plotters.
pub struct SvgChartRenderer {
    pub size: (u32, u32),
}

impl Default for SvgChartRenderer {
    fn default() -> Self {
        Self { size: (1600, 1280) }
    }
}

impl MapRenderer for SvgChartRenderer {
    fn render(
        &self,
        locations: &[Coordinate],
        center: Coordinate,
        radius_m: f64,
        path: &Path,
    ) -> Result<(), RenderError> {
        log::info!("Creating map with {} locations...", locations.len());

        let (min_x, max_x, min_y, max_y) = chart_bounds(locations, center, radius_m);

        let root = SVGBackend::new(path, self.size).into_drawing_area();
        root.fill(&WHITE).map_err(plot_err)?;

        let title = format!(
            "Random Location Test - {} Valid Locations (Toronto ETA Guesser)",
            locations.len()
        );
        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 32))
            .margin(24)
            .x_label_area_size(60)
            .y_label_area_size(80)
            .build_cartesian_2d(min_x..max_x, min_y..max_y)
            .map_err(plot_err)?;

        chart
            .configure_mesh()
            .x_desc("Longitude")
            .y_desc("Latitude")
            .light_line_style(&BLACK.mix(0.05))
            .draw()
            .map_err(plot_err)?;

        chart
            .draw_series(std::iter::once(PathElement::new(
                radius_ring(center, radius_m),
                BLUE.mix(0.6).stroke_width(3),
            )))
            .map_err(plot_err)?
            .label(format!("{:.0}km radius", radius_m / 1000.0))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(3)));

        chart
            .draw_series(locations.iter().enumerate().map(|(i, loc)| {
                let marker = EmptyElement::at((loc.lng, loc.lat))
                    + Circle::new((0, 0), 8, GREEN.mix(0.7).filled());
                let label = if i < LABELLED_LOCATIONS {
                    (i + 1).to_string()
                } else {
                    String::new()
                };
                marker + Text::new(label, (-4, -5), ("sans-serif", 11).into_font().color(&BLACK))
            }))
            .map_err(plot_err)?
            .label("Valid location")
            .legend(|(x, y)| Circle::new((x + 10, y), 6, GREEN.mix(0.7).filled()));

        chart
            .draw_series(std::iter::once(TriangleMarker::new(
                (center.lng, center.lat),
                16,
                RED.filled(),
            )))
            .map_err(plot_err)?
            .label("Union Station")
            .legend(|(x, y)| TriangleMarker::new((x + 10, y), 8, RED.filled()));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(plot_err)?;

        let summary = [
            format!("✓ Generated {} valid locations", locations.len()),
            "✓ All on land (not water)".to_string(),
            "✓ No ferry routes".to_string(),
            "✓ All 4 transport modes available".to_string(),
            format!("Rendered {}", chrono::Local::now().format("%Y-%m-%d %H:%M")),
        ];
        for (i, line) in summary.iter().enumerate() {
            root.draw(&Text::new(
                line.as_str(),
                (110, 90 + 20 * i as i32),
                ("sans-serif", 16).into_font(),
            ))
            .map_err(plot_err)?;
        }

        root.present().map_err(plot_err)?;
        log::info!("✓ Map saved to {}", path.display());
        Ok(())
    }
}

#[derive(Serialize)]
struct MarkerData {
    number: usize,
    lat: f64,
    lng: f64,
    distance_km: f64,
}

const LEAFLET_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8" />
<title>__TITLE__</title>
<meta name="viewport" content="width=device-width, initial-scale=1.0" />
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>html, body, #map { height: 100%; margin: 0; }</style>
</head>
<body>
<div id="map"></div>
<script>
const center = __CENTER__;
const radiusMeters = __RADIUS__;
const locations = __LOCATIONS__;

const map = L.map('map').setView([center.lat, center.lng], 11);
L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
  maxZoom: 19,
  attribution: '&copy; OpenStreetMap contributors'
}).addTo(map);

L.marker([center.lat, center.lng])
  .bindPopup('Union Station (Origin)')
  .bindTooltip('Union Station')
  .addTo(map);

L.circle([center.lat, center.lng], {
  radius: radiusMeters, color: 'blue', fillColor: 'blue', fillOpacity: 0.1
}).bindPopup((radiusMeters / 1000) + 'km radius').addTo(map);

for (const loc of locations) {
  L.circleMarker([loc.lat, loc.lng], {
    radius: 5, color: 'green', fillColor: 'green', fillOpacity: 0.7
  })
    .bindPopup('Location #' + loc.number + '<br>(' + loc.lat.toFixed(4) + ', ' + loc.lng.toFixed(4) + ')<br>' + loc.distance_km.toFixed(2) + ' km from origin')
    .bindTooltip('#' + loc.number)
    .addTo(map);
}
</script>
</body>
</html>
"#;

/// Interactive Leaflet page over OpenStreetMap tiles.
#[derive(Default)]
pub struct LeafletHtmlRenderer;

impl LeafletHtmlRenderer {
    pub fn document(
        &self,
        locations: &[Coordinate],
        center: Coordinate,
        radius_m: f64,
    ) -> Result<String, RenderError> {
        let markers: Vec<MarkerData> = locations
            .iter()
            .enumerate()
            .map(|(i, loc)| MarkerData {
                number: i + 1,
                lat: loc.lat,
                lng: loc.lng,
                distance_km: center.haversine_distance_m(loc) / 1000.0,
            })
            .collect();

        Ok(LEAFLET_TEMPLATE
            .replace(
                "__TITLE__",
                &format!("Random Location Test - {} Valid Locations", locations.len()),
            )
            .replace("__CENTER__", &serde_json::to_string(&center)?)
            .replace("__RADIUS__", &serde_json::to_string(&radius_m)?)
            .replace("__LOCATIONS__", &serde_json::to_string(&markers)?))
    }
}

impl MapRenderer for LeafletHtmlRenderer {
    fn render(
        &self,
        locations: &[Coordinate],
        center: Coordinate,
        radius_m: f64,
        path: &Path,
    ) -> Result<(), RenderError> {
        let html = self.document(locations, center, radius_m)?;
        fs::write(path, html)?;
        log::info!("✓ Map saved to {}", path.display());
        Ok(())
    }
}
