use anyhow::Context;
use clap::Parser;
use eta_sampler::sdk::{
    config::MapsConfig,
    filter::{verify_on_land, ReachabilityFilter},
    maps::RemoteMapsProvider,
    render::{LeafletHtmlRenderer, MapRenderer, SvgChartRenderer, HTML_OUTPUT, SVG_OUTPUT},
    sampling::{generate_valid_locations, SamplingParams},
    types::UNION_STATION,
    util::log::init_logging,
};
use rand::{rngs::StdRng, SeedableRng};
use std::path::Path;

/// Samples random locations around Union Station that are on land, need no
/// ferry and are reachable by every transport mode, then plots them.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Number of valid locations to generate
    #[arg(default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..))]
    count: u32,

    /// Search radius around the origin, in kilometers
    #[arg(long, default_value_t = 10.0)]
    radius_km: f64,

    /// Seed for a reproducible candidate stream
    #[arg(long)]
    seed: Option<u64>,

    /// Skip re-checking the accepted locations for water afterwards
    #[arg(long)]
    skip_verify: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging("info");

    let cli = Cli::parse();
    if !(cli.radius_km.is_finite() && cli.radius_km > 0.0) {
        anyhow::bail!("--radius-km must be a positive number, got {}", cli.radius_km);
    }

    // --- 1. Dependency Initialization ---
    let config = MapsConfig::from_env().context("Cannot start without Maps credentials")?;
    let provider =
        RemoteMapsProvider::new(&config).context("Failed to build the Maps HTTP client")?;
    let filter = ReachabilityFilter::new(&provider);

    let mut rng = match cli.seed {
        Some(seed) => {
            log::info!("Using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };

    let params = SamplingParams {
        center: UNION_STATION,
        radius_m: cli.radius_km * 1000.0,
        target_count: cli.count as usize,
    };

    // --- 2. Sampling ---
    let outcome = generate_valid_locations(&params, &mut rng, &filter);
    if outcome.is_empty() {
        log::error!("✗ Failed to generate any valid locations!");
        std::process::exit(1);
    }
    if !outcome.is_complete() {
        log::warn!(
            "Only found {} of {} requested locations within {} attempts",
            outcome.locations.len(),
            params.target_count,
            params.max_attempts()
        );
    }

    // --- 3. Output ---
    SvgChartRenderer::default()
        .render(&outcome.locations, params.center, params.radius_m, Path::new(SVG_OUTPUT))
        .with_context(|| format!("Failed to write {}", SVG_OUTPUT))?;
    LeafletHtmlRenderer
        .render(&outcome.locations, params.center, params.radius_m, Path::new(HTML_OUTPUT))
        .with_context(|| format!("Failed to write {}", HTML_OUTPUT))?;

    if !cli.skip_verify {
        log::info!("VERIFICATION: Checking all points are not on water...");
        let water_points = verify_on_land(&provider, &outcome.locations);
        if water_points.is_empty() {
            log::info!(
                "✓ SUCCESS: All {} locations verified to be on land!",
                outcome.locations.len()
            );
        } else {
            log::warn!(
                "⚠️  Found {} locations on water! These should have been filtered out.",
                water_points.len()
            );
        }
    }

    log::info!(
        "Generated: {} locations in {} attempts",
        outcome.locations.len(),
        outcome.attempts
    );
    log::info!("HTML map: {}", HTML_OUTPUT);
    log::info!("SVG map: {}", SVG_OUTPUT);

    Ok(())
}
