mod annotate;
mod clock;
mod config;
mod render;
mod sources;

use chrono::Utc;
use config::Settings;
use log::*;
use sources::timezones;
use thiserror::Error;


// custom error type used throughout the project
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Error fetching timezone dataset: {0}")]
    Api(#[from] sources::common::ApiError),

    #[error("Failed to render map: {0}")]
    Render(#[from] render::RenderError),

    #[error("Failed to export map: {0}")]
    Export(#[from] render::export::ExportError),

    #[error("Dataset contained no usable timezone features")]
    EmptyDataset,
}


#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Error> {
    let settings = Settings::from_env()?;
    debug!("{:?}", settings);

    // captured once so every label on the map agrees with the info panel
    let utc_now = Utc::now();

    let zone_name = settings.local_zone.clone().unwrap_or_else(clock::system_zone::detect_zone_name);
    let observation = clock::resolve(utc_now, &zone_name, settings.offset_method);
    info!("Local timezone {} ({}), centering map on longitude {}",
          observation.timezone_name, observation.offset_label(), observation.center_longitude);

    let http_client = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .connection_verbose(settings.verbose_http)
        .build()
        .map_err(sources::common::ApiError::from)?;

    let raw_features = timezones::fetch_features(&http_client, &settings.dataset_url).await?;
    info!("Fetched {} features from {}", raw_features.len(), settings.dataset_url);

    let features = timezones::collect_features(raw_features, settings.missing_zone);
    if features.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let annotated = annotate::annotate(features, utc_now, observation.utc_offset_hours);
    let user_zones = annotated.iter().filter(|f| f.clock.is_user_zone).count();
    info!("Annotated {} timezone features, {} matching the local offset", annotated.len(), user_zones);

    let document = render::render_document(&observation, &annotated)?;
    render::export::write_document(&settings.output_path, &document)?;

    if settings.open_viewer {
        // the file is already written, so a missing viewer is not fatal
        if let Err(e) = render::export::open_in_viewer(&settings.output_path) {
            warn!("{}", e);
        }
    }

    Ok(())
}
