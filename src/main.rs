use anyhow::Context;
use clap::Parser;
use orcid_profile_query::utils::{logger, validation::Validate};
use orcid_profile_query::{CliConfig, ProfileQueryService, ProfileRecord, SearchListener};

struct ConsoleListener;

impl SearchListener<ProfileRecord> for ConsoleListener {
    fn found(&mut self, records: &[ProfileRecord]) {
        match serde_json::to_string_pretty(records) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::error!("Could not render profiles: {}", e),
        }
    }

    fn not_found(&mut self) {
        println!("No matching profiles found");
    }
}

async fn run(config: &CliConfig) -> anyhow::Result<Vec<ProfileRecord>> {
    let service_config = config
        .service_config()
        .context("failed to build service configuration")?;
    let service = ProfileQueryService::new(service_config)
        .await
        .context("failed to set up registry access")?;

    let query = config.query_parameters();
    tracing::debug!("Query parameters: {:?}", query);

    let records = service
        .call(&query, &mut ConsoleListener)
        .await
        .context("registry search failed")?;
    Ok(records)
}

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    let format = if config.log_json {
        logger::LogFormat::Json
    } else {
        logger::LogFormat::Compact
    };
    logger::init_logger(config.verbose, format);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }

    match run(&config).await {
        Ok(records) => {
            tracing::info!("Search finished with {} profiles", records.len());
        }
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("{:#}", e);
            std::process::exit(1);
        }
    }
}
