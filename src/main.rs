use clap::Parser;
use ikeawatcher::utils::{logger, validation::Validate};
use ikeawatcher::{AvailabilityClient, CliConfig, Watcher};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting ikeawatcher");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(2);
    }

    let cart = config.shopping_cart();
    tracing::info!("Shopping cart = {:?}", cart);

    let client = AvailabilityClient::new(&config.country, &config.locale)
        .with_base_url(config.base_url.clone());
    let watcher = Watcher::new(
        client,
        cart,
        config.delivery_zip_codes.clone(),
        config.collect_locations.clone(),
        config.try_all,
    );

    match watcher.run().await {
        Ok(true) => {
            tracing::info!("Articles are available :)");
        }
        Ok(false) => {
            tracing::error!("Articles are not available :(");
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("Error checking items availability: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(2);
        }
    }

    Ok(())
}
