use bulletin::{compose, parse_locale, BulletinContext};
use chrono::Local;
use meteo_bulletin::{
    collect_snapshots, get_config_info, open_in_viewer, setup_logger, write_bulletin,
    OpenMeteoFetcher,
};
use slog::{error, info};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let (cli, source) = get_config_info()?;
    let logger = setup_logger(&cli);

    info!(logger, "Meteo bulletin starting...");
    info!(logger, "  Config: {}", source);
    info!(logger, "  Output: {}", cli.output().display());
    info!(logger, "  Locale: {}", cli.locale());

    let locale = parse_locale(&cli.locale())?;
    let locations = cli.locations();
    let fetcher = OpenMeteoFetcher::new(
        logger.clone(),
        cli.api_url(),
        cli.user_agent(),
        cli.timeout(),
    )?;

    let results = match collect_snapshots(&fetcher, &locations, &logger).await {
        Ok(results) => results,
        Err(err) => {
            error!(logger, "no bulletin produced: {:#}", err);
            return Err(err);
        }
    };

    info!(logger, "composing bulletin for {} locations", results.len());
    let context = BulletinContext::new(Local::now().fixed_offset(), locale);
    let text = compose(&results, &context)?;

    let output = cli.output();
    write_bulletin(&output, &text, &logger)?;
    println!("{}", text);

    if !cli.no_open {
        open_in_viewer(&output, &logger);
    }
    Ok(())
}
