use clap::Parser;
use tracing_subscriber::EnvFilter;

use flyerscout_catalog::CatalogClient;
use flyerscout_pipeline::{
    build_digest, discover, ClassifierMatcher, MatchStrategy, Notifier, SubstringMatcher,
    ZeroShotClient,
};

#[derive(Debug, Parser)]
#[command(name = "flyerscout")]
#[command(about = "Find flyer deals matching a search term")]
struct Cli {
    /// Search term, e.g. "bread".
    term: String,

    /// Restrict discovery to these merchants' flyers (repeatable). With no
    /// stores, the term is searched across the whole region.
    #[arg(long = "store")]
    stores: Vec<String>,

    /// Match candidates with the zero-shot classifier instead of literal
    /// substring matching. Requires FLYERSCOUT_CLASSIFIER_URL.
    #[arg(long)]
    classify: bool,

    /// Override the classifier confidence threshold for this run.
    #[arg(long)]
    threshold: Option<f32>,

    /// Print the digest without dispatching a notification.
    #[arg(long)]
    no_notify: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = flyerscout_core::load_app_config_from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let cli = Cli::parse();

    let client = CatalogClient::with_base_urls(
        &config.postal_code,
        &config.sid,
        config.request_timeout_secs,
        &config.user_agent,
        &config.search_base_url,
        &config.data_base_url,
    )?;

    let matcher: Box<dyn MatchStrategy> = if cli.classify {
        let url = config.classifier_url.as_deref().ok_or_else(|| {
            anyhow::anyhow!("--classify requires FLYERSCOUT_CLASSIFIER_URL to be set")
        })?;
        let threshold = cli.threshold.unwrap_or(config.classifier_threshold);
        Box::new(ClassifierMatcher::with_threshold(
            ZeroShotClient::new(url),
            threshold,
        ))
    } else {
        Box::new(SubstringMatcher)
    };

    let matched = discover(&client, matcher.as_ref(), &cli.term, &cli.stores).await?;

    match build_digest(&cli.term, &matched) {
        Some(digest) => {
            println!("{digest}");
            if cli.no_notify {
                return Ok(());
            }
            match &config.notify_url {
                Some(notify_url) => Notifier::new(notify_url).send(&digest).await?,
                None => {
                    tracing::info!("FLYERSCOUT_NOTIFY_URL not set, skipping dispatch");
                }
            }
        }
        None => {
            tracing::info!(term = %cli.term, "nothing worth reporting, no notification sent");
        }
    }

    Ok(())
}
