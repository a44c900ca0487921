use clap::Parser;
use shuffle_lunch::app::{edge_api, http};
use shuffle_lunch::domain::ports::RestaurantSource;
use shuffle_lunch::utils::{logger, validation::Validate};
use shuffle_lunch::{
    ForwardingProxy, HttpRestaurantSource, HttpShuffleBackend, ServeArgs, ServiceConfig,
};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "shuffle-edge")]
#[command(about = "Client-facing edge: relays shuffle requests to the compute service")]
struct Args {
    #[command(flatten)]
    serve: ServeArgs,

    /// Compute service base URL, overrides `backend.url` and SHUFFLE_API_URL
    #[arg(long)]
    backend_url: Option<String>,

    /// Forward every body without checking it at the edge first
    #[arg(long)]
    relay_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match ServiceConfig::load(args.serve.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            std::process::exit(e.exit_code());
        }
    };

    logger::init_service_logger(
        args.serve.verbose,
        config.logging.level.as_deref(),
        config.log_format(),
    );
    tracing::info!("🚀 Starting shuffle-edge");

    args.serve.apply_to(&mut config);
    if let Some(url) = &args.backend_url {
        config.backend.url = url.clone();
    }
    if args.relay_only {
        config.backend.validate_at_edge = Some(false);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let backend = HttpShuffleBackend::new(config.backend_url(), config.backend_timeout())?;
    tracing::info!(
        "📡 forwarding to {} (timeout {:?}, edge validation {})",
        backend.endpoint(),
        config.backend_timeout(),
        config.validate_at_edge()
    );
    let proxy = ForwardingProxy::new(Arc::new(backend))
        .with_edge_validation(config.validate_at_edge());

    let restaurants: Option<Arc<dyn RestaurantSource>> = match &config.restaurants {
        Some(r) => {
            tracing::info!("🍜 restaurant routes backed by {}", r.scraper_url);
            Some(Arc::new(HttpRestaurantSource::new(&r.scraper_url, r.timeout())?))
        }
        None => None,
    };

    let app = edge_api::build_router(proxy, restaurants);
    http::serve(config.bind_addr()?, app, "shuffle-edge").await?;

    Ok(())
}
