use clap::Parser;
use shuffle_lunch::app::{compute_api, http};
use shuffle_lunch::utils::{logger, validation::Validate};
use shuffle_lunch::{ServeArgs, ServiceConfig, ShuffleService};

#[derive(Parser, Debug)]
#[command(name = "shuffle-api")]
#[command(about = "Compute service: validates grouping requests and shuffles participants")]
struct Args {
    #[command(flatten)]
    serve: ServeArgs,

    /// Seed every request's generator with this value (reproducible output)
    #[arg(long)]
    seed: Option<u64>,
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
    tracing::info!("Starting shuffle-api");

    args.serve.apply_to(&mut config);
    if let Some(seed) = args.seed {
        config.shuffle.seed = Some(seed);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let random = config.random_source();
    if config.shuffle.seed.is_some() {
        tracing::warn!("running with a fixed seed; every request shuffles identically");
    }

    let app = compute_api::build_router(ShuffleService::new(random));
    http::serve(config.bind_addr()?, app, "shuffle-api").await?;

    Ok(())
}
