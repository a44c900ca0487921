use crate::config::ServiceConfig;
use clap::Args;

/// Arguments shared by the two server binaries.
#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Address to listen on, overrides `server.bind`
    #[arg(long)]
    pub bind: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    pub fn apply_to(&self, config: &mut ServiceConfig) {
        if let Some(bind) = &self.bind {
            tracing::info!("🔧 bind address overridden to: {}", bind);
            config.server.bind = bind.clone();
        }
    }
}
