#[cfg(feature = "cli")]
pub mod cli;
pub mod service_config;

#[cfg(feature = "cli")]
pub use cli::ServeArgs;
pub use service_config::{
    BackendConfig, LogFormat, LoggingConfig, RestaurantConfig, ServerConfig, ServiceConfig,
    ShuffleConfig,
};
