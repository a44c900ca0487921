pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::ServeArgs;
pub use config::ServiceConfig;

pub use adapters::{HttpRestaurantSource, HttpShuffleBackend};
pub use app::{ForwardOutcome, ForwardingProxy, ShuffleApiClient};
pub use crate::core::{RandomSource, ShuffleService, ValidationError};
pub use domain::model::{ErrorEnvelope, GroupingMode, GroupingRequest, GroupingResult};
pub use utils::error::{Result, ShuffleError};
