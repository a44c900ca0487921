pub mod client;
pub mod compute_api;
pub mod edge_api;
pub mod http;
pub mod proxy;
pub mod restaurants;

pub use client::ShuffleApiClient;
pub use proxy::{ForwardOutcome, ForwardingProxy, RequestState};
