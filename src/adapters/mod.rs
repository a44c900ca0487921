// Adapters layer: concrete HTTP implementations of the domain ports.

pub mod backend_client;
pub mod restaurant_client;

pub use backend_client::HttpShuffleBackend;
pub use restaurant_client::HttpRestaurantSource;
