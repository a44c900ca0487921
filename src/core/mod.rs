pub mod gate;
pub mod partition;
pub mod shuffle;

pub use crate::domain::model::{GroupingMode, GroupingRequest, GroupingResult, NormalizedRequest};
pub use crate::domain::ports::{RestaurantSource, ShuffleBackend};
pub use gate::{validate, ValidationError};
pub use partition::{partition, RandomSource};
pub use shuffle::ShuffleService;
