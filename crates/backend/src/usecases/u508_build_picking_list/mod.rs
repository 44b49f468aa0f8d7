pub mod error;
pub mod executor;
pub mod expansion;
pub mod export;
pub mod normalizer;

pub use error::PickingError;
pub use executor::{build_picking_list, PickingExecutor, PickingOutcome};
