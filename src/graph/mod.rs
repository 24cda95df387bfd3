//! The diagram data model and the store that keeps it consistent.

pub mod events;
pub mod model;
pub mod snapshot;
pub mod store;

pub use events::*;
pub use model::*;
pub use snapshot::*;
pub use store::*;
