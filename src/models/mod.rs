pub mod event;
pub mod location;
pub mod summary;

pub use event::{EventRecord, EventType, Payload};
pub use location::{ExactLocation, Location, LocationHints};
pub use summary::Summary;
