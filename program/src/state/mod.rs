pub mod contract;
pub mod events;
pub mod header;
pub mod schedule;

pub use contract::*;
pub use events::*;
pub use header::*;
pub use schedule::*;
