pub mod cycles;
pub mod events;
pub mod poll;
pub mod proposal;
pub mod registry;

pub use cycles::*;
pub use events::*;
pub use poll::*;
pub use proposal::*;
pub use registry::*;
