pub mod registry;
pub use registry::*;

pub mod create_poll;
pub use create_poll::*;

pub mod edit_poll;
pub use edit_poll::*;

pub mod overwrite_poll;
pub use overwrite_poll::*;

pub mod propose;
pub use propose::*;

pub mod vote;
pub use vote::*;

pub mod end_cycle;
pub use end_cycle::*;

pub mod queries;
pub use queries::*;
