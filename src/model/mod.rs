pub mod config;
pub mod project;
pub mod tag;

pub use config::*;
pub use project::*;
pub use tag::*;
