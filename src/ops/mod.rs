pub mod id;
pub mod search;
pub mod tagging;
