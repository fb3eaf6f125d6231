pub mod app;
pub mod external;
pub mod input;
pub mod render;
pub mod text_field;
pub mod theme;

pub use app::run;
