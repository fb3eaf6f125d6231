pub mod archive;
pub mod atomic;
pub mod config_io;
pub mod preset_io;
pub mod project_io;
