pub mod config;
pub mod data;
pub mod format;
pub mod normalize;
pub mod view_state;
