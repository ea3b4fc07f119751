pub mod api;
pub mod predict;
pub mod train;
