pub mod app;
pub mod dialog;
pub mod status;
pub mod theme;
pub mod wheel;
