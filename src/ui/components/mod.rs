pub mod app;
pub mod controls;
pub mod playlist;
pub mod progress;
