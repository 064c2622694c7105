pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod playback;
pub mod playlist;
pub mod preferences;
pub mod state;
pub mod system;
pub mod ticker;
pub mod traits;
pub mod util;
