pub mod config;
pub mod logging;

pub mod display;
pub mod http;
pub mod link;
pub mod prefs;
pub mod resolver;
