pub mod config;
pub mod error;
pub mod fetch;
pub mod github;
pub mod http;
pub mod logging;
pub mod monitor;
pub mod release;
pub mod runtime;
pub mod signals;
pub mod ticker;
pub mod ui;
