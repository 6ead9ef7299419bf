pub mod config;
pub mod event;
pub mod http;
pub mod search;
pub mod ui;
pub mod util;
