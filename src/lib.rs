//! Extraa: a budget and expense tracker running in the browser.
//!
//! The crate splits into a typed client for the backend ([`api`]), the
//! dashboard state machine ([`dashboard`]) and the Yew UI ([`app`],
//! [`pages`], [`components`]). Everything below the UI builds and tests
//! natively; browser APIs sit behind small traits.

pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod format;
pub mod forms;
pub mod logging;
pub mod models;
pub mod pages;
pub mod session;
pub mod transport;

#[cfg(test)]
mod testing;

use app::{App, AppProps};
use config::AppConfig;

/// Installs logging and mounts the app on `<body>`.
pub fn run() {
    let config = AppConfig::from_env();
    logging::init(&config);
    tracing::info!(api = %config.api_base_url, "starting");
    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
