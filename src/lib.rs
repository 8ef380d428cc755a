// Library surface for the binary, headless tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod render;
pub mod runtime;
pub mod session;
pub mod ui;
pub mod verses;
