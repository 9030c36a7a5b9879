pub mod app;
pub mod auth;
pub mod config;
pub mod i18n;
pub mod nav;
pub mod state;
pub mod task;
pub mod ui;
