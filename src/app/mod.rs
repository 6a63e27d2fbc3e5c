pub mod activity;
pub mod adb;
pub mod config;
pub mod error;
pub mod inspector;
pub mod logging;
pub mod models;
pub mod process;
