pub mod assistant;
pub mod config;
pub mod console;
pub mod controller;
pub mod dialog;
pub mod display;
pub mod session;
pub mod snippets;
pub mod types;

#[cfg(feature = "ui")]
pub mod ui;
#[cfg(feature = "ui")]
pub mod views;
