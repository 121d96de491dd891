//! Gatehouse TUI Library
//!
//! Terminal front end for the Gatehouse email verification flow: the app
//! loop, event plumbing, configuration, and screen rendering around the
//! `gatehouse-core` flow engine.

pub mod app;
pub mod ui;

pub use app::App;
