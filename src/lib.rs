pub mod activity;
pub mod api;
pub mod capture;
pub mod core;
pub mod grid;
pub mod gui;
pub mod persistence;
pub mod session;
pub mod settings;
pub mod summary;
