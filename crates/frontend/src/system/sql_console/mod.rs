pub mod api;
pub mod controller;
pub mod error;
pub mod state;
pub mod ui;
