//! HTTP API handlers for matchpick-server

pub mod buildinfo;
pub mod demo;
pub mod error;
pub mod health;
pub mod matches;
pub mod ui;

pub use buildinfo::get_build_info;
pub use demo::upload_demo;
pub use error::ApiError;
pub use health::health_routes;
pub use matches::{daily_picks, top_matches};
pub use ui::{serve_app_js, serve_index};
