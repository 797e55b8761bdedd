//! Build identification, shown in the page footer

use axum::response::Json;
use serde::Serialize;

/// Response of `GET /build_info`
#[derive(Debug, Serialize)]
pub struct BuildInfo {
    pub module: &'static str,
    pub version: &'static str,
    pub git_hash: &'static str,
    pub build_timestamp: &'static str,
    pub build_profile: &'static str,
}

impl BuildInfo {
    /// Values stamped into this binary by build.rs
    pub const fn current() -> Self {
        Self {
            module: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            git_hash: env!("GIT_HASH"),
            build_timestamp: env!("BUILD_TIMESTAMP"),
            build_profile: env!("BUILD_PROFILE"),
        }
    }

    /// One-line label, e.g. `matchpick-server v0.1.0 (3f2a9c1e, release)`
    pub fn label(&self) -> String {
        format!(
            "{} v{} ({}, {})",
            self.module, self.version, self.git_hash, self.build_profile
        )
    }
}

/// GET /build_info
pub async fn get_build_info() -> Json<BuildInfo> {
    Json(BuildInfo::current())
}
