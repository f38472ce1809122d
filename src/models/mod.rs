//! App Store Connect resource kinds.

mod app;
mod app_preview;
mod app_preview_set;
mod app_store_version;
mod app_store_version_submission;
mod beta_license_agreement;

pub use app::*;
pub use app_preview::*;
pub use app_preview_set::*;
pub use app_store_version::*;
pub use app_store_version_submission::*;
pub use beta_license_agreement::*;
