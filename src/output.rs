//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{App, AppPreview, AppStoreVersionSubmission, BetaLicenseAgreement, Resource};

/// Trait for human-readable key-value output.
///
/// Implemented by typed resources to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

fn header(label: &str, id: &str) -> Vec<String> {
    let title = format!("{label}: {id}");
    let divider = "─".repeat(title.chars().count().max(30));
    vec![title, divider]
}

impl PrettyPrint for Resource<BetaLicenseAgreement> {
    fn pretty_print(&self) -> String {
        let mut lines = header("Beta License Agreement", &self.id);

        if let Some(app_id) = self.app_id() {
            lines.push(format!("App:            {}", app_id));
        }

        match self.agreement_text() {
            Some(text) if !text.is_empty() => {
                lines.push("Agreement:".to_string());
                lines.extend(text.lines().map(|l| format!("  {l}")));
            }
            _ => lines.push("Agreement:      (empty)".to_string()),
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Resource<AppPreview> {
    fn pretty_print(&self) -> String {
        let mut lines = header("App Preview", &self.id);

        if let Some(name) = self.file_name() {
            lines.push(format!("File:           {}", name));
        }

        if let Some(size) = self.file_size() {
            lines.push(format!("Size:           {} bytes", size));
        }

        if let Some(state) = self.delivery_state() {
            lines.push(format!("State:          {}", state));
        }

        if let Some(set_id) = self.app_preview_set_id() {
            lines.push(format!("Preview Set:    {}", set_id));
        }

        let pending = self.upload_operations().len();
        if pending > 0 {
            lines.push(format!("Uploads:        {} parts pending", pending));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Resource<AppStoreVersionSubmission> {
    fn pretty_print(&self) -> String {
        let mut lines = header("Submission", &self.id);

        if let Some(version_id) = self.app_store_version_id() {
            lines.push(format!("Version:        {}", version_id));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Resource<App> {
    fn pretty_print(&self) -> String {
        let mut lines = header("App", &self.id);

        if let Some(name) = self.name() {
            lines.push(format!("Name:           {}", name));
        }

        if let Some(bundle_id) = self.bundle_id() {
            lines.push(format!("Bundle ID:      {}", bundle_id));
        }

        if let Some(sku) = self.sku() {
            lines.push(format!("SKU:            {}", sku));
        }

        lines.join("\n")
    }
}
