//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the ascapi binary.

use clap::{Parser, Subcommand, ValueEnum};

/// App Store Connect API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "ascapi", about = "App Store Connect API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single resource by ID.
    Get {
        /// The type of resource to get.
        entity: Entity,

        /// The resource ID. For submissions, the App Store version ID.
        id: String,

        /// Related resources to sideload (comma separated).
        #[arg(long, value_delimiter = ',')]
        include: Vec<String>,
    },

    /// List resources with optional filtering and pagination.
    List {
        /// The type of resource to list.
        entity: Entity,

        /// Number of items per page.
        #[arg(long)]
        limit: Option<u32>,

        /// Cursor from a previous page.
        #[arg(long, conflicts_with = "all")]
        cursor: Option<String>,

        /// Only resources of these app IDs (comma separated).
        #[arg(long, value_delimiter = ',')]
        app: Vec<String>,

        /// Follow next links and print every page.
        #[arg(long)]
        all: bool,
    },

    /// Update a resource.
    Update {
        /// The type of resource to update.
        entity: Entity,

        /// The ID of the resource to update.
        id: String,

        /// New agreement text (agreements).
        #[arg(long)]
        agreement_text: Option<String>,

        /// New poster frame time code (previews).
        #[arg(long)]
        preview_frame_time_code: Option<String>,

        /// Checksum of the uploaded file (previews).
        #[arg(long)]
        source_file_checksum: Option<String>,

        /// Mark the upload as complete (previews).
        #[arg(long)]
        uploaded: Option<bool>,
    },

    /// Submit an App Store version for review.
    Submit {
        /// The App Store version ID.
        version: String,
    },

    /// Delete a resource.
    Delete {
        /// The type of resource to delete.
        entity: Entity,

        /// The ID of the resource to delete.
        id: String,
    },
}

/// Resource kinds that can be operated on.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A TestFlight beta license agreement.
    #[value(alias = "agreements", alias = "beta-license-agreement")]
    Agreement,
    /// An app preview video.
    #[value(alias = "previews", alias = "app-preview")]
    Preview,
    /// An App Store version submission.
    #[value(alias = "submissions")]
    Submission,
}
