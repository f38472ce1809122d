//! HTTP request handlers for the mock server.

pub mod agreements;
pub mod documents;
pub mod previews;
pub mod submissions;

pub use agreements::*;
pub use previews::*;
pub use submissions::*;
