//! # adscan - AppleDouble sidecar detector
//!
//! Identifies AppleDouble sidecar files, the `._*` metadata companions
//! macOS leaves next to regular files on filesystems without native
//! resource-fork support, by combining a filename convention check
//! with a magic-number check on the first four bytes of content.
//!
//! adscan is a filter: it reports matches for another tool to act on
//! and stays silent about everything else.
//!
//! ## Quick Start
//!
//! ```bash
//! # Check explicit paths
//! adscan ._DSC0001.JPG notes.txt
//!
//! # Batch cleanup with find and xargs
//! find /mnt/usb -name '._*' -print0 | adscan -0 -print0 | xargs -0 rm --
//! ```

pub mod classifier;
pub mod cli;
pub mod stream;

pub use cli::Cli;

/// Result type alias for adscan operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
