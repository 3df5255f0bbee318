//! Mediaprep-Common: Shared types and path utilities.
//!
//! - **Variant Types**: format, resolution, and parameter descriptors that
//!   describe one output rendition of a source file
//! - **Path Utilities**: case-insensitive extension allow-list matching
//!
//! # Examples
//!
//! ```
//! use mediaprep_common::paths::has_allowed_extension;
//! use mediaprep_common::Resolution;
//! use std::path::Path;
//!
//! let allow = vec!["jpg".to_string(), "png".to_string()];
//! assert!(has_allowed_extension(Path::new("hero.JPG"), &allow));
//!
//! let hd = Resolution::new(1280, 720);
//! assert_eq!(hd.to_string(), "1280x720");
//! ```

pub mod paths;
pub mod types;

pub use types::*;
