//! User directory backed by a remote profile table.
//!
//! [`UserDirectory::mount`] fetches every profile once through an injected
//! [`ProfileSource`], cleans the display names and publishes
//! `{records, loading}` for consumers to read or watch.
//! [`RestSource`] implements the data-source traits over HTTP.

pub mod config;
pub mod directory;
mod errors;
pub mod record;
pub mod rest;
pub mod sharepoint;
pub mod source;

pub use config::SourceConfig;
pub use directory::{fetch_records, DirectoryState, Liveness, UserDirectory};
pub use errors::{DirectoryError, Result};
pub use record::{normalize_display_name, RawProfile, UserRecord};
pub use rest::RestSource;
pub use sharepoint::{resolve_link, SharePointLink};
pub use source::{ActionInvoker, ErrorDescriptor, ProfileSource, Query, Response};

pub const PROFILES_TABLE: &str = "profiles";
pub const NAME_COLUMN: &str = "nome";

pub const SHAREPOINT_LINK_ACTION: &str = "get-sharepoint-link";
