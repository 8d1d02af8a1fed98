//! Outcome of sweeping one value: a [`LookupResult`] holds one
//! [`LookupRequest`] per configured record type, each with the
//! [`LookupResponse`] records found in the answer section.
//!
//! Hide flags are markers set by classification only. Nothing here ever
//! drops data, so a hidden record stays available for the checkpoint.

pub mod request;
pub mod response;
pub mod result;

pub use request::{LookupRequest, RawSections, STATUS_NOT_FOUND, STATUS_SUCCESS};
pub use response::LookupResponse;
pub use result::LookupResult;

/// Compares two DNS names the way the wire does: ASCII case-insensitive,
/// with or without the trailing root dot.
pub fn names_match(a: &str, b: &str) -> bool {
    trim_root(a).eq_ignore_ascii_case(trim_root(b))
}

/// Removes a single trailing dot, if present.
pub fn trim_root(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}
