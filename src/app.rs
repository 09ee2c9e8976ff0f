// src/app.rs

//! App types understood by the login base URL's `{app_type}` segment.
//!
//! Any other string is passed through unchanged.

/// Tencent Meeting.
pub const APP_TENCENT_MEETING: &str = "meeting";

/// Tencent Docs.
pub const APP_TENCENT_DOCS: &str = "doc";

/// OneID itself.
pub const APP_TENCENT_ONEID: &str = "sso_api";
