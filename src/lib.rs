// src/lib.rs

pub mod app;
pub mod config;
pub mod error;
pub mod key;
pub mod signer;
pub mod userinfo;

/// The public prelude for the `oneid-jwt-auth` crate.
///
/// This module re-exports the most commonly used types for convenience.
pub mod prelude {
    pub use crate::app::{APP_TENCENT_DOCS, APP_TENCENT_MEETING, APP_TENCENT_ONEID};
    pub use crate::config::{SignerConfig, SignerOptions};
    pub use crate::error::OneIdError;
    pub use crate::key::{parse_private_key, SigningKey};
    pub use crate::signer::Signer;
    pub use crate::userinfo::Userinfo;
}
