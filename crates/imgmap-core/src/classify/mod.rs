//! Format classification for image references.
//!
//! Decides whether a reference is an AVIF file (routed through the signed
//! file endpoint) or an emoji glyph string (left untouched by the
//! uniqueness pass).

mod avif;
mod emoji;

pub use avif::is_avif;
pub use emoji::contains_emoji;
