#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Loads level maps from image files on disk or from raw encoded bytes.
//!
//! The image crate handles format detection and pixel conversion; the world
//! decoder owns the palette semantics, so any format the crate can convert
//! to RGBA works as a map source.

use std::path::Path;

use anyhow::{Context, Result};
use gemfire_world::{decode_rgba, Level};

/// Loads and decodes a level map from an image file.
pub fn load_level<P: AsRef<Path>>(path: P) -> Result<Level> {
    let path = path.as_ref();
    let image = image::open(path)
        .with_context(|| format!("failed to open level map {}", path.display()))?
        .to_rgba8();
    decode_rgba(image.as_raw(), image.width(), image.height())
        .with_context(|| format!("failed to decode level map {}", path.display()))
}

/// Decodes a level map from in-memory encoded image bytes.
pub fn decode_bytes(bytes: &[u8]) -> Result<Level> {
    let image = image::load_from_memory(bytes)
        .context("failed to read level map bytes")?
        .to_rgba8();
    decode_rgba(image.as_raw(), image.width(), image.height())
        .context("failed to decode level map bytes")
}
