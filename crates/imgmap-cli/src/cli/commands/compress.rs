use anyhow::Result;
use imgmap_core::{compress_image_with, MapConfig};

/// Runs only the compressor and prints the resulting URL.
pub fn run_compress(
    url: &str,
    width: Option<u32>,
    quality: u32,
    format: &str,
    cfg: &MapConfig,
) -> Result<()> {
    let out = compress_image_with(url, width, quality, format, cfg);
    println!("{}", out);
    Ok(())
}
