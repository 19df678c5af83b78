use anyhow::Result;
use imgmap_core::{map_img_url, Block, BlockFormat, MapConfig, RefTable};

/// Runs the full mapping pipeline for one reference and prints the result.
pub fn run_map(
    url: &str,
    id: String,
    kind: Option<String>,
    table: RefTable,
    width: Option<u32>,
    no_compress: bool,
    cfg: &MapConfig,
) -> Result<()> {
    let block = Block {
        id,
        kind,
        format: width.map(|w| BlockFormat {
            block_width: Some(w),
        }),
    };

    match map_img_url(Some(url), &block, table, !no_compress, cfg) {
        Some(mapped) => {
            tracing::debug!("mapped {} -> {}", url, mapped);
            println!("{}", mapped);
            Ok(())
        }
        None => anyhow::bail!("empty image reference"),
    }
}
