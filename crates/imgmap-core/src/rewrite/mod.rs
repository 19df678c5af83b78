//! Image reference rewriting.
//!
//! Maps a platform-hosted image reference (absolute URL or root-relative
//! path) to an externally servable URL: resolves it against the content
//! host, routes expiring storage URLs through the image proxy or the signed
//! file endpoint, optionally swaps in a configured random image, appends a
//! cache-busting token, and finally adds host-specific compression
//! parameters.

mod convert;
mod unique;

use crate::block::{Block, RefTable};
use crate::classify::{contains_emoji, is_avif};
use crate::compress::compress_image;
use crate::config::MapConfig;

use convert::{needs_proxy_conversion, to_avif_file_url, to_image_proxy, PAGE_COVER_MARKER};
use unique::{append_avif_token, append_cache_buster, random_replacement};

/// Maps an image reference owned by `block` to its servable URL.
///
/// Returns `None` for an absent/empty reference. Pure in `cfg`: the same
/// inputs always yield the same output, and nothing is mutated.
pub fn map_img_url(
    img: Option<&str>,
    block: &Block,
    table: RefTable,
    need_compress: bool,
    cfg: &MapConfig,
) -> Option<String> {
    let img = img.filter(|s| !s.is_empty())?;

    // Root-relative references are the platform's own assets.
    let mut ret = if img.starts_with('/') {
        format!("{}{}", cfg.notion_host, img)
    } else {
        img.to_string()
    };

    // AVIF is judged on the original reference: a root-relative path never
    // parses as a URL and thus never takes this branch.
    let avif = is_avif(img);
    if avif {
        ret = to_avif_file_url(&ret, block, table);
    } else if needs_proxy_conversion(&ret, block) {
        ret = to_image_proxy(&ret, block, table, cfg);
    }

    // Emoji glyphs and built-in page covers are served as-is: no
    // replacement, no cache busting.
    if !contains_emoji(&ret) && !ret.contains(PAGE_COVER_MARKER) {
        if let Some(replacement) = random_replacement(&ret, cfg) {
            ret = replacement;
        }
        ret = if avif {
            append_avif_token(&ret, cfg)
        } else {
            append_cache_buster(&ret, &block.id)
        };
    }

    if need_compress {
        ret = compress_image(&ret, block.block_width(), cfg);
    }

    Some(ret)
}
