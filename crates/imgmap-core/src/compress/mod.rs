//! Compression parameter rewriting.
//!
//! No image bytes are touched: known hosts scale/transcode server-side
//! based on query parameters, so "compression" here means appending the
//! right parameters for the host the URL belongs to.

mod rules;

pub use rules::CUSTOM_BED_SENTINEL;

use url::Url;

use crate::classify::is_avif;
use crate::config::MapConfig;

use rules::{CompressParams, RULES};

/// Default quality for hosts that accept one.
pub const DEFAULT_QUALITY: u32 = 50;

/// Default target format for hosts that transcode.
pub const DEFAULT_FORMAT: &str = "avif";

/// Appends compression query parameters with the default quality/format.
pub fn compress_image(image: &str, width: Option<u32>, cfg: &MapConfig) -> String {
    compress_image_with(image, width, DEFAULT_QUALITY, DEFAULT_FORMAT, cfg)
}

/// Appends compression query parameters for the host `image` belongs to.
///
/// No-ops (returned unchanged): AVIF URLs (already compressed), empty or
/// non-HTTP strings, SVG (vector, nothing to scale), unparseable URLs, and
/// hosts no rule matches. A `width` of `None` or 0 falls back to the
/// configured default width.
pub fn compress_image_with(
    image: &str,
    width: Option<u32>,
    quality: u32,
    format: &str,
    cfg: &MapConfig,
) -> String {
    if image.is_empty() || !image.starts_with("http") || image.contains(".svg") || is_avif(image)
    {
        return image.to_string();
    }

    let width = width.filter(|w| *w > 0).unwrap_or(cfg.image_compress_width);
    let params = CompressParams {
        width,
        quality,
        format,
    };

    let url = match Url::parse(image) {
        Ok(u) => u,
        Err(e) => {
            tracing::debug!("url parse failed for {:?}: {}", image, e);
            return image.to_string();
        }
    };

    for rule in RULES {
        if rule.matches(image, cfg) {
            return rule.apply(url, &params);
        }
    }

    image.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> MapConfig {
        MapConfig::default()
    }

    #[test]
    fn unsplash_parameters_merged_into_existing_query() {
        let out = compress_image(
            "https://images.unsplash.com/photo-1?ixlib=rb-4&crop=entropy",
            Some(400),
            &cfg(),
        );
        let url = Url::parse(&out).unwrap();
        assert_eq!(url.path(), "/photo-1");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("ixlib".into(), "rb-4".into())));
        assert!(pairs.contains(&("crop".into(), "entropy".into())));
        assert!(pairs.contains(&("q".into(), "50".into())));
        assert!(pairs.contains(&("width".into(), "400".into())));
        assert!(pairs.contains(&("fmt".into(), "avif".into())));
        assert!(pairs.contains(&("fm".into(), "avif".into())));
    }

    #[test]
    fn unsplash_overwrites_existing_quality() {
        let out = compress_image_with(
            "https://images.unsplash.com/photo-1?q=80",
            Some(400),
            30,
            "webp",
            &cfg(),
        );
        assert!(out.contains("q=30"));
        assert!(!out.contains("q=80"));
        assert!(out.contains("fmt=webp"));
        assert!(out.contains("fm=webp"));
    }

    #[test]
    fn notion_storage_gets_width_and_cache_tag() {
        let image =
            "https://www.notion.so/image/https%3A%2F%2Fs3.us-west-2.amazonaws.com%2Fb%2Fx.png?table=block&id=a";
        let out = compress_image(image, Some(640), &cfg());
        assert!(out.contains("width=640"));
        assert!(out.contains("cache=v2"));
        assert!(out.contains("table=block"));
        assert!(out.contains("id=a"));
    }

    #[test]
    fn width_falls_back_to_configured_default() {
        let out = compress_image("https://images.unsplash.com/photo-1", None, &cfg());
        assert!(out.contains("width=800"));
        let zero = compress_image("https://images.unsplash.com/photo-1", Some(0), &cfg());
        assert!(zero.contains("width=800"));
    }

    #[test]
    fn svg_is_exempt() {
        assert_eq!(
            compress_image("https://example.com/a.svg", Some(400), &cfg()),
            "https://example.com/a.svg"
        );
    }

    #[test]
    fn avif_is_exempt() {
        assert_eq!(
            compress_image("https://file.notion.so/f/f/sp/obj/a.avif", Some(400), &cfg()),
            "https://file.notion.so/f/f/sp/obj/a.avif"
        );
    }

    #[test]
    fn non_http_and_empty_are_exempt() {
        assert_eq!(compress_image("", Some(400), &cfg()), "");
        assert_eq!(compress_image("🚀", Some(400), &cfg()), "🚀");
        assert_eq!(
            compress_image("ftp://example.com/a.png", Some(400), &cfg()),
            "ftp://example.com/a.png"
        );
    }

    #[test]
    fn unknown_host_unchanged() {
        assert_eq!(
            compress_image("https://example.com/a.png?x=1", Some(400), &cfg()),
            "https://example.com/a.png?x=1"
        );
    }

    #[test]
    fn custom_bed_returns_sentinel() {
        let cfg = MapConfig {
            custom_image_bed: Some("https://img.example.com".to_string()),
            ..MapConfig::default()
        };
        assert_eq!(
            compress_image("https://img.example.com/a.png", Some(400), &cfg),
            CUSTOM_BED_SENTINEL
        );
    }
}
