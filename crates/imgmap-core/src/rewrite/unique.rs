//! Uniqueness pass: random-image replacement and cache-busting suffixes.

use crate::config::MapConfig;

use super::convert::{BUILTIN_IMAGES_PREFIX, FILE_ENDPOINT_MARKER};

/// Length of a platform space identifier (a hyphenated UUID).
const SPACE_ID_LEN: usize = 36;

/// When the random-image feature is configured, decides whether `url` is
/// replaced and returns the replacement. With a trigger list configured,
/// only URLs containing one of the substrings are replaced; with no list,
/// every URL is.
pub(crate) fn random_replacement(url: &str, cfg: &MapConfig) -> Option<String> {
    let target = cfg.random_image_url.as_deref()?;

    let triggered = match cfg
        .random_image_replace_text
        .as_deref()
        .filter(|t| !t.is_empty())
    {
        Some(triggers) => triggers
            .split(',')
            .filter(|t| !t.is_empty())
            .any(|t| url.contains(t)),
        None => true,
    };

    triggered.then(|| target.to_string())
}

/// Appends the signed-token parameters to a file-endpoint AVIF URL. The
/// space id is the 36-char segment directly after the endpoint marker; if
/// it cannot be extracted the URL is left alone.
pub(crate) fn append_avif_token(url: &str, cfg: &MapConfig) -> String {
    let space_id = url
        .find(FILE_ENDPOINT_MARKER)
        .map(|pos| pos + FILE_ENDPOINT_MARKER.len())
        .and_then(|start| url.get(start..start + SPACE_ID_LEN));

    match space_id {
        Some(space_id) => format!(
            "{}&spaceId={}&expirationTimestamp={}&signature={}",
            url, space_id, cfg.avif_signature.expiration_timestamp, cfg.avif_signature.signature
        ),
        None => url.to_string(),
    }
}

/// Appends `t=<block_id>` so every block's image resolves to a unique URL,
/// defeating URL-keyed caches. Skipped for trivially short URLs, built-in
/// platform images, and URLs that already carry a `t` parameter (repeated
/// mapping stays idempotent).
pub(crate) fn append_cache_buster(url: &str, block_id: &str) -> String {
    let trimmed = url.trim();
    if trimmed.len() <= 4 || trimmed.contains(BUILTIN_IMAGES_PREFIX) || has_t_param(trimmed) {
        return url.to_string();
    }
    let separator = if trimmed.contains('?') { '&' } else { '?' };
    format!("{}{}t={}", trimmed, separator, block_id)
}

fn has_t_param(url: &str) -> bool {
    url.split_once('?')
        .map(|(_, query)| {
            query
                .split('&')
                .any(|pair| pair == "t" || pair.starts_with("t="))
        })
        .unwrap_or(false)
}
