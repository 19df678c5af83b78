//! AVIF detection from URL path extension tokens.

use url::Url;

/// Returns true iff the URL's path carries an `.avif` extension token,
/// case-insensitively. A path may hold several dot-segments
/// (`name.v2.avif`); each is checked.
///
/// Malformed URLs (including root-relative paths, which `Url::parse`
/// rejects) log a diagnostic and classify as not-AVIF rather than erroring.
pub fn is_avif(url: &str) -> bool {
    let parsed = match Url::parse(url) {
        Ok(u) => u,
        Err(e) => {
            tracing::debug!("url parse failed for {:?}: {}", url, e);
            return false;
        }
    };

    has_avif_token(parsed.path())
}

fn has_avif_token(path: &str) -> bool {
    extension_tokens(path).any(|token| token.eq_ignore_ascii_case("avif"))
}

/// Yields the alphanumeric run following each `.` in the path, mirroring
/// the extension-token shape `.[a-zA-Z0-9]+`.
fn extension_tokens(path: &str) -> impl Iterator<Item = &str> {
    path.split('.').skip(1).filter_map(|rest| {
        let end = rest
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(rest.len());
        if end == 0 {
            None
        } else {
            Some(&rest[..end])
        }
    })
}
