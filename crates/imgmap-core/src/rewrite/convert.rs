//! Host/path conversion: routing references onto the canonical image proxy
//! or the signed file endpoint.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::block::{Block, RefTable};
use crate::config::MapConfig;

/// Prefix of the content host's canonical image-proxy path.
pub(crate) const CANONICAL_IMAGE_PREFIX: &str = "https://www.notion.so/image";

/// Path segment of the platform's built-in cover images; these are served
/// directly and never proxied or cache-busted.
pub(crate) const PAGE_COVER_SEGMENT: &str = "notion.site/images/page-cover/";
pub(crate) const PAGE_COVER_MARKER: &str = "notion.so/images/page-cover";

/// Prefix of the platform's built-in image assets, exempt from the
/// cache-busting suffix.
pub(crate) const BUILTIN_IMAGES_PREFIX: &str = "https://www.notion.so/images/";

/// Markers identifying the platform's private object storage; such URLs
/// expire and must be indirected through the image proxy.
pub(crate) const PRIVATE_STORAGE_MARKERS: &[&str] =
    &["secure.notion-static.com", "prod-files-secure"];

/// Storage-domain marker splitting an S3 URL into bucket host and object key.
pub(crate) const AWS_STORAGE_MARKER: &str = ".amazonaws.com/";

/// The platform's file-serving endpoint for signed AVIF delivery.
pub(crate) const FILE_ENDPOINT: &str = "https://file.notion.so/f/f/";

/// Marker preceding the 36-char space identifier in file-endpoint URLs.
pub(crate) const FILE_ENDPOINT_MARKER: &str = "file.notion.so/f/f/";

/// `encodeURIComponent` equivalent: everything but ASCII alphanumerics and
/// `- _ . ! ~ * ' ( )` is percent-encoded.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub(crate) fn encode_uri_component(s: &str) -> String {
    utf8_percent_encode(s, URI_COMPONENT).to_string()
}

/// Whether the URL is already in a canonical, non-expiring form: either the
/// content host's `/image/...` proxy path or a built-in page cover.
pub(crate) fn is_canonical_proxy(url: &str) -> bool {
    url.starts_with(CANONICAL_IMAGE_PREFIX) || url.contains(PAGE_COVER_SEGMENT)
}

/// Whether the URL must be indirected through the image proxy: bookmark
/// preview images always are, private-storage URLs are unless already
/// converted.
pub(crate) fn needs_proxy_conversion(url: &str, block: &Block) -> bool {
    !is_canonical_proxy(url)
        && (block.is_bookmark() || PRIVATE_STORAGE_MARKERS.iter().any(|m| url.contains(m)))
}

/// Rewrites `url` onto the content host's `/image/<encoded>` proxy path,
/// tagged with the requesting table and block id.
pub(crate) fn to_image_proxy(
    url: &str,
    block: &Block,
    table: RefTable,
    cfg: &MapConfig,
) -> String {
    format!(
        "{}/image/{}?table={}&id={}",
        cfg.notion_host,
        encode_uri_component(url),
        table,
        block.id
    )
}

/// Rewrites an AVIF storage URL onto the file-serving endpoint: everything
/// up to and including the storage-domain marker is replaced by the
/// endpoint prefix. URLs without the marker keep their base but still get
/// the `table`/`id` tag.
pub(crate) fn to_avif_file_url(url: &str, block: &Block, table: RefTable) -> String {
    let base = match url.find(AWS_STORAGE_MARKER) {
        Some(pos) => format!("{}{}", FILE_ENDPOINT, &url[pos + AWS_STORAGE_MARKER.len()..]),
        None => url.to_string(),
    };
    format!("{}?table={}&id={}", base, table, block.id)
}
