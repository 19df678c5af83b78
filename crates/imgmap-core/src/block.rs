//! Content block model: the owning unit of an image reference.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Block type discriminator for external links whose preview image must be
/// routed through the content host's image proxy.
pub const BOOKMARK_TYPE: &str = "bookmark";

/// Layout hints attached to a block by the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockFormat {
    /// Rendered width of the block in pixels, when the editor recorded one.
    #[serde(default)]
    pub block_width: Option<u32>,
}

/// A unit of content (paragraph, image, page, bookmark, ...) owning an
/// image reference. Only the fields the mapper consumes are modeled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Platform identifier, used as the cache-busting token.
    pub id: String,
    /// Type discriminator (e.g. "bookmark").
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub format: Option<BlockFormat>,
}

impl Block {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn is_bookmark(&self) -> bool {
        self.kind.as_deref() == Some(BOOKMARK_TYPE)
    }

    /// Layout-width hint, if the block carries one.
    pub fn block_width(&self) -> Option<u32> {
        self.format.as_ref().and_then(|f| f.block_width)
    }
}

/// Which content-rendering context requested the image: a single block or a
/// collection (gallery/list) view. Rendered into the proxy URL's `table`
/// query parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefTable {
    #[default]
    Block,
    Collection,
}

impl fmt::Display for RefTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefTable::Block => write!(f, "block"),
            RefTable::Collection => write!(f, "collection"),
        }
    }
}

impl FromStr for RefTable {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "block" => Ok(RefTable::Block),
            "collection" => Ok(RefTable::Collection),
            other => Err(format!("unknown table '{}', expected block|collection", other)),
        }
    }
}
