use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Signed-token parameters appended to AVIF file URLs (optional section in
/// config.toml). The defaults mirror the token the platform currently hands
/// out; operators with their own signing pipeline override them here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvifSignature {
    /// Millisecond epoch at which the signed URL expires.
    pub expiration_timestamp: u64,
    /// Opaque signature string the file endpoint expects.
    pub signature: String,
}

impl Default for AvifSignature {
    fn default() -> Self {
        Self {
            expiration_timestamp: 1_730_109_600_000,
            signature: "T8Kh6sMvbytq6usbjruWdVS5siv-EmRAg0Hr_KzaNQg".to_string(),
        }
    }
}

/// Global configuration loaded from `~/.config/imgmap/config.toml`.
///
/// A snapshot of this struct is passed explicitly into every mapping
/// function; the mapping code never reads ambient state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Base URL of the content host serving root-relative assets and the
    /// canonical `/image/...` proxy path.
    pub notion_host: String,
    /// Default width (px) used by the compressor when a block carries no
    /// layout-width hint.
    pub image_compress_width: u32,
    /// Replacement image service URL. When set, mapped URLs are swapped for
    /// this one (subject to `random_image_replace_text`).
    #[serde(default)]
    pub random_image_url: Option<String>,
    /// Comma-separated substrings restricting random replacement to URLs
    /// that contain one of them. Absent or empty = always replace.
    #[serde(default)]
    pub random_image_replace_text: Option<String>,
    /// URL prefix of a self-hosted image bed. Matching URLs hit the
    /// (unimplemented) custom compression extension point.
    #[serde(default)]
    pub custom_image_bed: Option<String>,
    /// Upstream origin the relay forwards to.
    #[serde(default = "default_file_proxy_origin")]
    pub file_proxy_origin: String,
    /// Signed-token parameters for AVIF cache busting.
    #[serde(default)]
    pub avif_signature: AvifSignature,
}

fn default_file_proxy_origin() -> String {
    "https://file.notion.so".to_string()
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            notion_host: "https://www.notion.so".to_string(),
            image_compress_width: 800,
            random_image_url: None,
            random_image_replace_text: None,
            custom_image_bed: None,
            file_proxy_origin: default_file_proxy_origin(),
            avif_signature: AvifSignature::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("imgmap")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<MapConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = MapConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: MapConfig = toml::from_str(&data)?;
    Ok(cfg)
}
