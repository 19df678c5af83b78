//! Host-specific compression rules.
//!
//! Each known image host accepts different query parameters for server-side
//! scaling. The rules form an ordered table evaluated first-match-wins, so
//! adding a host is one new variant plus one line in `RULES`.

use url::Url;

use crate::config::MapConfig;

/// Unsplash serves scaled/transcoded variants driven by query parameters.
const UNSPLASH_PREFIX: &str = "https://images.unsplash.com/";

/// Storage-domain marker identifying content-host URLs backed by S3.
const AWS_MARKER: &str = "amazonaws.com";

/// Sentinel returned for the self-hosted image-bed extension point, which
/// has no compression implementation yet.
pub const CUSTOM_BED_SENTINEL: &str = "unimplemented://custom-image-bed";

/// Parameters threaded into a rule application.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CompressParams<'a> {
    pub width: u32,
    pub quality: u32,
    pub format: &'a str,
}

/// A known image host and the query-parameter dialect it speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HostRule {
    /// Content host backed by the platform's S3 storage: `width` + `cache=v2`.
    NotionStorage,
    /// Unsplash photo stock: `q`, `width`, `fmt`, `fm`.
    Unsplash,
    /// Operator's own image bed (configured prefix); unimplemented.
    CustomBed,
}

/// Evaluation order. First match wins.
pub(crate) const RULES: &[HostRule] = &[
    HostRule::NotionStorage,
    HostRule::Unsplash,
    HostRule::CustomBed,
];

impl HostRule {
    pub(crate) fn matches(&self, image: &str, cfg: &MapConfig) -> bool {
        match self {
            HostRule::NotionStorage => {
                image.starts_with(&cfg.notion_host) && image.contains(AWS_MARKER)
            }
            HostRule::Unsplash => image.starts_with(UNSPLASH_PREFIX),
            HostRule::CustomBed => cfg
                .custom_image_bed
                .as_deref()
                .is_some_and(|prefix| image.starts_with(prefix)),
        }
    }

    pub(crate) fn apply(&self, mut url: Url, params: &CompressParams<'_>) -> String {
        match self {
            HostRule::NotionStorage => {
                set_query_params(
                    &mut url,
                    &[("width", params.width.to_string()), ("cache", "v2".to_string())],
                );
                url.to_string()
            }
            HostRule::Unsplash => {
                set_query_params(
                    &mut url,
                    &[
                        ("q", params.quality.to_string()),
                        ("width", params.width.to_string()),
                        ("fmt", params.format.to_string()),
                        ("fm", params.format.to_string()),
                    ],
                );
                url.to_string()
            }
            HostRule::CustomBed => CUSTOM_BED_SENTINEL.to_string(),
        }
    }
}

/// Writes query parameters, overwriting same-named existing ones and
/// preserving everything else in place.
fn set_query_params(url: &mut Url, updates: &[(&str, String)]) {
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    for (key, value) in updates {
        match pairs.iter_mut().find(|(k, _)| k == key) {
            Some(pair) => pair.1 = value.clone(),
            None => pairs.push((key.to_string(), value.clone())),
        }
    }

    url.query_pairs_mut()
        .clear()
        .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_query_params_overwrites_and_preserves() {
        let mut url = Url::parse("https://a.com/p?x=1&width=9&y=2").unwrap();
        set_query_params(&mut url, &[("width", "400".to_string()), ("cache", "v2".to_string())]);
        assert_eq!(url.as_str(), "https://a.com/p?x=1&width=400&y=2&cache=v2");
    }

    #[test]
    fn notion_storage_rule_requires_both_host_and_marker() {
        let cfg = MapConfig::default();
        let rule = HostRule::NotionStorage;
        assert!(rule.matches(
            "https://www.notion.so/image/https%3A%2F%2Fs3.amazonaws.com%2Fx?table=block",
            &cfg
        ));
        assert!(!rule.matches("https://www.notion.so/image/other", &cfg));
        assert!(!rule.matches("https://s3.amazonaws.com/x", &cfg));
    }

    #[test]
    fn custom_bed_rule_only_with_config() {
        let mut cfg = MapConfig::default();
        let rule = HostRule::CustomBed;
        assert!(!rule.matches("https://img.example.com/a.png", &cfg));
        cfg.custom_image_bed = Some("https://img.example.com".to_string());
        assert!(rule.matches("https://img.example.com/a.png", &cfg));
        assert!(!rule.matches("https://other.example.com/a.png", &cfg));
    }

    #[test]
    fn rule_order_is_notion_first() {
        assert_eq!(
            RULES,
            &[HostRule::NotionStorage, HostRule::Unsplash, HostRule::CustomBed]
        );
    }
}
