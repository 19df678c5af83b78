//! Emoji glyph detection.
//!
//! A coarse guard over the common pictographic, arrow, and geometric
//! blocks, not a full grapheme-cluster detector. Page icons arrive either
//! as URLs or as raw emoji strings; this keeps the latter out of the URL
//! rewrite passes.

/// Inclusive codepoint ranges covering the pictographic/emoji blocks the
/// platform emits for page icons, plus the arrow and geometric symbols
/// commonly used as list bullets.
const EMOJI_RANGES: &[(u32, u32)] = &[
    (0x1F300, 0x1F6FF), // symbols & pictographs, transport
    (0x1F1E0, 0x1F1FF), // regional indicators (flags)
    (0x2600, 0x26FF),   // miscellaneous symbols
    (0x2700, 0x27BF),   // dingbats
    (0x1F900, 0x1F9FF), // supplemental symbols & pictographs
    (0x1F018, 0x1F270), // enclosed ideographic/alphanumeric extras
    (0x1F200, 0x1F251), // enclosed CJK supplement
    (0x2194, 0x2199),   // bidirectional arrows
];

/// Individual codepoints outside the contiguous ranges above.
const EMOJI_SINGLETONS: &[u32] = &[
    0x238C, // undo symbol
    0x2B05, 0x2B06, 0x2B07, 0x27A1, // cardinal arrows
    0x21A9, 0x21AA, 0x2934, 0x2935, // curved arrows
    0x25AA, 0x25AB, 0x25FB, 0x25FC, 0x25FD, 0x25FE, // geometric squares
    0x25B6, 0x25C0, // play/reverse triangles
];

/// Returns true if any character of `s` falls in the emoji ranges.
pub fn contains_emoji(s: &str) -> bool {
    s.chars().any(|c| {
        let cp = c as u32;
        EMOJI_RANGES.iter().any(|&(lo, hi)| (lo..=hi).contains(&cp))
            || EMOJI_SINGLETONS.contains(&cp)
    })
}
