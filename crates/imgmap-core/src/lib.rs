pub mod config;
pub mod logging;

pub mod block;
pub mod classify;
pub mod compress;
pub mod rewrite;

pub use block::{Block, BlockFormat, RefTable};
pub use classify::{contains_emoji, is_avif};
pub use compress::{compress_image, compress_image_with};
pub use config::MapConfig;
pub use rewrite::map_img_url;
