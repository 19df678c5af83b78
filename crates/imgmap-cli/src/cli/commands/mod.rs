mod compress;
mod map;
mod serve;

pub use compress::run_compress;
pub use map::run_map;
pub use serve::run_serve;
