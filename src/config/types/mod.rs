mod duration;

pub use duration::*;
