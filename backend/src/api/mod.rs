mod refresh;
pub mod video;

pub use refresh::*;
pub use video::*;
