pub mod count;

pub use count::{count_support, LevelCount};
