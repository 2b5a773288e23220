pub mod classifier;

pub use classifier::{Intent, classify};
