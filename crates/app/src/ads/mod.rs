pub mod markup;
pub mod rotator;

pub use rotator::{AdRotator, RenderedAd};
