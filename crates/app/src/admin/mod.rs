pub mod claims;
pub mod manager;
pub mod token_file;

pub use manager::{AdminAdManager, AdminView};
