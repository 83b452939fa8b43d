pub mod ads;
pub mod draft;
pub mod generation;
pub mod history;
