pub mod model;

pub use model::{Board, Theme};
