pub mod domain;
pub mod error;
pub mod motion;

pub use domain::*;
pub use error::{Error, Result};
pub use motion::*;
