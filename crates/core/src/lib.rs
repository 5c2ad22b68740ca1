pub mod canvas;
pub mod config;
pub mod error;
pub mod types;

pub use config::{parse_page_toml, save_page_toml};
pub use error::{Error, Result};
pub use types::*;
