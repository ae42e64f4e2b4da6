pub mod app;
pub mod cli;
pub mod codec;
pub mod console;
pub mod database;
pub mod error;
pub mod store;
pub mod types;
pub mod utils;
pub mod view;

pub use error::{MaptyError, Result};
