//! Common types shared by the LINE Notify library and CLI

mod error;
mod secret;

pub use error::{Error, Result};
pub use secret::Secret;
