//! Page handlers.

mod pages;

pub use pages::*;
