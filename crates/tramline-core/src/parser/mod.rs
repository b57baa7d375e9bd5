//! HTTP parsing types - SSOT for the Method enum

mod method;

pub use method::{is_valid_method, Method};
