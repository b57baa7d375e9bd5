//! Fixed route parameter middleware
//!
//! Binds the same name/value on every request that passes through, e.g. a
//! tenant or API version implied by where the chain is mounted.

use super::{Flow, Middleware};
use crate::Request;

/// Appends one binding to each request
#[derive(Debug, Clone)]
pub struct AddParam {
    name: String,
    value: String,
}

impl AddParam {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl Middleware for AddParam {
    fn handle(&self, req: &mut Request) -> Flow {
        req.add_param(self.name.as_str(), self.value.as_str());
        Flow::Continue
    }
}
