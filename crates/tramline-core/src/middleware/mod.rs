//! Middleware chain
//!
//! Each link sees the request after the links before it, including any route
//! parameters they bound.

pub mod add_param;

pub use add_param::AddParam;

use crate::Request;

/// What the chain does after a link returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Hand the request to the next link
    Continue,
    /// Stop; later links do not run
    Halt,
}

/// Middleware trait - inspect and extend a request
pub trait Middleware: Send + Sync {
    fn handle(&self, req: &mut Request) -> Flow;
}

impl<F> Middleware for F
where
    F: Fn(&mut Request) -> Flow + Send + Sync,
{
    fn handle(&self, req: &mut Request) -> Flow {
        self(req)
    }
}

/// Middleware chain
pub struct MiddlewareChain {
    middlewares: Vec<Box<dyn Middleware>>,
}

impl MiddlewareChain {
    pub fn new() -> Self {
        Self {
            middlewares: Vec::new(),
        }
    }

    pub fn add<M: Middleware + 'static>(&mut self, middleware: M) {
        self.middlewares.push(Box::new(middleware));
    }

    /// Run links in registration order, stopping at the first halt
    pub fn run(&self, req: &mut Request) -> Flow {
        for (index, m) in self.middlewares.iter().enumerate() {
            if m.handle(req) == Flow::Halt {
                tracing::debug!(index, path = %req.path, "middleware chain halted");
                return Flow::Halt;
            }
        }
        Flow::Continue
    }

    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }
}

impl Default for MiddlewareChain {
    fn default() -> Self {
        Self::new()
    }
}
