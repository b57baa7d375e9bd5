//! tramline-core: route parameters for the request handler chain
//!
//! The contract between a route-matching engine and the code that handles a
//! matched request. The engine is not part of this crate; it calls
//! [`Request::add_param`] once per captured segment, in match order, before
//! handing the request to the handler chain.
//!
//! ## Pieces
//! - [`Params`] / [`Request`] - layered, copy-on-write parameter bindings
//! - [`is_valid_method`] - membership test for the nine recognized verbs
//! - [`RouterConfig`] - TRACE gating and other router settings
//! - [`MiddlewareChain`] - links that read and extend bindings
//!
//! ## Example
//! ```
//! use tramline_core::{is_valid_method, Request};
//!
//! let mut req = Request::new("GET", "/users/42/bob");
//! req.add_param("id", "42");
//! req.add_param("name", "bob");
//!
//! let before = req.params().clone();
//! req.add_param("id", "43");
//!
//! assert_eq!(req.param("id"), "43");
//! assert_eq!(req.param_names(), vec!["id", "name", "id"]);
//! assert_eq!(before.get("id"), Some("42"));
//! assert_eq!(req.param("missing"), "");
//! assert!(is_valid_method("TRACE"));
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod middleware;
pub mod params;
pub mod parser;
pub mod request;

// Re-exports
pub use config::RouterConfig;
pub use error::{Error, Result};
pub use params::Params;
pub use parser::{is_valid_method, Method};
pub use request::{Request, RequestBuilder};

// Middleware re-exports
pub use middleware::{AddParam, Flow, Middleware, MiddlewareChain};
