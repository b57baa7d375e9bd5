//! HTTP Request types
//!
//! A [`Request`] carries the route parameters bound to it as a [`Params`]
//! chain. The matching engine appends one binding per captured segment, in
//! match order, and handlers read or extend the chain from there.

use crate::params::Params;
use crate::parser::Method;
use crate::{Error, Result};
use bytes::Bytes;
use percent_encoding::percent_decode_str;
use smallvec::SmallVec;
use std::collections::{HashMap, HashSet};

/// HTTP Request
#[derive(Debug, Clone)]
pub struct Request {
    /// Raw method token as received; may be outside the recognized set
    pub method: String,
    /// Request path (without query string)
    pub path: String,
    /// Query string (without leading ?)
    pub query: Option<String>,
    /// Request headers (stack-allocated for small header counts)
    pub headers: SmallVec<[(String, String); 16]>,
    /// Request body
    pub body: Bytes,
    params: Params,
}

impl Request {
    /// Create a new request
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            query: None,
            headers: SmallVec::new(),
            body: Bytes::new(),
            params: Params::new(),
        }
    }

    /// Create a request from a method and a request target such as
    /// `/users/42?:id=42`
    pub fn from_uri(method: impl Into<String>, uri: &str) -> Result<Self> {
        let uri: http::Uri = uri
            .parse()
            .map_err(|e: http::uri::InvalidUri| Error::InvalidUri(e.to_string()))?;
        let mut req = Self::new(method, uri.path());
        req.query = uri.query().map(str::to_string);
        Ok(req)
    }

    /// Recognized method, or `None` for tokens like `PURGE`
    pub fn method_kind(&self) -> Option<Method> {
        Method::parse(self.method.as_bytes())
    }

    /// Get a header value (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Get a route parameter, or `""` when it was never bound
    ///
    /// An empty binding and a missing one look the same here; use
    /// [`Request::params`] to tell them apart.
    pub fn param(&self, name: &str) -> &str {
        self.params.get(name).unwrap_or("")
    }

    /// Names of all bound route parameters, most recently added first
    pub fn param_names(&self) -> Vec<String> {
        self.params.names().map(str::to_string).collect()
    }

    /// The current parameter chain
    ///
    /// Cloning it is cheap, and the clone is unaffected by later
    /// [`Request::add_param`] calls.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Bind a route parameter on top of the existing ones
    pub fn add_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        tracing::trace!(name = %name, depth = self.params.len() + 1, "route param bound");
        self.params.push(name, value);
    }

    /// Bind the pairs captured by a route match, in match order
    pub fn bind_match<I, N, V>(&mut self, captured: I)
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        for (name, value) in captured {
            self.add_param(name, value);
        }
    }

    /// Names of query-string keys that start with `:`, colon stripped
    ///
    /// This reads the query string only. Parameters added with
    /// [`Request::add_param`] do not show up here, and query keys never
    /// become route parameters.
    pub fn query_param_names(&self) -> HashSet<String> {
        self.query_pairs()
            .filter_map(|(key, _)| key.strip_prefix(':').map(str::to_string))
            .collect()
    }

    /// Parse query string into key-value pairs
    pub fn query_params(&self) -> HashMap<String, String> {
        self.query_pairs().collect()
    }

    /// Decoded `(key, value)` pairs in query order
    ///
    /// Empty pairs, pairs containing `;` and pairs with a bad percent escape
    /// in either half are skipped.
    fn query_pairs(&self) -> impl Iterator<Item = (String, String)> + '_ {
        self.query
            .as_deref()
            .into_iter()
            .flat_map(|query| query.split('&'))
            .filter(|pair| !pair.is_empty() && !pair.contains(';'))
            .filter_map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                Some((query_unescape(key)?, query_unescape(value)?))
            })
    }
}

impl From<http::Request<Bytes>> for Request {
    fn from(req: http::Request<Bytes>) -> Self {
        let (parts, body) = req.into_parts();
        let headers = parts
            .headers
            .iter()
            .filter_map(|(name, value)| {
                let value = value.to_str().ok()?;
                Some((name.as_str().to_string(), value.to_string()))
            })
            .collect();

        Self {
            method: parts.method.as_str().to_string(),
            path: parts.uri.path().to_string(),
            query: parts.uri.query().map(str::to_string),
            headers,
            body,
            params: Params::new(),
        }
    }
}

/// Builder for constructing requests
pub struct RequestBuilder {
    request: Request,
}

impl RequestBuilder {
    /// Create a new builder
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            request: Request::new(method, path),
        }
    }

    /// Set query string
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.request.query = Some(query.into());
        self
    }

    /// Add a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.headers.push((name.into(), value.into()));
        self
    }

    /// Set body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.request.body = body.into();
        self
    }

    /// Bind a route parameter
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.add_param(name, value);
        self
    }

    /// Build the request
    pub fn build(self) -> Request {
        self.request
    }
}

/// Decode one query component; `+` is a space
///
/// `None` when a `%` is not followed by two hex digits.
fn query_unescape(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while let Some(offset) = bytes[i..].iter().position(|&b| b == b'%') {
        let at = i + offset;
        let escape = bytes.get(at + 1..at + 3)?;
        if !escape.iter().all(u8::is_ascii_hexdigit) {
            return None;
        }
        i = at + 3;
    }

    let spaced = s.replace('+', " ");
    Some(percent_decode_str(&spaced).decode_utf8_lossy().into_owned())
}
