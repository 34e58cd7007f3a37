//! Request description: the value a Task hands to the driver.
//!
//! A `RequestSpec` is plain data. It never talks to the network; the driver
//! (goose) turns it into a real HTTP request and records the outcome.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use url::Url;

/// HTTP methods used by the load-test tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// GraphQL request body.
///
/// `variables` is kept as a *string* (empty, or a JSON-encoded object),
/// which is what the load scripts have always sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphQlBody {
    pub query: String,
    pub variables: String,
}

impl GraphQlBody {
    /// Body with empty `variables`.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: String::new(),
        }
    }

    /// Encode `variables` as a JSON string.
    pub fn with_variables(mut self, variables: &serde_json::Value) -> Self {
        self.variables = variables.to_string();
        self
    }
}

/// Request payload.
///
/// Serialized untagged: the wire body is the inner value itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestBody {
    GraphQl(GraphQlBody),
}

/// A fully formed request description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// Reporting name used by the driver to aggregate metrics.
    pub name: String,

    pub method: HttpMethod,

    /// Path relative to the target host, as written in the task definition.
    pub path: String,

    /// `path` resolved against the target host.
    pub url: Url,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub cookies: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestBody>,
}

impl RequestSpec {
    /// Request with no headers, cookies or body. The reporting name
    /// defaults to the path.
    pub fn new(method: HttpMethod, path: impl Into<String>, url: Url) -> Self {
        let path = path.into();
        Self {
            name: path.clone(),
            method,
            path,
            url,
            headers: BTreeMap::new(),
            cookies: BTreeMap::new(),
            body: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// `Cookie` header value (`k1=v1; k2=v2`), or `None` when there are no cookies.
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        let pairs: Vec<String> = self
            .cookies
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        Some(pairs.join("; "))
    }
}
