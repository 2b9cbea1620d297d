//! # HTTP Service
//!
//! The boundary to the HTTP client. The shell only ever talks to a
//! [`RestClient`]; [`HttpService`] is the reqwest-backed implementation used
//! by the binary, and tests swap in an in-memory one.

use crate::repl::error::ShellError;
use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use std::collections::BTreeMap;
use std::fmt;

lazy_static! {
    static ref SCHEME_PREFIX: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://").unwrap();
}

/// String keyed mapping used for headers, settings and the environment
pub type Variables = BTreeMap<String, String>;

/// Ordered `(name, value)` header pairs as they went over the wire
pub type HeaderPairs = Vec<(String, String)>;

/// The four request verbs the shell exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    fn to_reqwest(self) -> Method {
        match self {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What was sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRecord {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<String>,
    pub headers: HeaderPairs,
}

/// What came back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseRecord {
    pub status: u16,
    pub headers: HeaderPairs,
    pub body: String,
}

/// One request/response round trip, kept only long enough to print it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub request: RequestRecord,
    pub response: ResponseRecord,
}

/// Credentials handed over by `login`
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub method: AuthMethod,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("method", &self.method)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    Basic,
    Bearer,
}

impl std::str::FromStr for AuthMethod {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(AuthMethod::Basic),
            "bearer" => Ok(AuthMethod::Bearer),
            other => Err(ShellError::UnsupportedAuthMethod(other.to_string())),
        }
    }
}

/// The HTTP collaborator the shell delegates every network operation to
///
/// Implementations own the custom headers and settings, so rebuilding the
/// client (`reload`) resets both to whatever `connect` starts with.
pub trait RestClient: Sized {
    /// Build a fresh client
    fn connect() -> Result<Self>;

    /// Send a request. `url` is resolved against the base url when relative.
    fn send(&mut self, method: HttpMethod, url: &str, body: Option<&str>) -> Result<Exchange>;

    fn set_header(&mut self, key: &str, value: &str);
    fn unset_header(&mut self, key: &str);
    fn headers(&self) -> &Variables;

    fn set_setting(&mut self, key: &str, value: &str);
    fn unset_setting(&mut self, key: &str);
    fn settings(&self) -> &Variables;

    fn set_base_url(&mut self, url: &str);

    /// Store credentials for subsequent requests. Fails on an unknown auth method.
    fn set_auth(&mut self, username: &str, password: &str, method: &str) -> Result<()>;

    fn get(&mut self, url: &str, body: Option<&str>) -> Result<Exchange> {
        self.send(HttpMethod::Get, url, body)
    }

    fn post(&mut self, url: &str, body: Option<&str>) -> Result<Exchange> {
        self.send(HttpMethod::Post, url, body)
    }

    fn put(&mut self, url: &str, body: Option<&str>) -> Result<Exchange> {
        self.send(HttpMethod::Put, url, body)
    }

    fn delete(&mut self, url: &str, body: Option<&str>) -> Result<Exchange> {
        self.send(HttpMethod::Delete, url, body)
    }
}

/// Join a request url onto the base url
///
/// Absolute urls (starting with a scheme) win over the base url. A `://`
/// further in, e.g. inside the query string, does not make a url absolute.
pub fn resolve_url(base_url: Option<&str>, url: &str) -> Result<String, ShellError> {
    if SCHEME_PREFIX.is_match(url) {
        return Ok(url.to_string());
    }

    let base = base_url.ok_or_else(|| ShellError::MissingBaseUrl(url.to_string()))?;
    if url.is_empty() {
        return Ok(base.to_string());
    }

    Ok(format!(
        "{}/{}",
        base.trim_end_matches('/'),
        url.trim_start_matches('/')
    ))
}

/// reqwest backed [`RestClient`]
pub struct HttpService {
    client: Client,
    base_url: Option<String>,
    headers: Variables,
    settings: Variables,
    credentials: Option<Credentials>,
}

impl HttpService {
    fn header_map(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::new();
        for (key, value) in &self.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .with_context(|| format!("Invalid header name '{key}'"))?;
            let value = HeaderValue::from_str(value)
                .with_context(|| format!("Invalid value for header '{key}'"))?;
            map.insert(name, value);
        }
        Ok(map)
    }

    fn pairs(headers: &HeaderMap) -> HeaderPairs {
        headers
            .iter()
            .map(|(k, v)| {
                (
                    k.to_string(),
                    String::from_utf8_lossy(v.as_bytes()).into_owned(),
                )
            })
            .collect()
    }
}

impl RestClient for HttpService {
    fn connect() -> Result<Self> {
        tracing::debug!("Creating reqwest blocking client");
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: None,
            headers: Variables::new(),
            settings: Variables::new(),
            credentials: None,
        })
    }

    fn send(&mut self, method: HttpMethod, url: &str, body: Option<&str>) -> Result<Exchange> {
        let full_url = resolve_url(self.base_url.as_deref(), url)?;

        let mut builder = self
            .client
            .request(method.to_reqwest(), &full_url)
            .headers(self.header_map()?);
        builder = match &self.credentials {
            Some(Credentials {
                username,
                password,
                method: AuthMethod::Basic,
            }) => builder.basic_auth(username, Some(password)),
            Some(Credentials {
                password,
                method: AuthMethod::Bearer,
                ..
            }) => builder.bearer_auth(password),
            None => builder,
        };
        if let Some(body) = body {
            builder = builder.body(body.to_string());
        }

        let request = builder
            .build()
            .with_context(|| format!("Invalid request: {method} {full_url}"))?;
        let request_headers = Self::pairs(request.headers());

        tracing::info!("Sending {} {}", method, full_url);
        let response = self
            .client
            .execute(request)
            .map_err(|e| anyhow::anyhow!("HTTP request failed: {e}"))?;

        let status = response.status().as_u16();
        let response_headers = Self::pairs(response.headers());
        let text = response
            .text()
            .context("Failed to read response body")?;
        tracing::debug!("Received {} ({} bytes)", status, text.len());

        Ok(Exchange {
            request: RequestRecord {
                method,
                url: full_url,
                body: body.map(str::to_string),
                headers: request_headers,
            },
            response: ResponseRecord {
                status,
                headers: response_headers,
                body: text,
            },
        })
    }

    fn set_header(&mut self, key: &str, value: &str) {
        self.headers.insert(key.to_string(), value.to_string());
    }

    fn unset_header(&mut self, key: &str) {
        self.headers.remove(key);
    }

    fn headers(&self) -> &Variables {
        &self.headers
    }

    fn set_setting(&mut self, key: &str, value: &str) {
        self.settings.insert(key.to_string(), value.to_string());
    }

    fn unset_setting(&mut self, key: &str) {
        self.settings.remove(key);
    }

    fn settings(&self) -> &Variables {
        &self.settings
    }

    fn set_base_url(&mut self, url: &str) {
        self.base_url = Some(url.to_string());
    }

    fn set_auth(&mut self, username: &str, password: &str, method: &str) -> Result<()> {
        let method: AuthMethod = method.parse()?;
        self.credentials = Some(Credentials {
            username: username.to_string(),
            password: password.to_string(),
            method,
        });
        Ok(())
    }
}
