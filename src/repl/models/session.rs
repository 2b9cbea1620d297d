//! # Session Model
//!
//! Mutable configuration for one shell run: base url, login, prompt template,
//! the user's environment variables and the HTTP client that owns headers and
//! settings. Built fresh per invocation and never persisted.

use crate::repl::services::http::{Exchange, HttpMethod, RestClient, Variables};
use anyhow::Result;
use lazy_static::lazy_static;
use regex::{Captures, Regex};

pub const DEFAULT_BASE_URL: &str = "no-host";
pub const DEFAULT_LOGIN: &str = "no-user";
pub const DEFAULT_PROMPT: &str = "{login}@{baseurl}|restsh> ";

/// Setting read by `login` to pick the auth method
pub const AUTH_METHOD_SETTING: &str = "auth_method";
pub const DEFAULT_AUTH_METHOD: &str = "basic";

lazy_static! {
    static ref PROMPT_PLACEHOLDER: Regex = Regex::new(r"\{(login|baseurl)\}").unwrap();
}

/// Everything the shell remembers between commands
pub struct Session<C: RestClient> {
    base_url: String,
    login: String,
    prompt_template: String,
    environment: Variables,
    client: C,
}

impl<C: RestClient> Session<C> {
    /// Create a session with default values and a freshly connected client
    pub fn new() -> Result<Self> {
        Ok(Self::with_client(C::connect()?))
    }

    pub fn with_client(client: C) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            login: DEFAULT_LOGIN.to_string(),
            prompt_template: DEFAULT_PROMPT.to_string(),
            environment: Variables::new(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn prompt_template(&self) -> &str {
        &self.prompt_template
    }

    pub fn environment(&self) -> &Variables {
        &self.environment
    }

    pub fn headers(&self) -> &Variables {
        self.client.headers()
    }

    pub fn settings(&self) -> &Variables {
        self.client.settings()
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn set_header(&mut self, key: &str, value: &str) {
        self.client.set_header(key, value);
    }

    pub fn unset_header(&mut self, key: &str) {
        self.client.unset_header(key);
    }

    pub fn set_setting(&mut self, key: &str, value: &str) {
        self.client.set_setting(key, value);
    }

    pub fn unset_setting(&mut self, key: &str) {
        self.client.unset_setting(key);
    }

    pub fn set_env(&mut self, key: &str, value: &str) {
        self.environment.insert(key.to_string(), value.to_string());
    }

    pub fn del_env(&mut self, key: &str) {
        self.environment.remove(key);
    }

    /// Look up a setting, falling back to `default` when it is not set
    pub fn setting_or_default<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.client
            .settings()
            .get(key)
            .map(String::as_str)
            .unwrap_or(default)
    }

    pub fn set_base_url(&mut self, url: &str) {
        self.base_url = url.to_string();
        self.client.set_base_url(url);
    }

    pub fn set_prompt(&mut self, template: &str) {
        self.prompt_template = template.to_string();
    }

    /// Hand credentials to the client and remember who is logged in
    ///
    /// The password only passes through; it is not kept in the session.
    pub fn authenticate(&mut self, username: &str, password: &str) -> Result<()> {
        let method = self
            .setting_or_default(AUTH_METHOD_SETTING, DEFAULT_AUTH_METHOD)
            .to_string();
        self.client.set_auth(username, password, &method)?;
        self.login = username.to_string();
        Ok(())
    }

    /// Prompt with `{login}` and `{baseurl}` substituted
    ///
    /// Both placeholders are replaced in a single pass, so substituted text is
    /// never expanded again. Any other `{...}` text is left untouched.
    pub fn render_prompt(&self) -> String {
        PROMPT_PLACEHOLDER
            .replace_all(&self.prompt_template, |caps: &Captures| match &caps[1] {
                "login" => self.login.clone(),
                _ => self.base_url.clone(),
            })
            .into_owned()
    }

    /// Expand `$name` / `${name}` references from the environment
    ///
    /// Unknown names are left as written.
    pub fn expand(&self, text: &str) -> String {
        shellexpand::env_with_context_no_errors(text, |name: &str| {
            self.environment.get(name).map(String::as_str)
        })
        .into_owned()
    }

    /// Send a request through the client after expanding environment references
    pub fn request(
        &mut self,
        method: HttpMethod,
        url: &str,
        body: Option<&str>,
    ) -> Result<Exchange> {
        let url = self.expand(url);
        let body = body.map(|b| self.expand(b));
        let body = body.as_deref();

        match method {
            HttpMethod::Get => self.client.get(&url, body),
            HttpMethod::Post => self.client.post(&url, body),
            HttpMethod::Put => self.client.put(&url, body),
            HttpMethod::Delete => self.client.delete(&url, body),
        }
    }

    /// Replace the client with a freshly connected one
    ///
    /// Environment, login name and base url survive; headers, settings and
    /// credentials come back at the client's defaults. A base url that was set
    /// is handed to the new client again.
    pub fn reload(&mut self) -> Result<()> {
        let mut client = C::connect()?;
        if self.base_url != DEFAULT_BASE_URL {
            client.set_base_url(&self.base_url);
        }
        self.client = client;
        tracing::info!(
            "Client reloaded, kept {} environment entries",
            self.environment.len()
        );
        Ok(())
    }
}
