//! # Mock I/O Implementations for Testing
//!
//! Scripted line and secret sources plus an in-memory [`RestClient`], so the
//! whole shell can be driven without a terminal or a network.

use super::{LineEditor, SecretReader};
use crate::repl::services::http::{
    resolve_url, AuthMethod, Exchange, HttpMethod, RequestRecord, ResponseRecord, RestClient,
    Variables,
};
use anyhow::Result;
use std::collections::VecDeque;

/// Line editor fed from a fixed list of lines
#[derive(Debug, Default)]
pub struct MockLineEditor {
    lines: VecDeque<String>,
    prompts: Vec<String>,
    history: Vec<String>,
    flushed: bool,
}

impl MockLineEditor {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Every prompt shown so far, in order
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Lines handed out so far
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn was_flushed(&self) -> bool {
        self.flushed
    }
}

impl LineEditor for MockLineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        let line = self.lines.pop_front();
        if let Some(line) = &line {
            self.history.push(line.clone());
        }
        Ok(line)
    }

    fn flush_history(&mut self) -> Result<()> {
        self.flushed = true;
        Ok(())
    }
}

/// Secret reader returning pre-programmed passwords
#[derive(Debug, Default)]
pub struct MockSecretReader {
    secrets: VecDeque<String>,
}

impl MockSecretReader {
    pub fn new<I, S>(secrets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            secrets: secrets.into_iter().map(Into::into).collect(),
        }
    }
}

impl SecretReader for MockSecretReader {
    fn read_secret(&mut self, _prompt: &str) -> Result<String> {
        self.secrets
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No secret available"))
    }
}

/// In-memory HTTP client that records requests and answers with a canned response
#[derive(Debug, Clone)]
pub struct MockClient {
    pub base_url: Option<String>,
    pub headers: Variables,
    pub settings: Variables,
    pub auth: Option<(String, String, String)>,
    pub requests: Vec<RequestRecord>,
    pub response: ResponseRecord,
    /// When set, the next request fails with this message
    pub fail_with: Option<String>,
}

impl Default for MockClient {
    fn default() -> Self {
        Self {
            base_url: None,
            headers: Variables::new(),
            settings: Variables::new(),
            auth: None,
            requests: Vec::new(),
            response: ResponseRecord {
                status: 200,
                headers: vec![("content-type".to_string(), "text/plain".to_string())],
                body: "hello".to_string(),
            },
            fail_with: None,
        }
    }
}

impl RestClient for MockClient {
    fn connect() -> Result<Self> {
        Ok(Self::default())
    }

    fn send(&mut self, method: HttpMethod, url: &str, body: Option<&str>) -> Result<Exchange> {
        if let Some(message) = self.fail_with.take() {
            anyhow::bail!(message);
        }

        let url = resolve_url(self.base_url.as_deref(), url)?;
        let request = RequestRecord {
            method,
            url,
            body: body.map(str::to_string),
            headers: self
                .headers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        };
        self.requests.push(request.clone());

        Ok(Exchange {
            request,
            response: self.response.clone(),
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
        method.parse::<AuthMethod>()?;
        self.auth = Some((username.to_string(), password.to_string(), method.to_string()));
        Ok(())
    }
}
