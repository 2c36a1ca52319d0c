use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use anyhow::{bail, Result};
use reqwest::{header, Client, ClientBuilder, Proxy, Url};
use spdlog::prelude::*;

pub const DEFAULT_ENDPOINT: &str = "https://web.archive.org/cdx/search/cdx";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Raw URL lists already fetched during this run, keyed by domain.
#[derive(Debug, Default)]
pub struct FetchCache {
    entries: RwLock<HashMap<String, Arc<Vec<String>>>>,
}

impl FetchCache {
    pub fn get(&self, domain: &str) -> Option<Arc<Vec<String>>> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(domain).cloned()
    }

    pub fn insert(&self, domain: &str, urls: Vec<String>) -> Arc<Vec<String>> {
        let urls = Arc::new(urls);
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(domain.to_string(), Arc::clone(&urls));
        urls
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// Archive index client for one run.
pub struct Archive {
    client: Client,
    endpoint: String,
    cache: FetchCache,
}

impl Archive {
    pub fn new(endpoint: &str, proxy: Option<&str>) -> Result<Self> {
        let mut builder = ClientBuilder::new().user_agent(USER_AGENT);
        if let Some(proxy) = proxy {
            builder = builder.proxy(Proxy::all(proxy)?);
        }
        Ok(Archive {
            client: builder.build()?,
            endpoint: endpoint.trim_end_matches('?').to_string(),
            cache: FetchCache::default(),
        })
    }

    pub fn cache(&self) -> &FetchCache {
        &self.cache
    }

    /// Index query for every capture under `domain`, one original URL per
    /// line, collapsed by URL key. `page` is sent as given and never
    /// iterated.
    pub fn query_url(&self, domain: &str) -> Result<Url> {
        let raw = format!(
            "{}?url={}/*&output=txt&collapse=urlkey&fl=original&page=/",
            self.endpoint, domain
        );
        Ok(Url::parse(&raw)?)
    }

    /// Returns every non-blank line the index reports for `domain`.
    /// Non-2xx responses are errors and are not cached.
    pub async fn fetch(&self, domain: &str) -> Result<Arc<Vec<String>>> {
        if let Some(urls) = self.cache.get(domain) {
            debug!("archive: cache hit domain={} urls={}", domain, urls.len());
            return Ok(urls);
        }

        let url = self.query_url(domain)?;
        let resp = self.client.get(url.clone()).send().await?;
        let status = resp.status();
        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|s| s.to_str().ok())
            .map(|s| s.to_string());

        debug!(
            "request: url={} status={} content_type={}",
            url,
            status.as_str(),
            content_type.as_deref().unwrap_or(""),
        );

        if !status.is_success() {
            bail!("archive returned {} for {}", status, domain);
        }

        let body = resp.text().await?;
        Ok(self.cache.insert(domain, split_lines(&body)))
    }
}

pub fn split_lines(body: &str) -> Vec<String> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
