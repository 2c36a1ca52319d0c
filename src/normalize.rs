use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

pub const DEFAULT_PLACEHOLDER: &str = "FUZZ";

static SCHEME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://").unwrap());

/// Counts of raw URLs that did not make it into the cleaned set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub repeated_scheme: usize,
    pub no_query: usize,
    pub no_params: usize,
    pub duplicates: usize,
}

impl Report {
    pub fn dropped(&self) -> usize {
        self.repeated_scheme + self.no_query + self.no_params
    }
}

/// Archive entries like `http://http://host/...` are corrupted captures.
pub fn has_repeated_scheme(url: &str) -> bool {
    SCHEME.find_iter(url).nth(1).is_some()
}

/// Replaces every `=`-separated value segment of each parameter with
/// `placeholder`, so `key=a=b` becomes `key=P=P`. Parameters without `=`
/// are discarded. Returns `None` when the URL has no `?` or no parameter
/// survives.
pub fn clean_url(url: &str, placeholder: &str) -> Option<String> {
    let (base, query) = url.split_once('?')?;
    let params: Vec<String> = query
        .split('&')
        .filter_map(|param| {
            let mut segments = param.split('=');
            let key = segments.next()?;
            let values = segments.count();
            if values == 0 {
                return None;
            }
            Some(format!("{}={}", key, vec![placeholder; values].join("=")))
        })
        .collect();
    if params.is_empty() {
        return None;
    }
    Some(format!("{}?{}", base, params.join("&")))
}

/// Cleans `urls` into a deduplicated set. Output order is unspecified.
pub fn clean_urls<S: AsRef<str>>(urls: &[S], placeholder: &str) -> (Vec<String>, Report) {
    let mut report = Report::default();
    let mut cleaned = HashSet::new();
    for url in urls {
        let url = url.as_ref();
        if has_repeated_scheme(url) {
            report.repeated_scheme += 1;
            continue;
        }
        if !url.contains('?') {
            report.no_query += 1;
            continue;
        }
        match clean_url(url, placeholder) {
            Some(c) => {
                if !cleaned.insert(c) {
                    report.duplicates += 1;
                }
            }
            None => report.no_params += 1,
        }
    }
    (cleaned.into_iter().collect(), report)
}
