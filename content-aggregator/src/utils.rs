/// Endpoint construction for provider requests
pub mod url {
    use url::Url;

    /// Join `path` onto `base` and append `params` as query pairs.
    ///
    /// `base` may carry its own path prefix (e.g. a proxy mount point); `path`
    /// is appended to it rather than replacing it.
    pub fn endpoint(base: &str, path: &str, params: &[(&str, String)]) -> Result<Url, url::ParseError> {
        let mut base = Url::parse(base)?;
        if !base.path().ends_with('/') {
            let prefixed = format!("{}/", base.path());
            base.set_path(&prefixed);
        }
        let mut url = base.join(path.trim_start_matches('/'))?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// The URL with its query string removed, safe to log.
    pub fn redacted(url: &Url) -> String {
        let mut clean = url.clone();
        clean.set_query(None);
        clean.to_string()
    }
}

/// Timestamp parsing for provider payloads
pub mod time {
    use chrono::{DateTime, NaiveDate, Utc};

    /// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (read as midnight UTC).
    pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
            return Some(parsed.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}

/// Text matching used by the search stage
pub mod text {
    /// `needle` must already be lower-cased.
    pub fn contains_lowercase(haystack: &str, needle: &str) -> bool {
        haystack.to_lowercase().contains(needle)
    }
}
