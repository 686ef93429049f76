//! Content fetching from URLs, files, and stdin.
//!
//! Pages are requested with a browser-like header set, redirects are
//! followed, and the body is decoded through [`decode_body`] so callers
//! always get a `String` regardless of the page's charset.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};
use url::Url;

use crate::decode::{DecodedHtml, decode_body};
use crate::rules::SiteRules;
use crate::{DecantError, Result};

const MAX_REDIRECTS: usize = 10;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
                                  Chrome/124.0.0.0 Safari/537.36";

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// User-Agent header sent with every request.
    pub user_agent: String,
    /// Per-site header overrides.
    pub rules: SiteRules,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: BROWSER_USER_AGENT.to_string(), rules: SiteRules::default() }
    }
}

/// A fetched and decoded page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL as requested.
    pub url: String,
    /// URL after following redirects.
    pub final_url: String,
    /// Decoded HTML text.
    pub html: String,
    /// Name of the encoding the body was decoded from.
    pub encoding: &'static str,
}

/// Builds the shared HTTP client.
///
/// The client carries the timeout, redirect policy, and default browser
/// headers; per-request headers such as `Referer` are added in
/// [`fetch_page`].
pub fn build_client(config: &FetchConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .default_headers(browser_headers())
        .build()
        .map_err(DecantError::HttpError)
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static("zh-CN,zh;q=0.9,en-US;q=0.8,en;q=0.7"));
    headers.insert(header::UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers.insert("sec-fetch-dest", HeaderValue::from_static("document"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("navigate"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("none"));
    headers.insert("sec-fetch-user", HeaderValue::from_static("?1"));
    headers
}

/// Validates that a string is an absolute http(s) URL.
pub fn parse_http_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| DecantError::InvalidUrl(format!("{}: {}", url, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(DecantError::InvalidUrl(format!(
            "unsupported scheme '{}', URL must start with http:// or https://",
            other
        ))),
    }
}

/// Fetches a page and decodes its body.
///
/// Non-success statuses become [`DecantError::HttpStatus`]; transport
/// failures become [`DecantError::HttpError`] or [`DecantError::Timeout`].
pub async fn fetch_page(client: &Client, url: &str, config: &FetchConfig) -> Result<FetchedPage> {
    let parsed_url = parse_http_url(url)?;

    let mut request = client.get(parsed_url.clone()).header(header::USER_AGENT, &config.user_agent);
    if let Some(referer) = parsed_url.host_str().and_then(|host| config.rules.referer_for(host)) {
        tracing::debug!(referer, "applying referer override");
        request = request.header(header::REFERER, referer);
    }

    let response = request.send().await.map_err(|e| map_send_error(e, config.timeout))?;

    let status = response.status();
    let final_url = response.url().to_string();
    if !status.is_success() {
        return Err(DecantError::HttpStatus { status: status.as_u16(), url: final_url });
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let bytes = response.bytes().await.map_err(|e| map_send_error(e, config.timeout))?;
    let DecodedHtml { html, encoding } = decode_body(&bytes, content_type.as_deref());

    tracing::debug!(url, %final_url, bytes = bytes.len(), encoding, "fetched page");

    Ok(FetchedPage { url: url.to_string(), final_url, html, encoding })
}

/// Fetches a page with a one-off client.
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let client = build_client(config)?;
    fetch_page(&client, url, config).await.map(|page| page.html)
}

fn map_send_error(err: reqwest::Error, timeout: u64) -> DecantError {
    if err.is_timeout() { DecantError::Timeout { timeout } } else { DecantError::HttpError(err) }
}

/// Reads HTML content from a local file, decoding it like a fetched body.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        return Err(DecantError::FileNotFound(path_buf));
    }

    let bytes = fs::read(&path_buf)?;
    Ok(decode_body(&bytes, None).html)
}

/// Reads HTML content from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin().read_to_end(&mut buffer)?;

    Ok(decode_body(&buffer, None).html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, 30);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_parse_http_url() {
        assert!(parse_http_url("http://example.com").is_ok());
        assert!(parse_http_url("https://example.com/a?b=c").is_ok());
        assert!(matches!(parse_http_url("example.com"), Err(DecantError::InvalidUrl(_))));
        assert!(matches!(parse_http_url("ftp://example.com"), Err(DecantError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_fetch_url_invalid() {
        let result = fetch_url("not-a-url", &FetchConfig::default()).await;
        assert!(matches!(result, Err(DecantError::InvalidUrl(_))));
    }

    #[test]
    fn test_fetch_file_not_found() {
        let result = fetch_file("/nonexistent/path/file.html");
        assert!(matches!(result, Err(DecantError::FileNotFound(_))));
    }

    #[test]
    fn test_fetch_file_decodes_gbk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        let (bytes, _, _) = encoding_rs::GBK.encode(
            "<p>你好，世界。这是一个用来测试本地文件读取的页面，文件内容使用国标编码保存，\
             读取的时候需要自动识别编码并且转换成正确的中文字符，不能出现乱码。</p>",
        );
        std::fs::write(&path, &bytes).unwrap();

        let html = fetch_file(path.to_str().unwrap()).unwrap();
        assert!(html.contains("你好"));
    }

    #[test]
    fn test_browser_headers() {
        let headers = browser_headers();
        assert!(headers.contains_key(header::ACCEPT));
        assert_eq!(headers.get("sec-fetch-mode").unwrap(), "navigate");
    }
}
