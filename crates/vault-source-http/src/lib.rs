//! HTTP transport for the vault router.
//!
//! Provides [`HttpSource`], which fetches the manifest document and node
//! bodies from a static web server with a shared `ureq` agent. Requests are
//! blocking, so each one runs on tokio's blocking pool.

use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use ureq::Agent;
use vault_source::{ContentSource, ManifestSource, SourceError, SourceErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Http";

/// Bytes escaped in a path segment: everything except RFC 3986 unreserved.
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Static-server source.
///
/// Content URLs are `content_base_url` followed by the node's `content_path`.
#[derive(Clone, Debug)]
pub struct HttpSource {
    agent: Agent,
    manifest_url: String,
    content_base_url: String,
}

impl HttpSource {
    /// Create a source for the given endpoints.
    ///
    /// # Arguments
    ///
    /// * `manifest_url` - URL of the manifest document
    /// * `content_base_url` - Prefix prepended to every `content_path`
    /// * `timeout` - Global request timeout, `None` to wait indefinitely
    #[must_use]
    pub fn new(
        manifest_url: impl Into<String>,
        content_base_url: &str,
        timeout: Option<Duration>,
    ) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(timeout)
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            manifest_url: manifest_url.into(),
            content_base_url: content_base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// URL a content path is fetched from.
    ///
    /// Content paths are raw file names, so every segment is percent-encoded.
    #[must_use]
    pub fn content_url(&self, content_path: &str) -> String {
        let path = content_path
            .trim_start_matches('/')
            .split('/')
            .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT_ENCODE_SET).to_string())
            .collect::<Vec<_>>()
            .join("/");
        format!("{}/{path}", self.content_base_url)
    }

    async fn get(&self, url: String) -> Result<String, SourceError> {
        let agent = self.agent.clone();
        let location = url.clone();
        tracing::debug!(url = %url, "HTTP GET");

        tokio::task::spawn_blocking(move || get_blocking(&agent, &url))
            .await
            .map_err(|e| {
                SourceError::new(SourceErrorKind::Other)
                    .with_location(location)
                    .with_backend(BACKEND)
                    .with_source(e)
            })?
    }
}

fn get_blocking(agent: &Agent, url: &str) -> Result<String, SourceError> {
    let response = agent.get(url).call().map_err(|e| {
        SourceError::new(SourceErrorKind::Network)
            .with_location(url)
            .with_backend(BACKEND)
            .with_source(e)
    })?;

    let status = response.status().as_u16();
    if !(200..300).contains(&status) {
        return Err(SourceError::status(status, url).with_backend(BACKEND));
    }

    let mut body = response.into_body();
    body.read_to_string().map_err(|e| {
        SourceError::new(SourceErrorKind::Network)
            .with_location(url)
            .with_backend(BACKEND)
            .with_source(e)
    })
}

impl ManifestSource for HttpSource {
    async fn fetch_manifest(&self) -> Result<String, SourceError> {
        self.get(self.manifest_url.clone()).await
    }
}

impl ContentSource for HttpSource {
    async fn fetch_content(&self, content_path: &str) -> Result<String, SourceError> {
        self.get(self.content_url(content_path)).await
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    use super::*;

    /// Answer one request with `body` and hand back the request line.
    fn serve_once(body: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            loop {
                let mut header = String::new();
                if reader.read_line(&mut header).unwrap() == 0 || header == "\r\n" {
                    break;
                }
            }
            write!(
                stream,
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
            request_line
        });
        (format!("http://{addr}"), handle)
    }

    #[test]
    fn test_content_url_joins_with_single_slash() {
        let source = HttpSource::new(
            "http://127.0.0.1:8000/manifest.json",
            "http://127.0.0.1:8000/vault/",
            None,
        );

        assert_eq!(
            source.content_url("/nature/tundra.html"),
            "http://127.0.0.1:8000/vault/nature/tundra.html"
        );
        assert_eq!(
            source.content_url("README.html"),
            "http://127.0.0.1:8000/vault/README.html"
        );
    }

    #[test]
    fn test_content_url_with_bare_host() {
        let source = HttpSource::new("http://h/m.json", "http://h", None);

        assert_eq!(source.content_url("/x.html"), "http://h/x.html");
    }

    #[test]
    fn test_content_url_encodes_segments() {
        let source = HttpSource::new("http://h/m.json", "http://h/vault", None);

        assert_eq!(
            source.content_url("/nature/polar bear.html"),
            "http://h/vault/nature/polar%20bear.html"
        );
        assert_eq!(
            source.content_url("/café/a&b#1?.html"),
            "http://h/vault/caf%C3%A9/a%26b%231%3F.html"
        );
    }

    #[tokio::test]
    async fn test_fetch_content_with_space_in_path() {
        let (base, server) = serve_once("<p>bear</p>");
        let source = HttpSource::new(
            format!("{base}/manifest.json"),
            &base,
            Some(Duration::from_secs(5)),
        );

        let body = source.fetch_content("/nature/polar bear.html").await.unwrap();

        assert_eq!(body, "<p>bear</p>");
        assert_eq!(
            server.join().unwrap().trim_end(),
            "GET /nature/polar%20bear.html HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let source = HttpSource::new(
            "http://127.0.0.1:1/manifest.json",
            "http://127.0.0.1:1",
            Some(Duration::from_secs(5)),
        );

        let err = source.fetch_manifest().await.unwrap_err();

        assert_eq!(err.kind, SourceErrorKind::Network);
        assert_eq!(err.backend, Some("Http"));
        assert_eq!(
            err.location.as_deref(),
            Some("http://127.0.0.1:1/manifest.json")
        );
    }
}
