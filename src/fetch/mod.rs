//! HTTP polling of the metrics server.
//!
//! Every tick spawns one task per [`MetricKind`]. Tasks do not wait on each
//! other; each one reports back through the channel as soon as its own
//! response (or failure) is in, tagged with the tick that issued it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::data::{MetricKind, Payload};
use crate::error::{Result, WebtopError};

/// Result of one endpoint request.
#[derive(Debug)]
pub struct FetchOutcome {
    pub kind: MetricKind,
    pub tick: u64,
    pub result: Result<Payload>,
}

#[derive(Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    base_url: Arc<str>,
}

impl Fetcher {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| WebtopError::config(format!("HTTP client: {err}")))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint_url(&self, kind: MetricKind) -> String {
        format!("{}{}", self.base_url, kind.path())
    }

    /// Issues all six requests for `tick` without waiting for any of them.
    /// Must be called from within a tokio runtime.
    pub fn spawn_tick(&self, tick: u64, tx: &UnboundedSender<FetchOutcome>) {
        for kind in MetricKind::ALL {
            let fetcher = self.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = fetcher.fetch(kind).await;
                // The receiver only goes away on shutdown.
                let _ = tx.send(FetchOutcome { kind, tick, result });
            });
        }
    }

    pub async fn fetch(&self, kind: MetricKind) -> Result<Payload> {
        let url = self.endpoint_url(kind);
        debug!(endpoint = kind.path(), %url, "fetching metric");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| WebtopError::transport(kind.path(), describe(&err)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WebtopError::http_status(kind.path(), status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| WebtopError::transport(kind.path(), describe(&err)))?;
        Payload::decode(kind, &body)
    }
}

fn normalize_base_url(value: &str) -> Result<String> {
    let trimmed = value.trim().trim_end_matches('/');
    let url = reqwest::Url::parse(trimmed)
        .map_err(|err| WebtopError::invalid_argument(format!("server url {value}: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(WebtopError::invalid_argument(format!(
            "server url {value}: expected http or https"
        )));
    }
    Ok(trimmed.to_string())
}

fn describe(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "timed out".to_string()
    } else if err.is_connect() {
        format!("connect failed: {err}")
    } else {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves `responses` to consecutive connections, one each.
    async fn serve(responses: Vec<String>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            for response in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.unwrap();
            }
        });
        format!("http://{addr}")
    }

    fn http_response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    #[test]
    fn endpoint_urls_join_cleanly() {
        let fetcher = Fetcher::new("http://localhost:3000/", Duration::from_secs(1)).unwrap();
        assert_eq!(fetcher.base_url(), "http://localhost:3000");
        assert_eq!(
            fetcher.endpoint_url(MetricKind::Processes),
            "http://localhost:3000/proc"
        );
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(Fetcher::new("ftp://host", Duration::from_secs(1)).is_err());
        assert!(Fetcher::new("not a url", Duration::from_secs(1)).is_err());
    }

    #[tokio::test]
    async fn fetch_decodes_success() {
        let base = serve(vec![http_response(
            "200 OK",
            r#"{"cpu_usage":[10.0],"cpu_load_average":1.0,"cpu_product_name":"x"}"#,
        )])
        .await;
        let fetcher = Fetcher::new(&base, Duration::from_secs(5)).unwrap();
        let payload = fetcher.fetch(MetricKind::Cpu).await.unwrap();
        assert_eq!(payload.kind(), MetricKind::Cpu);
    }

    #[tokio::test]
    async fn fetch_reports_http_status() {
        let base = serve(vec![http_response("503 Service Unavailable", "{}")]).await;
        let fetcher = Fetcher::new(&base, Duration::from_secs(5)).unwrap();
        let err = fetcher.fetch(MetricKind::Gpu).await.unwrap_err();
        assert!(matches!(err, WebtopError::HttpStatus { status: 503, .. }));
    }

    #[tokio::test]
    async fn fetch_reports_malformed_body() {
        let base = serve(vec![http_response("200 OK", "not json")]).await;
        let fetcher = Fetcher::new(&base, Duration::from_secs(5)).unwrap();
        let err = fetcher.fetch(MetricKind::Memory).await.unwrap_err();
        assert!(matches!(err, WebtopError::Decode { .. }));
    }

    #[tokio::test]
    async fn fetch_reports_transport_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let fetcher = Fetcher::new(&format!("http://{addr}"), Duration::from_secs(2)).unwrap();
        let err = fetcher.fetch(MetricKind::System).await.unwrap_err();
        assert!(matches!(err, WebtopError::Transport { ref endpoint, .. } if endpoint == "/system"));
    }

    #[tokio::test]
    async fn spawn_tick_reports_every_kind_once() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let fetcher = Fetcher::new(&format!("http://{addr}"), Duration::from_secs(2)).unwrap();

        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        fetcher.spawn_tick(7, &tx);

        let mut kinds = Vec::new();
        for _ in 0..MetricKind::ALL.len() {
            let outcome = rx.recv().await.unwrap();
            assert_eq!(outcome.tick, 7);
            assert!(outcome.result.is_err());
            kinds.push(outcome.kind);
        }
        for kind in MetricKind::ALL {
            assert!(kinds.contains(&kind));
        }
    }
}
