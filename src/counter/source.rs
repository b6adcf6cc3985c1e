//! Where the view count comes from.

use super::{CounterError, ViewCount};
use anyhow::Context;
use std::{path::PathBuf, time::Duration};
use url::Url;

/// A source of the current view count.
pub trait ViewSource {
    /// Issue one request and extract the `views` value from the response.
    async fn fetch_views(&self) -> Result<ViewCount, CounterError>;
}

/// Options for the HTTP client talking to the counting endpoint.
#[derive(Clone, Debug, Default)]
pub struct HttpOptions {
    /// Give up on the request after this long. No limit when unset.
    pub timeout: Option<Duration>,
    /// Treat non-success status codes as errors, instead of trying to read the body.
    pub check_status: bool,
    /// Allow invalid certificates, e.g. when behind a corporate proxy.
    pub accept_invalid_certs: bool,
    /// An additional root certificate (PEM).
    pub root_certificate: Option<PathBuf>,
}

/// Fetches the view count with a single unauthenticated GET.
#[derive(Clone, Debug)]
pub struct HttpSource {
    client: reqwest::Client,
    endpoint: Url,
    check_status: bool,
}

impl HttpSource {
    pub async fn new(endpoint: Url, options: &HttpOptions) -> anyhow::Result<Self> {
        Ok(Self {
            client: http_client(options).await?,
            endpoint,
            check_status: options.check_status,
        })
    }
}

impl ViewSource for HttpSource {
    #[tracing::instrument(level = "debug", skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch_views(&self) -> Result<ViewCount, CounterError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(|source| CounterError::Request {
                url: self.endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        tracing::debug!("endpoint responded with {status}");
        if self.check_status && !status.is_success() {
            return Err(CounterError::Status { status });
        }

        let body = response.bytes().await.map_err(CounterError::Body)?;
        // decode like a browser: invalid sequences are replaced, a leading BOM is dropped
        let body = String::from_utf8_lossy(&body);
        let body: serde_json::Value =
            serde_json::from_str(body.strip_prefix('\u{feff}').unwrap_or(&body))?;

        let views = ViewCount::from_body(body).ok_or(CounterError::NullBody)?;
        tracing::debug!("received views: {:?}", views.value());

        Ok(views)
    }
}

async fn http_client(options: &HttpOptions) -> anyhow::Result<reqwest::Client> {
    let mut builder = reqwest::ClientBuilder::new();

    if let Some(timeout) = options.timeout {
        builder = builder.timeout(timeout);
    }

    #[cfg(any(feature = "native-tls", feature = "rustls"))]
    let builder = {
        let mut builder = builder.danger_accept_invalid_certs(options.accept_invalid_certs);

        if let Some(root_certificate) = &options.root_certificate {
            let cert = tokio::fs::read(root_certificate).await.with_context(|| {
                format!(
                    "error reading root certificate '{}'",
                    root_certificate.display()
                )
            })?;

            builder = builder.add_root_certificate(
                reqwest::Certificate::from_pem(&cert)
                    .context("error adding root certificate")?,
            );
        }

        builder
    };

    builder.build().context("error building http client")
}
