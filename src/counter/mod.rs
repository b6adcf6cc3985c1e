//! Fetching the view count, and rendering it into the page.

mod display;
mod error;
mod source;
mod views;

#[cfg(test)]
pub(crate) mod test_util;

pub use display::*;
pub use error::*;
pub use source::*;
pub use views::*;

use crate::common::ERROR;

/// The selector of the element displaying the counter, unless configured otherwise.
pub const DEFAULT_SELECTOR: &str = ".counter-number";

/// The text shown whenever the count couldn't be read.
pub const FALLBACK_TEXT: &str = "Couldn't read views";

/// How a single update ended.
#[derive(Debug)]
pub enum Outcome {
    /// The count was rendered into the target.
    Rendered { text: String },
    /// Something failed, the fallback text was rendered instead.
    Fallback { error: CounterError },
    /// Something failed, and the fallback text could not be rendered either.
    Unwritten {
        error: CounterError,
        write_error: CounterError,
    },
}

impl Outcome {
    /// The text which ended up in the target, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Rendered { text } => Some(text.as_str()),
            Self::Fallback { .. } => Some(FALLBACK_TEXT),
            Self::Unwritten { .. } => None,
        }
    }

    /// The error which caused the fallback, if any.
    pub fn error(&self) -> Option<&CounterError> {
        match self {
            Self::Rendered { .. } => None,
            Self::Fallback { error } | Self::Unwritten { error, .. } => Some(error),
        }
    }
}

/// Updates the display target with the current view count.
#[derive(Debug)]
pub struct ViewCounterUpdater<S> {
    source: S,
    selector: String,
}

impl<S: ViewSource> ViewCounterUpdater<S> {
    pub fn new(source: S, selector: impl Into<String>) -> Self {
        Self {
            source,
            selector: selector.into(),
        }
    }

    /// Fetch the count and write it into the target, or write the fallback text.
    ///
    /// This never fails. Every error is logged and turned into the fallback text. A target
    /// without a matching element doesn't prevent the request, the write will fail afterwards.
    #[tracing::instrument(level = "debug", skip_all, fields(selector = %self.selector))]
    pub async fn update_counter<D: DisplayTarget>(&self, target: &mut D) -> Outcome {
        let located = target.locate(&self.selector);

        let result = self.source.fetch_views().await.and_then(|views| {
            located?;
            let text = views.text();
            target.write(&self.selector, &text)?;
            Ok(text)
        });

        match result {
            Ok(text) => {
                tracing::debug!("rendered '{text}'");
                Outcome::Rendered { text }
            }
            Err(error) => {
                tracing::error!("{}{}", ERROR, error.report());
                match target.write(&self.selector, FALLBACK_TEXT) {
                    Ok(()) => Outcome::Fallback { error },
                    Err(write_error) => {
                        tracing::error!(
                            "{}unable to render fallback text: {}",
                            ERROR,
                            write_error.report()
                        );
                        Outcome::Unwritten { error, write_error }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::common::html_rewrite::Document;
    use super::test_util::{serve, serve_incrementing, unused_endpoint, CapturedLogs};
    use axum::http::StatusCode;
    use std::sync::atomic::Ordering;
    use url::Url;

    const PAGE: &str = r#"<p>Thanks for visiting!</p><p class="counter-number">Loading...</p>"#;

    fn page() -> HtmlPage {
        HtmlPage::new("index.html", Document::new(PAGE))
    }

    fn rendered(page: &HtmlPage) -> String {
        let document = page.document().expect("page must have a document");
        String::from_utf8(document.as_ref().to_vec()).expect("must be utf-8")
    }

    async fn updater(endpoint: Url) -> ViewCounterUpdater<HttpSource> {
        let source = HttpSource::new(endpoint, &HttpOptions::default())
            .await
            .expect("client must build");
        ViewCounterUpdater::new(source, DEFAULT_SELECTOR)
    }

    #[tokio::test]
    async fn renders_views() {
        let endpoint = serve(StatusCode::OK, r#"{"views": 42}"#).await;
        let mut page = page();

        let outcome = updater(endpoint).await.update_counter(&mut page).await;

        assert_eq!(outcome.text(), Some("Views: 42"));
        assert!(outcome.error().is_none());
        assert!(rendered(&page).contains(r#"<p class="counter-number">Views: 42</p>"#));
    }

    #[tokio::test]
    async fn network_failure_renders_fallback() {
        let logs = CapturedLogs::default();
        let _guard = logs.install();

        let mut page = page();
        let outcome = updater(unused_endpoint().await)
            .await
            .update_counter(&mut page)
            .await;

        assert!(matches!(
            outcome,
            Outcome::Fallback {
                error: CounterError::Request { .. }
            }
        ));
        assert!(rendered(&page).contains(r#"<p class="counter-number">Couldn't read views</p>"#));
        assert_eq!(logs.errors(), 1);
    }

    #[tokio::test]
    async fn invalid_json_renders_fallback() {
        let endpoint = serve(StatusCode::OK, "views: 42").await;
        let mut page = page();

        let outcome = updater(endpoint).await.update_counter(&mut page).await;

        assert!(matches!(
            outcome,
            Outcome::Fallback {
                error: CounterError::Json(_)
            }
        ));
        assert_eq!(outcome.text(), Some(FALLBACK_TEXT));
    }

    #[tokio::test]
    async fn missing_views_renders_undefined() {
        let endpoint = serve(StatusCode::OK, "{}").await;
        let mut page = page();

        let outcome = updater(endpoint).await.update_counter(&mut page).await;

        assert_eq!(outcome.text(), Some("Views: undefined"));
    }

    #[tokio::test]
    async fn error_status_with_json_body_is_rendered() {
        let endpoint = serve(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error": "boom"}"#).await;
        let mut page = page();

        let outcome = updater(endpoint).await.update_counter(&mut page).await;

        assert_eq!(outcome.text(), Some("Views: undefined"));
    }

    #[tokio::test]
    async fn missing_element_still_requests_and_never_fails() {
        let logs = CapturedLogs::default();
        let _guard = logs.install();

        let (endpoint, requests) = serve_incrementing().await;
        let mut page = HtmlPage::new("index.html", Document::new("<p>no counter here</p>"));

        let outcome = updater(endpoint).await.update_counter(&mut page).await;

        assert_eq!(requests.load(Ordering::SeqCst), 1);
        assert!(matches!(
            outcome,
            Outcome::Unwritten {
                error: CounterError::TargetMissing { .. },
                write_error: CounterError::TargetMissing { .. },
            }
        ));
        assert_eq!(outcome.text(), None);
        assert_eq!(rendered(&page), "<p>no counter here</p>");
        assert_eq!(logs.errors(), 2);
    }

    #[tokio::test]
    async fn repeated_updates_show_latest_result() {
        let (endpoint, requests) = serve_incrementing().await;
        let updater = updater(endpoint).await;
        let mut page = page();

        updater.update_counter(&mut page).await;
        let outcome = updater.update_counter(&mut page).await;

        assert_eq!(requests.load(Ordering::SeqCst), 2);
        assert_eq!(outcome.text(), Some("Views: 2"));
        assert!(rendered(&page).contains(r#"<p class="counter-number">Views: 2</p>"#));
    }

    #[tokio::test]
    async fn custom_selector() {
        let endpoint = serve(StatusCode::OK, r#"{"views": "1,024"}"#).await;
        let source = HttpSource::new(endpoint, &HttpOptions::default())
            .await
            .expect("client must build");
        let updater = ViewCounterUpdater::new(source, "#views");
        let mut page = HtmlPage::new("index.html", Document::new(r#"<b id="views"></b>"#));

        updater.update_counter(&mut page).await;

        assert_eq!(rendered(&page), r#"<b id="views">Views: 1,024</b>"#);
    }
}
