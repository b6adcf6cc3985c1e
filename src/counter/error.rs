use std::path::PathBuf;

/// Everything that can go wrong while updating the counter.
///
/// The updater does not distinguish between these when deciding what to render; they all end up
/// in the fallback branch. The variants exist for the diagnostic log.
#[derive(Debug, thiserror::Error)]
pub enum CounterError {
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("endpoint responded with status {status}")]
    Status { status: reqwest::StatusCode },
    #[error("failed reading the response body")]
    Body(#[source] reqwest::Error),
    #[error("response body is not valid JSON")]
    Json(#[from] serde_json::Error),
    #[error("cannot read property 'views' of a null response")]
    NullBody,
    #[error("no element matches '{selector}'")]
    TargetMissing { selector: String },
    #[error("failed rewriting the page")]
    Rewrite(#[from] crate::common::html_rewrite::RewriteError),
    #[error("failed writing to the console")]
    Console(#[source] std::io::Error),
    #[error("unable to read page '{}'", path.display())]
    PageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CounterError {
    /// The error, followed by all of its causes.
    pub fn report(&self) -> String {
        let mut report = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            report.push_str(": ");
            report.push_str(&cause.to_string());
            source = cause.source();
        }
        report
    }
}
