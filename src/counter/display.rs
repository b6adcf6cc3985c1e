//! Where the rendered text ends up.

use super::CounterError;
use crate::common::html_rewrite::Document;
use anyhow::Context;
use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

/// The element displaying the counter.
pub trait DisplayTarget {
    /// Resolve the element, failing if nothing matches the selector.
    fn locate(&mut self, selector: &str) -> Result<(), CounterError>;

    /// Replace the content of the element with the text.
    fn write(&mut self, selector: &str, text: &str) -> Result<(), CounterError>;
}

/// An HTML page on disk.
///
/// The document is read once, rewritten in memory, and only written back when calling
/// [`HtmlPage::persist`].
#[derive(Debug)]
pub struct HtmlPage {
    path: PathBuf,
    document: Option<Document>,
    read_error: Option<io::Error>,
}

impl HtmlPage {
    /// Read the page. A page which can't be read has no elements.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match tokio::fs::read(&path).await {
            Ok(data) => Self::new(path, Document::new(data)),
            Err(err) => Self {
                path,
                document: None,
                read_error: Some(err),
            },
        }
    }

    pub fn new(path: impl Into<PathBuf>, document: Document) -> Self {
        Self {
            path: path.into(),
            document: Some(document),
            read_error: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(test)]
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Write the current state of the document to `output`.
    ///
    /// Returns `false` if there was no document to write, as it couldn't be read in the first place.
    pub async fn persist(&self, output: &Path) -> anyhow::Result<bool> {
        let Some(document) = &self.document else {
            return Ok(false);
        };

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("error creating directory '{}'", parent.display()))?;
        }
        tokio::fs::write(output, document.as_ref())
            .await
            .with_context(|| format!("error writing page '{}'", output.display()))?;

        Ok(true)
    }

    fn missing(selector: &str) -> CounterError {
        CounterError::TargetMissing {
            selector: selector.to_string(),
        }
    }
}

impl DisplayTarget for HtmlPage {
    fn locate(&mut self, selector: &str) -> Result<(), CounterError> {
        if let Some(source) = self.read_error.take() {
            return Err(CounterError::PageRead {
                path: self.path.clone(),
                source,
            });
        }

        let document = self.document.as_ref().ok_or_else(|| Self::missing(selector))?;
        match document.len(selector)? {
            0 => Err(Self::missing(selector)),
            _ => Ok(()),
        }
    }

    fn write(&mut self, selector: &str, text: &str) -> Result<(), CounterError> {
        let document = self.document.as_mut().ok_or_else(|| Self::missing(selector))?;
        match document.set_text(selector, text)? {
            true => Ok(()),
            false => Err(Self::missing(selector)),
        }
    }
}

/// Prints the text, one line per write.
#[derive(Debug)]
pub struct Console<W = io::Stdout> {
    out: W,
}

impl Console {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplayTarget for Console<W> {
    fn locate(&mut self, _selector: &str) -> Result<(), CounterError> {
        Ok(())
    }

    fn write(&mut self, _selector: &str, text: &str) -> Result<(), CounterError> {
        writeln!(self.out, "{text}").map_err(CounterError::Console)
    }
}
