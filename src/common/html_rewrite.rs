use lol_html::{
    element,
    errors::{RewritingError, SelectorError},
    html_content::{ContentType, Element},
    HtmlRewriter, Selector, Settings,
};

#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    #[error("invalid selector '{selector}'")]
    Selector {
        selector: String,
        #[source]
        source: SelectorError,
    },
    #[error(transparent)]
    Rewriting(#[from] RewritingError),
}

/// Check that a selector can be used for rewriting.
///
/// `lol_html` panics on selectors it cannot parse, so every selector passes through here first.
pub fn parse_selector(selector: &str) -> Result<Selector, RewriteError> {
    selector
        .parse::<Selector>()
        .map_err(|source| RewriteError::Selector {
            selector: selector.to_string(),
            source,
        })
}

/// A wrapper for Html modifications, and rewrites.
#[derive(Clone, Debug)]
pub struct Document(Vec<u8>);

impl AsRef<[u8]> for Document {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Document {
    /// Create a new document
    ///
    /// Note: if this is not a valid HTML document, it will fail later on.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self(data.into())
    }

    #[inline]
    fn default_settings() -> Settings<'static, 'static> {
        Settings {
            ..Settings::default()
        }
    }

    /// Run a mutating handler for the provided selector.
    ///
    /// The content of the document will be replaced with the output of the operation.
    pub fn select_mut(
        &mut self,
        selector: &str,
        mut call: impl FnMut(&mut Element<'_, '_>),
    ) -> Result<(), RewriteError> {
        parse_selector(selector)?;

        let mut buf = Vec::with_capacity(self.0.len());
        let mut rewriter = HtmlRewriter::new(
            Settings {
                element_content_handlers: vec![element!(selector, |el| {
                    call(el);
                    Ok(())
                })],
                ..Self::default_settings()
            },
            |out: &[u8]| buf.extend_from_slice(out),
        );
        rewriter.write(self.0.as_slice())?;
        rewriter.end()?;

        self.0 = buf;

        Ok(())
    }

    /// Run a non-mutating handler for the provided selector
    ///
    /// To perform modifications on the `Document` use `Document::select_mut`.
    pub fn select(
        &self,
        selector: &str,
        mut call: impl FnMut(&Element<'_, '_>),
    ) -> Result<(), RewriteError> {
        parse_selector(selector)?;

        let mut rewriter = HtmlRewriter::new(
            Settings {
                element_content_handlers: vec![element!(selector, |el| {
                    call(el);
                    Ok(())
                })],
                ..Self::default_settings()
            },
            |_: &[u8]| {},
        );
        rewriter.write(self.0.as_slice())?;
        rewriter.end()?;

        Ok(())
    }

    /// Replace the content of the first element matching the selector with text.
    ///
    /// Returns `false` if nothing matched, leaving the document untouched.
    pub fn set_text(&mut self, selector: &str, text: &str) -> Result<bool, RewriteError> {
        if self.len(selector)? == 0 {
            return Ok(false);
        }

        let mut found = false;
        self.select_mut(selector, |el| {
            if !found {
                el.set_inner_content(text, ContentType::Text);
                found = true;
            }
        })?;

        Ok(found)
    }

    pub fn len(&self, selector: &str) -> Result<usize, RewriteError> {
        let mut len = 0;
        self.select(selector, |_| len += 1)?;

        Ok(len)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const PAGE: &str = r#"
<html>
    <body>
        <p class="counter"><span class="counter-number">Loading</span></p>
        <span class="counter-number">second</span>
    </body>
</html>
"#;

    #[test]
    fn counts_matches() {
        let doc = Document::new(PAGE);
        assert_eq!(doc.len(".counter-number").expect("must count"), 2);
        assert_eq!(doc.len(".missing").expect("must count"), 0);
    }

    #[test]
    fn sets_first_match_only() {
        let mut doc = Document::new(PAGE);
        assert!(doc.set_text(".counter-number", "Views: 3").expect("must rewrite"));

        let html = String::from_utf8(doc.as_ref().to_vec()).expect("must be utf-8");
        assert!(html.contains(r#"<span class="counter-number">Views: 3</span>"#));
        assert!(html.contains(r#"<span class="counter-number">second</span>"#));
        assert!(!html.contains("Loading"));
    }

    #[test]
    fn escapes_text() {
        let mut doc = Document::new(PAGE);
        doc.set_text(".counter-number", "<b>1</b>")
            .expect("must rewrite");

        let html = String::from_utf8(doc.as_ref().to_vec()).expect("must be utf-8");
        assert!(html.contains("&lt;b&gt;1&lt;/b&gt;"));
    }

    #[test]
    fn missing_match_leaves_document() {
        let mut doc = Document::new(PAGE);
        assert!(!doc.set_text(".missing", "Views: 3").expect("must rewrite"));
        assert_eq!(doc.as_ref(), PAGE.as_bytes());
    }

    #[test]
    fn rejects_invalid_selector() {
        let doc = Document::new(PAGE);
        assert!(matches!(
            doc.len("<<"),
            Err(RewriteError::Selector { .. })
        ));
    }
}
