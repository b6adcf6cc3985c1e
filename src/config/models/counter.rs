use crate::config::models::ConfigModel;
use serde::Deserialize;
use url::Url;

/// Config options for fetching and rendering the counter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Counter {
    /// The endpoint returning the view count [default: the public counter endpoint]
    #[serde(default, alias = "lambda_url", alias = "LAMBDA_URL")]
    pub endpoint: Option<Url>,

    /// The selector of the element displaying the count [default: .counter-number]
    #[serde(default)]
    pub selector: Option<String>,
}

impl ConfigModel for Counter {}
