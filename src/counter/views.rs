use serde_json::Value;
use std::fmt::{self, Display, Formatter};

/// The raw `views` value of a counter response.
///
/// No validation happens here: whatever the endpoint put into the field is kept, including
/// nothing at all. Rendering follows how a browser stringifies the value into page text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewCount(Option<Value>);

impl ViewCount {
    /// Extract the count from a parsed response body.
    ///
    /// Returns `None` for a `null` body, as there is no object to read the field from.
    pub fn from_body(body: Value) -> Option<Self> {
        match body {
            Value::Null => None,
            Value::Object(mut map) => Some(Self(map.remove("views"))),
            // primitives and arrays don't carry a `views` property
            _ => Some(Self(None)),
        }
    }

    pub fn value(&self) -> Option<&Value> {
        self.0.as_ref()
    }

    /// The text shown in the display target.
    pub fn text(&self) -> String {
        format!("Views: {self}")
    }
}

impl Display for ViewCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.0 {
            None => f.write_str("undefined"),
            Some(value) => write_value(f, value),
        }
    }
}

fn write_value(f: &mut Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Null => f.write_str("null"),
        Value::Bool(b) => write!(f, "{b}"),
        // every number is a double in a browser, large integers get rounded too
        Value::Number(n) => match n.as_f64() {
            Some(float) => f.write_str(ryu_js::Buffer::new().format(float)),
            None => write!(f, "{n}"),
        },
        Value::String(s) => f.write_str(s),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                // null and undefined elements render as empty
                if !item.is_null() {
                    write_value(f, item)?;
                }
            }
            Ok(())
        }
        Value::Object(_) => f.write_str("[object Object]"),
    }
}
