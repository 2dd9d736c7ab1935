use serde::{Deserialize, Serialize};

pub const EVENT_TYPE_MINT: &str = "mint";

pub const ATTRIBUTE_KEY_BONDED_RATIO: &str = "bonded_ratio";
pub const ATTRIBUTE_KEY_INFLATION: &str = "inflation";
pub const ATTRIBUTE_KEY_ANNUAL_PROVISIONS: &str = "annual_provisions";
pub const ATTRIBUTE_KEY_AMOUNT: &str = "amount";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

/// Typed event emitted during block processing, in attribute order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub kind: String,
    pub attributes: Vec<Attribute>,
}

impl Event {
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: &str, value: impl ToString) -> Self {
        self.attributes.push(Attribute {
            key: key.to_string(),
            value: value.to_string(),
        });
        self
    }

    /// First value recorded under `key`.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }
}
