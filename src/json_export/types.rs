use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::str::FromStr;

/// What a JSON export contains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JsonScope {
    /// The component tree only
    Tree,
    /// The per-level tables only
    Levels,
    All,
}

impl FromStr for JsonScope {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "t" | "tree" => Ok(JsonScope::Tree),
            "l" | "levels" => Ok(JsonScope::Levels),
            "a" | "all" => Ok(JsonScope::All),
            _ => Err(()),
        }
    }
}

pub type OrderedRecords = Vec<IndexMap<String, Value>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonItem {
    pub value: Value,
    pub material: String,
    pub shape: String,
    pub dimension: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonColumn {
    pub name: String,
    pub level: u8,
    pub level_name: String,
    pub items: Vec<JsonItem>,
    pub children: Vec<JsonColumn>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonSummary {
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<JsonColumn>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub levels: Option<IndexMap<String, OrderedRecords>>,
}
