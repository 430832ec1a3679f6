use serde::{Deserialize, Deserializer};

/// An issue as returned by the GitHub issues endpoint.
///
/// Only the fields the export needs are decoded; everything else in the
/// response is ignored. Missing or null `title`/`body` values are replaced
/// here so later stages never deal with absent text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Issue {
    /// Issue number (e.g., 42)
    pub number: u64,
    /// Issue title, "Untitled" when absent
    #[serde(default = "untitled", deserialize_with = "title_or_untitled")]
    pub title: String,
    /// Markdown body, empty when absent
    #[serde(default, deserialize_with = "body_or_empty")]
    pub body: String,
}

fn untitled() -> String {
    "Untitled".to_string()
}

fn title_or_untitled<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(untitled))
}

fn body_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
