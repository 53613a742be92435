use crate::model::id::{ResourceId, UserId};
use chrono::{DateTime, Utc};

pub mod event;

#[derive(Debug, Clone)]
pub struct Resource {
    pub id: ResourceId,
    pub title: String,
    pub description: String,
    pub resource_type: String,
    pub category: String,
    pub tags: Vec<String>,
    pub url: String,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ResourceListFilter {
    pub category: Option<String>,
    pub resource_type: Option<String>,
    pub tag: Option<String>,
}

/// Trims every tag, drops empty ones and keeps the first occurrence of each.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_trimmed_and_deduplicated() {
        let tags = normalize_tags(["rust ", " rust", "", "web", "  "]);
        assert_eq!(tags, vec!["rust".to_string(), "web".to_string()]);
    }
}
