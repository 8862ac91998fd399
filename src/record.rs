// src/record.rs
// =============================================================================
// Records produced by a crawl.
//
// - Extraction: what the page extractor hands back (Complete or Empty)
// - StatuteRecord: the persisted JSON shape, with nullable title/text
// - CollectionEntry: the {url} written for chapter and part pages
//
// A StatuteRecord can only be built from an Extraction, so title and text
// are either both set or both null.
// =============================================================================

use serde::Serialize;

/// A fully extracted statute section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statute {
    pub id: String,
    pub url: String,
    pub title: String,
    pub text: String,
}

/// Outcome of extracting one leaf page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Complete(Statute),
    /// No title inside the content container; only the identity is known.
    Empty { id: String, url: String },
}

impl Extraction {
    pub fn id(&self) -> &str {
        match self {
            Extraction::Complete(statute) => &statute.id,
            Extraction::Empty { id, .. } => id,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Extraction::Complete(statute) => &statute.url,
            Extraction::Empty { url, .. } => url,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Extraction::Complete(_))
    }
}

/// Row in the default dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatuteRecord {
    id: String,
    /// Final URL of the page the record was extracted from
    url: String,
    title: Option<String>,
    /// Section content
    text: Option<String>,
}

impl From<Extraction> for StatuteRecord {
    fn from(extraction: Extraction) -> Self {
        match extraction {
            Extraction::Complete(Statute { id, url, title, text }) => StatuteRecord {
                id,
                url,
                title: Some(title),
                text: Some(text),
            },
            Extraction::Empty { id, url } => StatuteRecord {
                id,
                url,
                title: None,
                text: None,
            },
        }
    }
}

/// Row in the "chapters" and "parts" datasets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionEntry {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_extraction_serializes_nulls() {
        let record = StatuteRecord::from(Extraction::Empty {
            id: "175.10".into(),
            url: "https://www.nysenate.gov/legislation/laws/PEN/175.10".into(),
        });
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "175.10",
                "url": "https://www.nysenate.gov/legislation/laws/PEN/175.10",
                "title": null,
                "text": null,
            })
        );
    }

    #[test]
    fn test_complete_extraction_keeps_both_fields() {
        let record = StatuteRecord::from(Extraction::Complete(Statute {
            id: "1.01".into(),
            url: "https://www.revisor.mn.gov/statutes/cite/1.01".into(),
            title: "1.01 DEFINITIONS".into(),
            text: "a\nb".into(),
        }));
        assert_eq!(record.title.as_deref(), Some("1.01 DEFINITIONS"));
        assert_eq!(record.text.as_deref(), Some("a\nb"));
    }

    #[test]
    fn test_collection_entry_shape() {
        let entry = CollectionEntry { url: "https://www.revisor.mn.gov/statutes/part/100".into() };
        assert_eq!(
            serde_json::to_string(&entry).unwrap(),
            r#"{"url":"https://www.revisor.mn.gov/statutes/part/100"}"#
        );
    }
}
