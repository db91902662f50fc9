//! Normalization of sentiment responses.

use super::lexicon::score;
use crate::json::{scalar_string, string_field};
use quarry_traits::{
    DataType, Processor, RawResponse, Result, SentimentItem, SentimentRecord,
};
use serde_json::Value;

/// Scores each post or article and collects them into a [`SentimentRecord`].
///
/// Posts are read from `data` (`id`, `text`, `created_at`, `public_metrics`).
/// When `data` is absent, NewsAPI-style `articles` are used instead, scoring
/// the title and description together.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentProcessor;

fn post(item: &Value) -> SentimentItem {
    let text = string_field(item, "text").unwrap_or_default();
    SentimentItem {
        id: item.get("id").and_then(scalar_string),
        sentiment: score(&text),
        text,
        created_at: string_field(item, "created_at").unwrap_or_default(),
        metrics: item.get("public_metrics").filter(|m| !m.is_null()).cloned(),
    }
}

fn article(item: &Value) -> SentimentItem {
    let text = ["title", "description"]
        .iter()
        .filter_map(|key| string_field(item, key))
        .filter(|s| !s.trim().is_empty())
        .collect::<Vec<_>>()
        .join(". ");
    SentimentItem {
        id: string_field(item, "url"),
        sentiment: score(&text),
        text,
        created_at: string_field(item, "publishedAt").unwrap_or_default(),
        metrics: None,
    }
}

impl SentimentProcessor {
    fn items(raw: &RawResponse) -> Vec<SentimentItem> {
        if let Some(data) = raw.get("data").and_then(Value::as_array) {
            return data.iter().map(post).collect();
        }
        raw.get("articles")
            .and_then(Value::as_array)
            .map(|articles| articles.iter().map(article).collect())
            .unwrap_or_default()
    }
}

impl Processor for SentimentProcessor {
    type Record = SentimentRecord;

    fn name(&self) -> &str {
        DataType::Sentiment.as_str()
    }

    fn process(&self, raw: &RawResponse) -> Result<SentimentRecord> {
        let record = SentimentRecord {
            source: string_field(raw, "source").unwrap_or_else(|| "unknown".to_string()),
            query: string_field(raw, "query").unwrap_or_default(),
            items: Self::items(raw),
        };
        self.validate(&record)?;
        Ok(record)
    }

    fn required_fields(&self) -> &[&str] {
        DataType::Sentiment.required_fields()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    #[test]
    fn test_scores_posts() {
        let raw = json!({
            "source": "twitter",
            "query": "oil",
            "data": [
                {"id": "1", "text": "bullish growth ahead", "created_at": "2024-01-01T00:00:00Z",
                 "public_metrics": {"like_count": 3}},
                {"id": 2, "text": "bearish decline now"},
                {"text": "nothing to see"}
            ]
        });

        let record = SentimentProcessor.process(&raw).unwrap();
        assert_eq!(record.source, "twitter");
        assert_eq!(record.query, "oil");
        assert_eq!(record.items.len(), 3);

        assert_eq!(record.items[0].id.as_deref(), Some("1"));
        assert_relative_eq!(record.items[0].sentiment, 1.0);
        assert_eq!(record.items[0].metrics, Some(json!({"like_count": 3})));

        assert_eq!(record.items[1].id.as_deref(), Some("2"));
        assert_relative_eq!(record.items[1].sentiment, -1.0);
        assert_eq!(record.items[1].created_at, "");
        assert!(record.items[1].metrics.is_none());

        assert!(record.items[2].id.is_none());
        assert_relative_eq!(record.items[2].sentiment, 0.0);
    }

    #[test]
    fn test_articles_fallback() {
        let raw = json!({
            "source": "newsapi",
            "articles": [{
                "title": "Profit warning",
                "description": "Shares drop after loss",
                "publishedAt": "2024-02-02T10:00:00Z",
                "url": "https://news.example/a"
            }]
        });

        let record = SentimentProcessor.process(&raw).unwrap();
        let item = &record.items[0];
        assert_eq!(item.text, "Profit warning. Shares drop after loss");
        assert_eq!(item.created_at, "2024-02-02T10:00:00Z");
        assert_eq!(item.id.as_deref(), Some("https://news.example/a"));
        assert_relative_eq!(item.sentiment, -1.0 / 3.0);
    }

    #[test]
    fn test_no_items_is_empty_not_error() {
        let record = SentimentProcessor.process(&json!({"source": "twitter"})).unwrap();
        assert!(record.items.is_empty());
        assert_eq!(record.query, "");
    }

    #[test]
    fn test_unannotated_source_is_unknown() {
        let record = SentimentProcessor.process(&json!({"data": []})).unwrap();
        assert_eq!(record.source, "unknown");
    }
}
