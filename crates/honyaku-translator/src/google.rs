use std::time::Duration;

use async_trait::async_trait;

use crate::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator, http_client};

const DEFAULT_API_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// Google Translate through the keyless web endpoint
#[derive(Clone)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    api_url: String,
}

impl GoogleTranslator {
    pub fn new(api_url: Option<String>, timeout: Duration) -> Result<Self, TranslateError> {
        Ok(Self {
            client: http_client(timeout)?,
            api_url: api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        })
    }
}

/// The endpoint answers with nested arrays; the first element lists
/// `[translated, original, ...]` segments, one per sentence.
fn parse_segments(json: &serde_json::Value) -> Result<String, TranslateError> {
    let segments = json
        .get(0)
        .and_then(|s| s.as_array())
        .ok_or_else(|| TranslateError::ApiError("No translation in response".to_string()))?;

    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(|t| t.as_str()))
        .collect();

    if text.trim().is_empty() {
        return Err(TranslateError::ApiError("Empty translation".to_string()));
    }

    Ok(text.trim().to_string())
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        let params = [
            ("client", "gtx"),
            ("sl", from.as_str()),
            ("tl", to.as_str()),
            ("dt", "t"),
            ("q", text),
        ];

        let response = self.client.get(&self.api_url).query(&params).send().await?;

        if response.status() == 429 {
            return Err(TranslateError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            return Err(TranslateError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            TranslateError::ApiError(format!("Failed to parse response: {}", e))
        })?;

        let translated = parse_segments(&json)?;
        tracing::debug!("google: {} -> {} chars", text.len(), translated.len());

        Ok(Translation {
            text: translated,
            from,
            to,
            provider: "google".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Google Translate".to_string(),
            requires_api_key: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_joins_sentence_segments() {
        let body = json!([
            [
                ["สวัสดี ", "Hello ", null, null, 10],
                ["โลก", "world", null, null, 10]
            ],
            null,
            "en"
        ]);
        assert_eq!(parse_segments(&body).unwrap(), "สวัสดี โลก");
    }

    #[test]
    fn test_rejects_unexpected_shape() {
        assert!(parse_segments(&json!({ "error": "nope" })).is_err());
        assert!(parse_segments(&json!([[]])).is_err());
    }
}
