use std::time::Duration;

use async_trait::async_trait;

use crate::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator, http_client};

const DEFAULT_API_URL: &str = "https://api-free.deepl.com/v2/translate";

#[derive(Clone)]
pub struct DeepLTranslator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl DeepLTranslator {
    pub fn new(
        api_key: String,
        api_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self, TranslateError> {
        Ok(Self {
            client: http_client(timeout)?,
            api_key,
            api_url: api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        })
    }
}

#[async_trait]
impl Translator for DeepLTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        if self.api_key.is_empty() {
            return Err(TranslateError::AuthenticationError);
        }

        let params = [
            ("text", text),
            ("source_lang", &from.to_uppercase()),
            ("target_lang", &to.to_uppercase()),
        ];

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(&params)
            .send()
            .await?;

        if response.status() == 429 {
            return Err(TranslateError::RateLimitExceeded);
        }

        if response.status() == 403 {
            return Err(TranslateError::AuthenticationError);
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

        let translated_text = json["translations"]
            .get(0)
            .and_then(|t| t["text"].as_str())
            .ok_or_else(|| TranslateError::ApiError("No translation in response".to_string()))?;

        Ok(Translation {
            text: translated_text.trim().to_string(),
            from,
            to,
            provider: "deepl".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "DeepL".to_string(),
            requires_api_key: true,
        }
    }
}
