use serde::{Deserialize, Serialize};

fn default_from_lang() -> String {
    "en".to_string()
}

fn default_to_lang() -> String {
    "th".to_string()
}

fn default_timeout_seconds() -> u64 {
    15
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslatorProvider {
    /// Public Google Translate web endpoint, no key needed
    #[default]
    Google,
    DeepL,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    pub provider: TranslatorProvider,
    #[serde(default = "default_from_lang")]
    pub from_lang: String,
    #[serde(default = "default_to_lang")]
    pub to_lang: String,
    #[serde(default)]
    pub api_key: String,
    /// Endpoint override, the provider default is used when unset
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            provider: TranslatorProvider::default(),
            from_lang: default_from_lang(),
            to_lang: default_to_lang(),
            api_key: String::new(),
            api_url: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}
