//! Gemini API連携
//!
//! generateContent を1回だけ呼ぶ。リトライ・タイムアウトはなし。
//! APIキーはURLクエリパラメータで渡す。

use super::ModelService;
use crate::config::Config;
use crate::error::{AnalyzerError, Result};
use crate::normalizer::DecodedImage;
use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Gemini APIリクエスト
#[derive(Debug, Serialize)]
pub(crate) struct GeminiRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

/// Gemini APIレスポンス
#[derive(Debug, Deserialize)]
pub(crate) struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default, rename = "promptFeedback")]
    prompt_feedback: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
    #[serde(default, rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiRequest {
    /// プロンプト（＋画像）からリクエストを組み立て
    pub(crate) fn new(prompt: &str, image: Option<&DecodedImage>) -> Self {
        let mut parts = vec![Part::Text {
            text: prompt.to_string(),
        }];

        if let Some(image) = image {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type().to_string(),
                    data: base64::engine::general_purpose::STANDARD.encode(image.bytes()),
                },
            });
        }

        Self {
            contents: vec![Content { parts }],
        }
    }
}

impl GeminiResponse {
    /// 先頭候補のテキストを連結して返す
    pub(crate) fn into_text(self) -> Result<String> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            let detail = self
                .prompt_feedback
                .map(|f| f.to_string())
                .unwrap_or_else(|| "candidates が空です".into());
            return Err(AnalyzerError::ApiParse(detail));
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AnalyzerError::ApiParse(format!(
                "応答テキストがありません (finishReason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }

        Ok(text)
    }
}

/// Gemini APIクライアント
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    config: Config,
}

impl GeminiClient {
    /// 設定から作成（APIキーが無ければMissingApiKey）
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            http: reqwest::Client::new(),
            api_key: config.api_key()?.to_string(),
            config: config.clone(),
        })
    }

    pub fn model_for(&self, has_image: bool) -> &str {
        self.config.model_for(has_image)
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }
}

#[async_trait]
impl ModelService for GeminiClient {
    async fn generate(&self, prompt: &str, image: Option<&DecodedImage>) -> Result<String> {
        let model = self.model_for(image.is_some());
        let request = GeminiRequest::new(prompt, image);

        log::info!("Gemini: model={} image={}", model, image.is_some());
        let start = std::time::Instant::now();

        let response = self
            .http
            .post(self.endpoint(model))
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| AnalyzerError::ApiCall(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalyzerError::ApiCall(format!(
                "Gemini API returned {}: {}",
                status, body
            )));
        }

        let payload: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AnalyzerError::ApiParse(e.without_url().to_string()))?;

        log::debug!("Gemini: {}ms", start.elapsed().as_millis());
        payload.into_text()
    }
}
