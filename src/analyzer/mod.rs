//! エラー解析フロー
//!
//! 正規化 → プロンプト生成 → モデル呼び出し → 応答分類 を1回だけ実行する。
//! 4種類の入力はすべて同じ流れを通る。

mod gemini;
mod types;

pub use gemini::GeminiClient;
pub use types::Analysis;

use crate::error::Result;
use crate::normalizer::{self, DecodedImage, NormalizedInput};
use async_trait::async_trait;
use error_analyzer_common::{build_prompt, classify_response, AnalysisRequest, IMAGE_PLACEHOLDER};

/// テキスト生成モデル
///
/// プロンプト1つ（＋画像1枚）を受け取り、応答テキストを1つ返す
#[async_trait]
pub trait ModelService: Send + Sync {
    async fn generate(&self, prompt: &str, image: Option<&DecodedImage>) -> Result<String>;
}

/// 正規化済み入力からプロンプトを生成
///
/// 画像はプロンプトに埋め込まず、固定文を差し込む
pub fn prompt_for(input: &NormalizedInput) -> String {
    match input {
        NormalizedInput::Text(text) => build_prompt(text),
        NormalizedInput::Image(_) => build_prompt(IMAGE_PLACEHOLDER),
    }
}

/// 1回の解析を実行
///
/// 入力が空ならモデルを呼ばずにMissingInputを返す。
/// モデル呼び出しの失敗・デコード失敗はそのまま返す（リトライなし）。
pub async fn analyze<M>(model: &M, request: AnalysisRequest) -> Result<Analysis>
where
    M: ModelService + ?Sized,
{
    let modality = request.modality();
    log::debug!("入力種別: {}", modality);

    let input = normalizer::normalize(request)?;
    let prompt = prompt_for(&input);
    log::debug!("プロンプト長: {} chars", prompt.len());

    let reply = model.generate(&prompt, input.image()).await?;
    log::debug!("レスポンス長: {} chars", reply.len());

    let response = classify_response(&reply);
    log::info!("応答: {}", response.tag());

    Ok(Analysis { modality, response })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyzerError;
    use std::sync::Mutex;

    /// 呼び出し内容を記録するモック
    struct RecordingModel {
        reply: String,
        calls: Mutex<Vec<(String, bool)>>,
    }

    impl RecordingModel {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ModelService for RecordingModel {
        async fn generate(&self, prompt: &str, image: Option<&DecodedImage>) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((prompt.to_string(), image.is_some()));
            Ok(self.reply.clone())
        }
    }

    #[test]
    fn test_prompt_for_text() {
        let prompt = prompt_for(&NormalizedInput::Text("ECONNREFUSED 127.0.0.1:5432".into()));
        assert!(prompt.contains("ECONNREFUSED 127.0.0.1:5432"));
    }

    #[tokio::test]
    async fn test_analyze_text_structured() {
        let model = RecordingModel::new(r#"{"Error Type": "ConnectionError"}"#);
        let analysis = analyze(&model, AnalysisRequest::Text("ECONNREFUSED".into()))
            .await
            .unwrap();

        assert!(analysis.response.is_structured());
        let calls = model.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].0.contains("ECONNREFUSED"));
        assert!(!calls[0].1);
    }

    #[tokio::test]
    async fn test_analyze_empty_text_skips_model() {
        let model = RecordingModel::new("unused");
        let result = analyze(&model, AnalysisRequest::Text(String::new())).await;

        assert!(matches!(result, Err(AnalyzerError::MissingInput)));
        assert!(model.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_decode_failure_skips_model() {
        let model = RecordingModel::new("unused");
        let result = analyze(&model, AnalysisRequest::Image(b"not an image".to_vec())).await;

        assert!(matches!(result, Err(AnalyzerError::ImageDecode(_))));
        assert!(model.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_works_with_trait_object() {
        let model: Box<dyn ModelService> = Box::new(RecordingModel::new("plain answer"));
        let analysis = analyze(model.as_ref(), AnalysisRequest::TextFile(b"log".to_vec()))
            .await
            .unwrap();
        assert_eq!(analysis.response.tag(), "free-text");
    }
}
