//! 入力正規化モジュール
//!
//! 4種類の入力をプロンプトに差し込むテキスト、または
//! プロンプトと一緒に送るデコード済み画像に変換する。

mod image_input;
pub mod pdf;
mod text;

pub use image_input::{decode_image, DecodedImage};
pub use pdf::{extract_pdf_text, PdfText};
pub use text::{decode_text_file, normalize_text};

use crate::error::{AnalyzerError, Result};
use error_analyzer_common::{AnalysisRequest, Modality};
use std::path::Path;

/// 正規化済みの入力
#[derive(Debug, Clone)]
pub enum NormalizedInput {
    /// プロンプトに差し込むテキスト
    Text(String),
    /// プロンプトと別に送る画像
    Image(DecodedImage),
}

impl NormalizedInput {
    pub fn image(&self) -> Option<&DecodedImage> {
        match self {
            NormalizedInput::Image(image) => Some(image),
            NormalizedInput::Text(_) => None,
        }
    }
}

/// リクエストを正規化
///
/// 空文字のテキストはMissingInputで弾く（モデルは呼ばない）。
/// 0バイトのファイルは通常どおりデコードに回す
pub fn normalize(request: AnalysisRequest) -> Result<NormalizedInput> {
    if request.is_empty() {
        return Err(AnalyzerError::MissingInput);
    }

    match request {
        AnalysisRequest::Text(text) => Ok(NormalizedInput::Text(normalize_text(text)?)),
        AnalysisRequest::Image(bytes) => Ok(NormalizedInput::Image(decode_image(bytes)?)),
        AnalysisRequest::Pdf(bytes) => {
            let pdf = extract_pdf_text(&bytes)?;
            if !pdf.failed_pages.is_empty() {
                log::warn!("テキスト抽出できなかったページ: {:?}", pdf.failed_pages);
            }
            Ok(NormalizedInput::Text(pdf.text))
        }
        AnalysisRequest::TextFile(bytes) => Ok(NormalizedInput::Text(decode_text_file(bytes)?)),
    }
}

/// ファイルからリクエストを作成
///
/// 拡張子が入力種別に合わないファイルは読み込まない
pub fn load_request(modality: Modality, path: &Path) -> Result<AnalysisRequest> {
    let into_request: fn(Vec<u8>) -> AnalysisRequest = match modality {
        Modality::Image => AnalysisRequest::Image,
        Modality::Pdf => AnalysisRequest::Pdf,
        Modality::TextFile => AnalysisRequest::TextFile,
        Modality::Text => return Err(AnalyzerError::NotFileInput(modality.to_string())),
    };

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_default();

    if !modality.accepts_extension(&ext) {
        return Err(AnalyzerError::UnsupportedFileType {
            modality: modality.label().to_string(),
            path: path.display().to_string(),
            accepted: modality.accepted_extensions().join(", "),
        });
    }

    if !path.is_file() {
        return Err(AnalyzerError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    log::debug!("読み込み: {} ({} bytes)", path.display(), bytes.len());

    Ok(into_request(bytes))
}
