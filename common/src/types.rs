//! 入力の型定義
//!
//! - Modality: 入力の種類（テキスト / 画像 / PDF / テキストファイル）
//! - AnalysisRequest: 1回の解析で送信される入力（種類ごとにペイロードを保持）

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// 入力の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modality {
    Text,
    Image,
    Pdf,
    TextFile,
}

impl Modality {
    /// 選択肢の表示順
    pub const ALL: [Modality; 4] = [
        Modality::Text,
        Modality::Image,
        Modality::Pdf,
        Modality::TextFile,
    ];

    /// 入力種別の表示名
    pub fn label(&self) -> &'static str {
        match self {
            Modality::Text => "Text",
            Modality::Image => "Image",
            Modality::Pdf => "PDF",
            Modality::TextFile => "Text File (.txt)",
        }
    }

    /// アップロード可能な拡張子（テキストは空）
    pub fn accepted_extensions(&self) -> &'static [&'static str] {
        match self {
            Modality::Text => &[],
            Modality::Image => &["png", "jpg", "jpeg"],
            Modality::Pdf => &["pdf"],
            Modality::TextFile => &["txt"],
        }
    }

    /// 拡張子チェック（大文字小文字を区別しない）
    pub fn accepts_extension(&self, ext: &str) -> bool {
        let ext = ext.to_ascii_lowercase();
        self.accepted_extensions().iter().any(|&e| e == ext)
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Modality {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(Modality::Text),
            "image" => Ok(Modality::Image),
            "pdf" => Ok(Modality::Pdf),
            "text file" | "text file (.txt)" | "text-file" | "txt" => Ok(Modality::TextFile),
            _ => Err(Error::UnknownModality(s.to_string())),
        }
    }
}

/// 1回の解析リクエスト
///
/// 常に1種類の入力だけを持つ。送信ごとに生成し、モデル呼び出し後に破棄する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisRequest {
    /// 入力欄に貼り付けたエラーメッセージ
    Text(String),
    /// PNG/JPEGのバイト列
    Image(Vec<u8>),
    /// PDFのバイト列
    Pdf(Vec<u8>),
    /// .txtファイルのバイト列
    TextFile(Vec<u8>),
}

impl AnalysisRequest {
    pub fn modality(&self) -> Modality {
        match self {
            AnalysisRequest::Text(_) => Modality::Text,
            AnalysisRequest::Image(_) => Modality::Image,
            AnalysisRequest::Pdf(_) => Modality::Pdf,
            AnalysisRequest::TextFile(_) => Modality::TextFile,
        }
    }

    /// 入力が無いとみなすか
    ///
    /// 空文字のテキストのみ。添付されたファイルは0バイトでも入力として扱う
    pub fn is_empty(&self) -> bool {
        matches!(self, AnalysisRequest::Text(text) if text.is_empty())
    }
}
