//! テキスト入力

use crate::error::{AnalyzerError, Result};

/// 入力欄のテキストをそのまま返す（空ならMissingInput）
pub fn normalize_text(text: String) -> Result<String> {
    if text.is_empty() {
        return Err(AnalyzerError::MissingInput);
    }
    Ok(text)
}

/// .txtファイルをUTF-8としてそのまま読む
pub fn decode_text_file(bytes: Vec<u8>) -> Result<String> {
    Ok(String::from_utf8(bytes)?)
}
