//! PDFテキスト抽出
//!
//! ページ順に抽出し、区切りなしで連結する。
//! 抽出に失敗したページは空文字として扱い、ページ番号を記録する。
//! OCRやページ数制限はなし。

use crate::error::{AnalyzerError, Result};
use lopdf::Document;

/// PDF抽出結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdfText {
    /// 全ページの連結テキスト
    pub text: String,
    /// 抽出に失敗したページ番号（1始まり）
    pub failed_pages: Vec<u32>,
}

/// PDFのバイト列から全ページのテキストを抽出
pub fn extract_pdf_text(bytes: &[u8]) -> Result<PdfText> {
    let doc = Document::load_mem(bytes).map_err(|e| AnalyzerError::PdfDecode(e.to_string()))?;

    let page_numbers: Vec<u32> = doc.get_pages().into_keys().collect();
    log::debug!("PDFページ数: {}", page_numbers.len());

    let pages = page_numbers.into_iter().map(|number| {
        let text = doc
            .extract_text(&[number])
            .map(strip_block_break)
            .map_err(|e| e.to_string());
        (number, text)
    });

    Ok(join_pages(pages))
}

/// lopdfはテキストブロック（ET）ごとに改行を付けるので、ページ末尾の1つを外す
fn strip_block_break(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
    }
    text
}

/// ページごとの抽出結果を連結
///
/// 入力順をそのまま保つ。失敗ページは何も追加しない。
pub fn join_pages<I>(pages: I) -> PdfText
where
    I: IntoIterator<Item = (u32, std::result::Result<String, String>)>,
{
    let mut result = PdfText::default();

    for (number, page) in pages {
        match page {
            Ok(text) => result.text.push_str(&text),
            Err(reason) => {
                log::warn!("PDF {}ページ目のテキスト抽出に失敗: {}", number, reason);
                result.failed_pages.push(number);
            }
        }
    }

    result
}
