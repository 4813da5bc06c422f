//! 解析結果の表示
//!
//! - 構造化結果: 項目ごとのキー/値表示
//! - テキスト結果: 原文をそのまま表示

use error_analyzer_common::ClassifiedResponse;
use serde_json::Value;
use std::fmt::Write;

/// 表示用の文字列を生成
pub fn render_response(response: &ClassifiedResponse) -> String {
    match response {
        ClassifiedResponse::Structured(value) => render_structured(value),
        ClassifiedResponse::FreeText(text) => format!("Response (Text)\n{}\n", text),
    }
}

fn render_structured(value: &Value) -> String {
    let Some(map) = value.as_object() else {
        return format!("{}\n", pretty(value));
    };

    let mut out = String::new();
    for (key, value) in map {
        let _ = writeln!(out, "{}:", key);
        match value {
            Value::Array(items) if items.is_empty() => {
                let _ = writeln!(out, "  (none)");
            }
            Value::Array(items) => {
                for item in items {
                    let _ = writeln!(out, "  - {}", scalar(item));
                }
            }
            Value::Object(_) => {
                for line in pretty(value).lines() {
                    let _ = writeln!(out, "  {}", line);
                }
            }
            _ => {
                let _ = writeln!(out, "  {}", scalar(value));
            }
        }
        out.push('\n');
    }

    let missing = ClassifiedResponse::Structured(value.clone()).missing_fields();
    if !missing.is_empty() && missing.len() < error_analyzer_common::EXPECTED_FIELDS.len() {
        let _ = writeln!(out, "(missing: {})", missing.join(", "));
    }

    out
}

/// 文字列は引用符なし、それ以外はJSON表記
fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "(none)".to_string(),
        other => other.to_string(),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
