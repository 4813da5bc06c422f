//! モデル応答の分類
//!
//! 応答文字列がJSONとしてパースできれば構造化結果、
//! できなければ元の文字列をそのままテキスト結果として扱う。
//! パース失敗はエラーではなく、表示の切り替え条件。

use crate::error::Result;
use serde::Serialize;
use serde_json::Value;

/// プロンプトで要求している8項目
pub const EXPECTED_FIELDS: [&str; 8] = [
    "Error Type",
    "Explanation",
    "Potential Causes",
    "Troubleshooting Steps",
    "Recommended Tools",
    "Potential Solutions",
    "Preventive Measures",
    "Additional Resources",
];

/// 分類済みの応答
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum ClassifiedResponse {
    /// JSONとしてパースできた応答
    Structured(Value),
    /// パースできなかった応答（原文のまま）
    FreeText(String),
}

impl ClassifiedResponse {
    /// 表示用タグ: "structured" / "free-text"
    pub fn tag(&self) -> &'static str {
        match self {
            ClassifiedResponse::Structured(_) => "structured",
            ClassifiedResponse::FreeText(_) => "free-text",
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, ClassifiedResponse::Structured(_))
    }

    pub fn as_structured(&self) -> Option<&Value> {
        match self {
            ClassifiedResponse::Structured(value) => Some(value),
            ClassifiedResponse::FreeText(_) => None,
        }
    }

    /// 構造化結果に含まれない期待項目
    ///
    /// 表示上の補足のみに使う。分類には影響しない。
    /// オブジェクト以外のJSON・テキスト結果では全項目を返す。
    pub fn missing_fields(&self) -> Vec<&'static str> {
        match self.as_structured().and_then(Value::as_object) {
            Some(map) => EXPECTED_FIELDS
                .iter()
                .copied()
                .filter(|field| !map.contains_key(*field))
                .collect(),
            None => EXPECTED_FIELDS.to_vec(),
        }
    }

    /// `{"kind": ..., "value": ...}` 形式のJSON
    pub fn to_json_envelope(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// 応答を分類する
///
/// # Arguments
/// * `reply` - モデルの応答文字列
///
/// # Returns
/// * `Structured` - JSONとしてパース成功（スキーマは問わない）
/// * `FreeText` - パース失敗（理由は問わない）
///
/// # Examples
/// ```
/// use error_analyzer_common::{classify_response, ClassifiedResponse};
///
/// let result = classify_response(r#"{"Error Type": "SyntaxError"}"#);
/// assert_eq!(result.tag(), "structured");
///
/// let result = classify_response("The error is caused by a missing semicolon.");
/// assert_eq!(
///     result,
///     ClassifiedResponse::FreeText("The error is caused by a missing semicolon.".into())
/// );
/// ```
pub fn classify_response(reply: &str) -> ClassifiedResponse {
    match serde_json::from_str::<Value>(reply) {
        Ok(value) => ClassifiedResponse::Structured(value),
        Err(_) => ClassifiedResponse::FreeText(reply.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_full_object() {
        let reply = r#"{
  "Error Type": "NullPointerException",
  "Explanation": "An object reference was null.",
  "Potential Causes": ["Uninitialized field"],
  "Troubleshooting Steps": ["Check line 5"],
  "Recommended Tools": ["Debugger"],
  "Potential Solutions": ["Initialize the field"],
  "Preventive Measures": ["Use Optional"],
  "Additional Resources": []
}"#;
        let result = classify_response(reply);
        assert!(result.is_structured());
        let value = result.as_structured().unwrap();
        assert_eq!(value["Error Type"], "NullPointerException");
        assert_eq!(value["Potential Causes"][0], "Uninitialized field");
        assert!(result.missing_fields().is_empty());
    }

    #[test]
    fn test_classify_partial_object_is_still_structured() {
        let result = classify_response(r#"{"Error Type": "Timeout"}"#);
        assert_eq!(result.tag(), "structured");
        assert_eq!(result.missing_fields().len(), 7);
        assert!(!result.missing_fields().contains(&"Error Type"));
    }

    #[test]
    fn test_classify_non_object_json() {
        assert_eq!(classify_response("[1, 2, 3]"), ClassifiedResponse::Structured(json!([1, 2, 3])));
        assert_eq!(classify_response("42"), ClassifiedResponse::Structured(json!(42)));
        assert_eq!(classify_response("\"text\""), ClassifiedResponse::Structured(json!("text")));
        assert_eq!(classify_response(" {} \n"), ClassifiedResponse::Structured(json!({})));
    }

    #[test]
    fn test_classify_free_text() {
        let replies = [
            "Plain prose explaining the error.",
            r#"{"Error Type": "NullPointerException""#,
            "```json\n{\"Error Type\": \"x\"}\n```",
            "",
            "{'single': 'quotes'}",
        ];
        for reply in replies {
            let result = classify_response(reply);
            assert_eq!(result, ClassifiedResponse::FreeText(reply.to_string()));
            assert_eq!(result.tag(), "free-text");
        }
    }

    #[test]
    fn test_classify_idempotent() {
        for reply in [r#"{"a": [1, {"b": null}]}"#, "not json {", ""] {
            let first = classify_response(reply);
            let second = classify_response(reply);
            assert_eq!(first, second);
            assert_eq!(first.tag(), second.tag());
        }
    }

    #[test]
    fn test_preserves_key_order() {
        let result = classify_response(r#"{"Explanation": "b", "Error Type": "a"}"#);
        let keys: Vec<&String> = result
            .as_structured()
            .and_then(Value::as_object)
            .unwrap()
            .keys()
            .collect();
        assert_eq!(keys, vec!["Explanation", "Error Type"]);
    }

    #[test]
    fn test_json_envelope() {
        let structured = classify_response(r#"{"Error Type": "E"}"#);
        let envelope: Value = serde_json::from_str(&structured.to_json_envelope().unwrap()).unwrap();
        assert_eq!(envelope["kind"], "structured");
        assert_eq!(envelope["value"]["Error Type"], "E");

        let text = classify_response("hello");
        let envelope: Value = serde_json::from_str(&text.to_json_envelope().unwrap()).unwrap();
        assert_eq!(envelope["kind"], "free-text");
        assert_eq!(envelope["value"], "hello");
    }

    #[test]
    fn test_free_text_missing_all_fields() {
        assert_eq!(classify_response("nope").missing_fields().len(), EXPECTED_FIELDS.len());
    }
}
