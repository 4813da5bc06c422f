//! プロンプト生成モジュール
//!
//! - ANALYSIS_PROMPT_TEMPLATE: エラー解析用の固定テンプレート
//! - IMAGE_PLACEHOLDER: 画像入力時にエラー本文の代わりに入れる文
//! - build_prompt: テンプレートへの差し込み

/// テンプレート中の差し込み位置
const INPUT_PLACEHOLDER: &str = "{input_text}";

/// 画像入力時の差し込み文（画像本体はプロンプトと別に送る）
pub const IMAGE_PLACEHOLDER: &str = "Analyze the error in this image:";

/// エラー解析プロンプト
///
/// 8項目（Error Type〜Additional Resources）の構造化回答を求める
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"
As an expert in API troubleshooting and code debugging, your role is to analyze errors, diagnose their root causes, and provide clear explanations and solutions. When presented with an error:

1. Carefully examine the error message, status code (if applicable), and any additional context provided.
2. Identify the type of error (e.g., API-related, syntax error, runtime error, logical error).
3. Explain the error in simple terms, avoiding overly technical jargon.
4. Suggest potential causes for the error, considering common pitfalls and best practices.
5. Provide step-by-step troubleshooting instructions, including how to:
   - Verify API credentials and authentication (if applicable)
   - Check request formatting and parameters (for API errors)
   - Validate data being sent or processed
   - Test API endpoints or specific code sections
   - Review logs or error messages
6. Recommend tools or techniques for debugging (e.g., API testing tools, logging, debuggers, print statements).
7. Offer potential solutions or workarounds for the error.
8. If relevant, suggest preventive measures to avoid similar errors in the future.
9. Be prepared to explain API concepts, HTTP methods, status codes, and common programming concepts as needed.
10. If the error seems unique or complex, provide resources for further research or suggest escalation paths.

Error details:
{input_text}

Please provide a comprehensive analysis and solution in this format:
  "Error Type": "",
  "Explanation": "",
  "Potential Causes": [],
  "Troubleshooting Steps": [],
  "Recommended Tools": [],
  "Potential Solutions": [],
  "Preventive Measures": [],
  "Additional Resources": []
"#;

/// テンプレートにエラー本文を差し込む
///
/// 内容の検証・エスケープはしない。本文に `{input_text}` が含まれていても
/// 置換はテンプレート側の1箇所だけ。
///
/// # Examples
/// ```
/// use error_analyzer_common::build_prompt;
///
/// let prompt = build_prompt("NullPointerException at line 5");
/// assert!(prompt.contains("NullPointerException at line 5"));
/// ```
pub fn build_prompt(input_text: &str) -> String {
    ANALYSIS_PROMPT_TEMPLATE.replacen(INPUT_PLACEHOLDER, input_text, 1)
}
