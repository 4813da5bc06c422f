//! 対話式入力モジュール
//!
//! 入力種別の選択 → 種別に合った入力 → 解析の確認、の順に尋ねる

use crate::error::{AnalyzerError, Result};
use crate::normalizer::load_request;
use dialoguer::{Confirm, Input, Select};
use error_analyzer_common::{AnalysisRequest, Modality};
use std::io::BufRead;
use std::path::PathBuf;

/// 対話的にリクエストを作成
///
/// 入力種別が指定されていれば選択を省略する。
/// 解析をキャンセルした場合は `None`
pub fn collect_request(preselected: Option<Modality>) -> Result<Option<AnalysisRequest>> {
    println!("Error Analyzer");
    println!("Upload your error message, screenshot, or log for analysis\n");

    let modality = match preselected {
        Some(modality) => modality,
        None => select_modality()?,
    };

    let request = match modality {
        Modality::Text => {
            println!("Paste your error message or code snippet here (finish with an empty line):");
            let stdin = std::io::stdin();
            AnalysisRequest::Text(read_multiline(stdin.lock())?)
        }
        _ => {
            let path = prompt_path(modality)?;
            if path.as_os_str().is_empty() {
                return Err(AnalyzerError::MissingInput);
            }
            load_request(modality, &path)?
        }
    };

    let analyze = Confirm::new()
        .with_prompt("Analyze")
        .default(true)
        .interact()
        .map_err(|e| AnalyzerError::Prompt(e.to_string()))?;

    Ok(analyze.then_some(request))
}

fn select_modality() -> Result<Modality> {
    let labels: Vec<&str> = Modality::ALL.iter().map(|m| m.label()).collect();
    let selected = Select::new()
        .with_prompt("Select input type")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| AnalyzerError::Prompt(e.to_string()))?;
    Ok(Modality::ALL[selected])
}

/// ファイルパス入力プロンプト
fn prompt_path(modality: Modality) -> Result<PathBuf> {
    let accepted = modality.accepted_extensions().join(", ");
    let prompt = match modality {
        Modality::Image => format!("Upload an image of your error ({})", accepted),
        _ => format!("Upload your error log or code file ({})", accepted),
    };

    let input: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .validate_with(move |input: &String| -> std::result::Result<(), String> {
            let trimmed = input.trim();
            if trimmed.is_empty() || has_accepted_extension(modality, trimmed) {
                Ok(())
            } else {
                Err(format!("accepted: {}", modality.accepted_extensions().join(", ")))
            }
        })
        .interact_text()
        .map_err(|e| AnalyzerError::Prompt(e.to_string()))?;

    Ok(PathBuf::from(input.trim()))
}

fn has_accepted_extension(modality: Modality, path: &str) -> bool {
    std::path::Path::new(path)
        .extension()
        .map(|e| modality.accepts_extension(&e.to_string_lossy()))
        .unwrap_or(false)
}

/// 空行またはEOFまで読み込む（改行は保持）
pub fn read_multiline<R: BufRead>(reader: R) -> Result<String> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            break;
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}
