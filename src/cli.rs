use crate::error::Result;
use crate::normalizer::load_request;
use clap::{Args, Parser, Subcommand};
use error_analyzer_common::{AnalysisRequest, Modality};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "error-analyzer")]
#[command(about = "エラーメッセージ・スクリーンショット・ログをAIで解析", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// エラーを解析して結果を表示
    Analyze {
        #[command(flatten)]
        input: InputArgs,

        /// 結果を {"kind", "value"} 形式のJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 入力種別を選んで対話的に解析
    Interactive {
        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,

        /// 入力種別を指定して選択を省略 (text / image / pdf / text-file)
        #[arg(long = "type", value_name = "TYPE")]
        input_type: Option<Modality>,
    },

    /// 送信されるプロンプトを表示（モデルは呼ばない）
    Prompt {
        #[command(flatten)]
        input: InputArgs,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// テキスト用モデルを設定
        #[arg(long)]
        set_text_model: Option<String>,

        /// 画像用モデルを設定
        #[arg(long)]
        set_vision_model: Option<String>,

        /// APIのベースURLを設定
        #[arg(long)]
        set_base_url: Option<String>,
    },
}

/// 入力（いずれか1つ）
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct InputArgs {
    /// エラーメッセージやコード片
    #[arg(long)]
    pub text: Option<String>,

    /// エラー画面の画像 (png/jpg/jpeg)
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// エラーログやコードのPDF
    #[arg(long)]
    pub pdf: Option<PathBuf>,

    /// エラーログやコードの .txt ファイル
    #[arg(long)]
    pub text_file: Option<PathBuf>,
}

impl InputArgs {
    pub fn modality(&self) -> Modality {
        if self.image.is_some() {
            Modality::Image
        } else if self.pdf.is_some() {
            Modality::Pdf
        } else if self.text_file.is_some() {
            Modality::TextFile
        } else {
            Modality::Text
        }
    }

    /// 指定された入力からリクエストを作成
    pub fn into_request(self) -> Result<AnalysisRequest> {
        let modality = self.modality();
        let path = self.image.or(self.pdf).or(self.text_file);

        match path {
            Some(path) => load_request(modality, &path),
            None => Ok(AnalysisRequest::Text(self.text.unwrap_or_default())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_text_input() {
        let cli = Cli::try_parse_from(["error-analyzer", "analyze", "--text", "boom"]).unwrap();
        match cli.command {
            Commands::Analyze { input, json } => {
                assert!(!json);
                assert_eq!(input.modality(), Modality::Text);
                assert_eq!(input.into_request().unwrap(), AnalysisRequest::Text("boom".into()));
            }
            _ => panic!("Expected Analyze"),
        }
    }

    #[test]
    fn test_parse_empty_text_is_allowed() {
        let cli = Cli::try_parse_from(["error-analyzer", "analyze", "--text", ""]).unwrap();
        match cli.command {
            Commands::Analyze { input, .. } => {
                assert!(input.into_request().unwrap().is_empty());
            }
            _ => panic!("Expected Analyze"),
        }
    }

    #[test]
    fn test_parse_file_modalities() {
        let cases = [
            ("--image", Modality::Image),
            ("--pdf", Modality::Pdf),
            ("--text-file", Modality::TextFile),
        ];
        for (flag, expected) in cases {
            let cli = Cli::try_parse_from(["error-analyzer", "prompt", flag, "x"]).unwrap();
            match cli.command {
                Commands::Prompt { input } => assert_eq!(input.modality(), expected),
                _ => panic!("Expected Prompt"),
            }
        }
    }

    #[test]
    fn test_parse_interactive_type() {
        let cli = Cli::try_parse_from(["error-analyzer", "interactive", "--type", "PDF"]).unwrap();
        match cli.command {
            Commands::Interactive { input_type, json } => {
                assert!(!json);
                assert_eq!(input_type, Some(Modality::Pdf));
            }
            _ => panic!("Expected Interactive"),
        }

        let cli = Cli::try_parse_from(["error-analyzer", "interactive"]).unwrap();
        assert!(matches!(cli.command, Commands::Interactive { input_type: None, .. }));
    }

    #[test]
    fn test_interactive_unknown_type() {
        let err = Cli::try_parse_from(["error-analyzer", "interactive", "--type", "video"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("Unknown input type: video"));
    }

    #[test]
    fn test_inputs_are_exclusive() {
        let result = Cli::try_parse_from([
            "error-analyzer", "analyze", "--text", "a", "--pdf", "b.pdf",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_input_is_required() {
        assert!(Cli::try_parse_from(["error-analyzer", "analyze"]).is_err());
    }
}
