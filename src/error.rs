use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("GOOGLE_API_KEY is not set. Export it or add it to a .env file")]
    MissingApiKey,

    #[error("Please provide input based on your selected input type.")]
    MissingInput,

    #[error("{0} はファイル入力ではありません")]
    NotFileInput(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("Unsupported file type for {modality}: {path} (accepted: {accepted})")]
    UnsupportedFileType {
        modality: String,
        path: String,
        accepted: String,
    },

    #[error("画像読み込みエラー: {0}")]
    ImageDecode(String),

    #[error("PDF読み込みエラー: {0}")]
    PdfDecode(String),

    #[error("テキストファイルがUTF-8ではありません: {0}")]
    TextDecode(#[from] std::string::FromUtf8Error),

    #[error("API呼び出しエラー: {0}")]
    ApiCall(String),

    #[error("APIレスポンスのパースに失敗: {0}")]
    ApiParse(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] error_analyzer_common::Error),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
