//! Error Analyzer Common Library
//!
//! CLIと他のフロントエンドで共有される型とユーティリティ

pub mod types;
pub mod error;
pub mod prompts;
pub mod classifier;

pub use types::{AnalysisRequest, Modality};
pub use error::{Error, Result};
pub use prompts::{build_prompt, ANALYSIS_PROMPT_TEMPLATE, IMAGE_PLACEHOLDER};
pub use classifier::{classify_response, ClassifiedResponse, EXPECTED_FIELDS};
