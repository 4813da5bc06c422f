use error_analyzer_common::{ClassifiedResponse, Modality};

/// 1回の解析結果
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub modality: Modality,           // 入力種別
    pub response: ClassifiedResponse, // 分類済み応答
}
