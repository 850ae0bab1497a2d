use thiserror::Error;

/// 入力境界（推論結果の読み込み）で発生するエラー
#[derive(Debug, Error)]
pub enum PoseError {
    #[error("unknown keypoint name: {0:?}")]
    UnknownKeypoint(String),

    #[error("malformed pose frame: {0}")]
    Json(#[from] serde_json::Error),

    #[error("pose frame is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("failed to read pose frames: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<PoseError>,
    },
}

impl PoseError {
    /// 入力ストリーム自体の読み込み失敗か（行単位の不正ではない）
    pub fn is_io(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::Line { source, .. } => source.is_io(),
            _ => false,
        }
    }
}
