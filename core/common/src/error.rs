//! エラーハンドリング
//!
//! 終了コードは sysexits 風に統一する（64: 使い方, 65: 入力データ, 74: I/O）。

/// 共通エラー型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// 引数不正（CLI の使い方・不明なプロファイル・テンプレート不正）
    #[error("{0}")]
    InvalidArgument(String),
    /// 環境変数（認証情報・ホームディレクトリ）の解決失敗
    #[error("{0}")]
    Env(String),
    /// 入力ファイルの形が不正
    #[error("{0}")]
    InvalidInput(String),
    /// ファイル I/O エラー
    #[error("{0}")]
    Io(String),
    /// HTTP 通信・API エラー
    #[error("{0}")]
    Http(String),
    /// JSON のパース・シリアライズエラー
    #[error("{0}")]
    Json(String),
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn env(msg: impl Into<String>) -> Self {
        Self::Env(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn io_msg(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Self::Json(msg.into())
    }

    /// プロセスの終了コード
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) | Self::Env(_) => 64,
            Self::InvalidInput(_) => 65,
            Self::Io(_) | Self::Http(_) | Self::Json(_) => 74,
        }
    }

    /// 使い方の誤りか（main で Usage を表示するかどうか）
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}
