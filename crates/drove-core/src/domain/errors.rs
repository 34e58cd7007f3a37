//! Errors - エラー型
//!
//! Task の組み立て自体は失敗しない（型で保証する）。
//! ここにあるのは起動時の設定エラーだけ。

/// ConfigError は TargetConfig 構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid target host '{host}': {source}")]
    InvalidHost {
        host: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Target host '{0}' cannot be used as a base URL")]
    NotABase(String),

    #[error("Path '{path}' cannot be resolved against the target host: {source}")]
    InvalidPath {
        path: String,
        #[source]
        source: url::ParseError,
    },
}

/// RegistryError は TaskRegistry の操作エラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Task '{0}' is already registered")]
    AlreadyRegistered(String),

    #[error("Unknown task '{0}'")]
    UnknownTask(String),

    #[error("No runnable tasks (the registry is empty or every weight is zero)")]
    NoRunnableTasks,
}
