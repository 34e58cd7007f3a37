//! TargetConfig - 負荷をかける対象ホストの設定
//!
//! 試験の開始時に 1 回だけ作り、`Arc<TargetConfig>` として
//! 全 Task のコンストラクタに渡す（読み取り専用）。

use std::fmt;
use url::Url;

use super::errors::ConfigError;

/// TargetConfig は対象ホスト（base URL）と任意の認証トークンを保持
#[derive(Clone, PartialEq, Eq)]
pub struct TargetConfig {
    host: Url,
    bearer_token: Option<String>,
}

impl TargetConfig {
    /// host 文字列をパースして TargetConfig を作る
    ///
    /// - base として使えない URL（`mailto:` など）はエラー
    /// - path が `/` で終わっていなければ補う（`/app` → `/app/`）
    pub fn new(host: &str) -> Result<Self, ConfigError> {
        let mut url = Url::parse(host).map_err(|source| ConfigError::InvalidHost {
            host: host.to_string(),
            source,
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::NotABase(host.to_string()));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self {
            host: url,
            bearer_token: None,
        })
    }

    /// 空文字のトークンは「未設定」として扱う
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.bearer_token = if token.is_empty() { None } else { Some(token) };
        self
    }

    pub fn host(&self) -> &Url {
        &self.host
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }

    /// `authorization` ヘッダーの値（`Bearer <token>`）
    pub fn authorization(&self) -> Option<String> {
        self.bearer_token.as_ref().map(|t| format!("Bearer {t}"))
    }

    /// Task の path を host に対して解決する
    ///
    /// 先頭の `/` は host 側の path prefix を残すために落とす。
    pub fn resolve(&self, path: &str) -> Result<Url, ConfigError> {
        self.host
            .join(path.trim_start_matches('/'))
            .map_err(|source| ConfigError::InvalidPath {
                path: path.to_string(),
                source,
            })
    }
}

impl fmt::Debug for TargetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetConfig")
            .field("host", &self.host.as_str())
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
