//! drove-core
//!
//! 負荷試験の「仮想ユーザーが実行する Task」を定義するコア部分。
//!
//! # モジュール構成
//! - **domain**: リクエスト記述（RequestSpec）, TargetConfig, CookieToken, RunId, エラー型
//! - **task**: TaskDefinition trait, 具体的な Task, TaskRegistry, カタログ
//!
//! 並行実行・スケジューリング・メトリクス集計は外部の driver（goose）の責務で、
//! このクレートは扱わない。

pub mod domain;
pub mod task;
