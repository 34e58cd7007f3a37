//! Task - 仮想ユーザーが繰り返し実行する単位
//!
//! # 二層構造
//! - **TaskDefinition**: object-safe な trait。`Arc<dyn TaskDefinition>` で共有する
//! - **具体的な Task**: `AssetTask`, `GraphQlTask`（asset.rs / graphql.rs）
//!
//! Task は「(静的な設定, 新しい乱数) → RequestSpec」の純粋関数。
//! 呼び出し間で状態を持たないので、何並列で呼ばれてもよい。

pub mod asset;
pub mod catalog;
pub mod graphql;
pub mod registry;

use rand::RngCore;

use crate::domain::RequestSpec;

pub use self::asset::AssetTask;
pub use self::catalog::{CandidateCountMode, CatalogError, CatalogOptions, default_registry};
pub use self::graphql::GraphQlTask;
pub use self::registry::TaskRegistry;

/// TaskDefinition は 1 つの負荷試験シナリオ
///
/// # 使用例
/// ```ignore
/// let task = AssetTask::new(target, "logo", "/assets/logo.webp")?;
/// let request = task.build(&mut rand::thread_rng());
/// ```
///
/// # Thread Safety
/// - `Send + Sync`: driver が複数の仮想ユーザーから同時に呼ぶ
/// - `build` は `&self` のみ。乱数は呼び出し側が渡す
pub trait TaskDefinition: Send + Sync {
    /// Task の識別子（registry のキー、driver 上の transaction 名）
    fn name(&self) -> &str;

    /// 同じ task set の中での相対的な選択重み
    fn weight(&self) -> u32 {
        1
    }

    /// リクエスト記述を組み立てる
    fn build(&self, rng: &mut dyn RngCore) -> RequestSpec;
}
