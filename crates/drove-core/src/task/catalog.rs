//! Catalog - 標準の task set
//!
//! | name              | request                                    |
//! |-------------------|--------------------------------------------|
//! | `get_asset`       | `GET /assets/dnd-hero-card-D_30_yLp.webp`  |
//! | `candidate_count` | `POST /graphql`（NoOp または countPoolCandidates） |
//! | `getSkills`       | `POST /graphql`（WhoAmI + `ai_user` cookie） |

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{AssetTask, GraphQlTask, TaskRegistry};
use crate::domain::{ConfigError, CookieToken, GraphQlBody, RegistryError, TargetConfig};

pub const GET_ASSET: &str = "get_asset";
pub const CANDIDATE_COUNT: &str = "candidate_count";
pub const GET_SKILLS: &str = "getSkills";

pub const HERO_CARD_ASSET_PATH: &str = "/assets/dnd-hero-card-D_30_yLp.webp";

pub const NOOP_QUERY: &str = "query NoOp { __typename }";

pub const COUNT_POOL_CANDIDATES_QUERY: &str = concat!(
    "query countPoolCandidates($where: PoolCandidateFilterInput) ",
    "{ countPoolCandidates(where: $where) }"
);

pub const WHO_AM_I_QUERY: &str = "query WhoAmI { me { id } }";

pub const AI_USER_COOKIE: &str = "ai_user";

/// `candidate_count` の送信内容
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateCountMode {
    /// `query NoOp { __typename }`（サーバー側の処理をほぼ持たない）
    #[default]
    NoOp,
    /// 実際の countPoolCandidates（フィルタなし）
    Count,
}

impl CandidateCountMode {
    pub fn body(self) -> GraphQlBody {
        match self {
            CandidateCountMode::NoOp => GraphQlBody::new(NOOP_QUERY),
            // variables は JSON 文字列のまま送る
            CandidateCountMode::Count => GraphQlBody::new(COUNT_POOL_CANDIDATES_QUERY)
                .with_variables(&serde_json::json!({ "where": {} })),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CatalogOptions {
    pub candidate_count: CandidateCountMode,
}

pub fn get_asset(target: Arc<TargetConfig>) -> Result<AssetTask, ConfigError> {
    AssetTask::new(target, GET_ASSET, HERO_CARD_ASSET_PATH)
}

pub fn candidate_count(
    target: Arc<TargetConfig>,
    mode: CandidateCountMode,
) -> Result<GraphQlTask, ConfigError> {
    GraphQlTask::new(target, CANDIDATE_COUNT, mode.body())
}

pub fn get_skills(target: Arc<TargetConfig>) -> Result<GraphQlTask, ConfigError> {
    Ok(GraphQlTask::new(target, GET_SKILLS, GraphQlBody::new(WHO_AM_I_QUERY))?
        .with_random_cookie(AI_USER_COOKIE, CookieToken::default()))
}

/// 標準の task set を登録済みの registry を作る
pub fn default_registry(
    target: Arc<TargetConfig>,
    options: &CatalogOptions,
) -> Result<TaskRegistry, CatalogError> {
    let mut registry = TaskRegistry::new();
    registry.register(Arc::new(get_asset(Arc::clone(&target))?))?;
    registry.register(Arc::new(candidate_count(
        Arc::clone(&target),
        options.candidate_count,
    )?))?;
    registry.register(Arc::new(get_skills(target)?))?;
    Ok(registry)
}

/// CatalogError は default_registry の構築エラー
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
