//! GraphQlTask - `POST /graphql` を送る Task
//!
//! query / variables は構築時に固定。毎回変わるのはランダム cookie だけ。

use rand::RngCore;
use std::collections::BTreeMap;
use std::sync::Arc;
use url::Url;

use super::TaskDefinition;
use crate::domain::{
    ConfigError, CookieToken, GraphQlBody, HttpMethod, RequestBody, RequestSpec, TargetConfig,
};

pub const GRAPHQL_PATH: &str = "/graphql";

/// driver 上の集計名。実際の path とは別に、endpoint 単位でまとめる
pub const GRAPHQL_REPORTING_NAME: &str = "GraphQL";

pub struct GraphQlTask {
    name: String,
    url: Url,
    body: GraphQlBody,
    headers: BTreeMap<String, String>,
    random_cookies: Vec<(String, CookieToken)>,
    weight: u32,
}

impl GraphQlTask {
    /// target に bearer token があれば `authorization` ヘッダーを付ける
    pub fn new(
        target: Arc<TargetConfig>,
        name: impl Into<String>,
        body: GraphQlBody,
    ) -> Result<Self, ConfigError> {
        let url = target.resolve(GRAPHQL_PATH)?;
        let mut headers = BTreeMap::new();
        if let Some(auth) = target.authorization() {
            headers.insert("authorization".to_string(), auth);
        }
        Ok(Self {
            name: name.into(),
            url,
            body,
            headers,
            random_cookies: Vec::new(),
            weight: 1,
        })
    }

    /// 呼び出しごとに新しいトークンを値とする cookie を追加
    pub fn with_random_cookie(mut self, name: impl Into<String>, token: CookieToken) -> Self {
        self.random_cookies.push((name.into(), token));
        self
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    pub fn body(&self) -> &GraphQlBody {
        &self.body
    }
}

impl TaskDefinition for GraphQlTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn weight(&self) -> u32 {
        self.weight
    }

    fn build(&self, rng: &mut dyn RngCore) -> RequestSpec {
        let mut spec = RequestSpec::new(HttpMethod::Post, GRAPHQL_PATH, self.url.clone())
            .with_name(GRAPHQL_REPORTING_NAME)
            .with_body(RequestBody::GraphQl(self.body.clone()));
        spec.headers = self.headers.clone();
        for (cookie, token) in &self.random_cookies {
            spec = spec.with_cookie(cookie.clone(), token.generate(rng));
        }
        spec
    }
}
