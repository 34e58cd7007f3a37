//! AssetTask - 静的ファイルを GET するだけの Task

use rand::RngCore;
use std::sync::Arc;
use url::Url;

use super::TaskDefinition;
use crate::domain::{ConfigError, HttpMethod, RequestSpec, TargetConfig};

pub struct AssetTask {
    name: String,
    path: String,
    url: Url,
    weight: u32,
}

impl AssetTask {
    /// path はコンストラクタで 1 回だけ解決する
    pub fn new(
        target: Arc<TargetConfig>,
        name: impl Into<String>,
        path: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let path = path.into();
        let url = target.resolve(&path)?;
        Ok(Self {
            name: name.into(),
            path,
            url,
            weight: 1,
        })
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }
}

impl TaskDefinition for AssetTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn weight(&self) -> u32 {
        self.weight
    }

    fn build(&self, _rng: &mut dyn RngCore) -> RequestSpec {
        RequestSpec::new(HttpMethod::Get, self.path.clone(), self.url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn builds_plain_get() {
        let target = Arc::new(TargetConfig::new("http://localhost:8000").unwrap());
        let task = AssetTask::new(target, "logo", "/assets/logo.webp").unwrap();

        let req = task.build(&mut StdRng::seed_from_u64(0));
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "/assets/logo.webp");
        assert_eq!(req.name, "/assets/logo.webp");
        assert_eq!(req.url.as_str(), "http://localhost:8000/assets/logo.webp");
        assert!(req.headers.is_empty());
        assert!(req.cookies.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn does_not_send_authorization() {
        let target = Arc::new(
            TargetConfig::new("http://localhost:8000")
                .unwrap()
                .with_bearer_token("t"),
        );
        let task = AssetTask::new(target, "logo", "/assets/logo.webp").unwrap();
        assert!(task.build(&mut StdRng::seed_from_u64(0)).headers.is_empty());
    }
}
