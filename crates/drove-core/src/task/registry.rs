//! TaskRegistry - TaskDefinition の登録と選択
//!
//! # 学習ポイント
//! - `Arc<dyn TaskDefinition>` による型消去された Task の管理
//! - 登録順を保つ（driver への登録順 = 表示順）
//! - 重み付きランダム選択（`WeightedIndex`）

use rand::RngCore;
use rand::distributions::{Distribution, WeightedIndex};
use std::sync::Arc;

use super::TaskDefinition;
use crate::domain::RegistryError;

/// TaskRegistry は名前で一意な Task の集合
///
/// # 使用例
/// ```ignore
/// let mut registry = TaskRegistry::new();
/// registry.register(Arc::new(task))?;
///
/// let task = registry.pick(&mut rng)?;
/// let request = task.build(&mut rng);
/// ```
#[derive(Default, Clone)]
pub struct TaskRegistry {
    tasks: Vec<Arc<dyn TaskDefinition>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn register(&mut self, task: Arc<dyn TaskDefinition>) -> Result<(), RegistryError> {
        if self.get(task.name()).is_some() {
            return Err(RegistryError::AlreadyRegistered(task.name().to_string()));
        }
        tracing::debug!(task = task.name(), weight = task.weight(), "registered task");
        self.tasks.push(task);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn TaskDefinition>> {
        self.tasks.iter().find(|t| t.name() == name).cloned()
    }

    /// 登録順の名前一覧
    pub fn names(&self) -> Vec<String> {
        self.tasks.iter().map(|t| t.name().to_string()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn TaskDefinition>> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// 指定した名前の Task だけを残した registry を返す（`names` の順）
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<TaskRegistry, RegistryError> {
        let mut selected = TaskRegistry::new();
        for name in names {
            let name = name.as_ref();
            let task = self
                .get(name)
                .ok_or_else(|| RegistryError::UnknownTask(name.to_string()))?;
            selected.register(task)?;
        }
        Ok(selected)
    }

    /// 重みに比例して Task を 1 つ選ぶ。weight 0 の Task は選ばれない
    ///
    /// 合計は u64 で取るので、u32::MAX の weight を並べても溢れない。
    pub fn pick(&self, rng: &mut dyn RngCore) -> Result<Arc<dyn TaskDefinition>, RegistryError> {
        let weights = self.tasks.iter().map(|t| u64::from(t.weight()));
        let index = WeightedIndex::new(weights).map_err(|_| RegistryError::NoRunnableTasks)?;
        Ok(Arc::clone(&self.tasks[index.sample(rng)]))
    }
}
