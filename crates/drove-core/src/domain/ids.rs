//! RunId - 1 回の負荷試験を識別する ID
//!
//! ULID ベースなので、時刻順にソートできる。
//! ログの相関（開始〜終了）に使うだけで、永続化はしない。

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RunId(Ulid);

impl RunId {
    /// 現在時刻から新しい RunId を生成
    pub fn generate() -> Self {
        Self(Ulid::new())
    }

    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    pub fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl From<Ulid> for RunId {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_id_has_prefix() {
        let id = RunId::generate();
        assert!(id.to_string().starts_with("run-"));
        assert_eq!(id.to_string().len(), "run-".len() + 26);
    }

    #[test]
    fn run_ids_are_sortable() {
        let id1 = RunId::generate();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = RunId::generate();

        assert!(id1 < id2);
    }

    #[test]
    fn from_trait_works() {
        let ulid = Ulid::new();
        let id: RunId = ulid.into();
        assert_eq!(id.as_ulid(), ulid);
    }
}
