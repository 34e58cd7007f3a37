//! CookieToken - ランダムなトークン生成
//!
//! tracking cookie（`ai_user` など）の値を毎回新しく作る。
//! 各文字はアルファベットから独立・一様に選ぶ。一意性は保証しない。

use rand::{Rng, RngCore};

/// 英大文字 + 数字
pub const UPPER_ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// `ai_user` cookie のトークン長
pub const DEFAULT_TOKEN_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieToken {
    alphabet: Vec<u8>,
    len: usize,
}

impl CookieToken {
    /// 英大文字 + 数字で `len` 文字
    pub fn new(len: usize) -> Self {
        Self {
            alphabet: UPPER_ALPHANUMERIC.to_vec(),
            len,
        }
    }

    /// 任意の ASCII アルファベットで作る。空、または ASCII 以外を含む場合は `None`
    pub fn with_alphabet(alphabet: &[u8], len: usize) -> Option<Self> {
        if alphabet.is_empty() || !alphabet.is_ascii() {
            return None;
        }
        Some(Self {
            alphabet: alphabet.to_vec(),
            len,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn generate(&self, rng: &mut dyn RngCore) -> String {
        (0..self.len)
            .map(|_| self.alphabet[rng.gen_range(0..self.alphabet.len())] as char)
            .collect()
    }
}

impl Default for CookieToken {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn default_token_is_ten_upper_alphanumeric_chars() {
        let token = CookieToken::default();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..1_000 {
            let t = token.generate(&mut rng);
            assert_eq!(t.len(), 10);
            assert!(t.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()), "{t}");
        }
    }

    #[test]
    fn same_seed_same_token() {
        let token = CookieToken::default();
        let a = token.generate(&mut StdRng::seed_from_u64(42));
        let b = token.generate(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn every_symbol_is_reachable() {
        let token = CookieToken::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = std::collections::HashSet::new();

        for _ in 0..500 {
            seen.extend(token.generate(&mut rng).bytes());
        }
        assert_eq!(seen.len(), UPPER_ALPHANUMERIC.len());
    }

    #[test]
    fn custom_alphabet() {
        let token = CookieToken::with_alphabet(b"ab", 4).unwrap();
        let t = token.generate(&mut StdRng::seed_from_u64(3));
        assert_eq!(t.len(), 4);
        assert!(t.chars().all(|c| c == 'a' || c == 'b'));
    }

    #[test]
    fn empty_alphabet_is_rejected() {
        assert!(CookieToken::with_alphabet(b"", 4).is_none());
    }
}
