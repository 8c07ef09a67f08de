//! Promo codes issued on a player win.

use derive_more::Display;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A five-digit numeric reward code (`10000..=99999`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(transparent)]
pub struct PromoCode(String);

impl PromoCode {
    /// Generates a fresh code.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.random_range(10_000..100_000u32).to_string())
    }

    /// Accepts an existing code if it is exactly five digits without a
    /// leading zero.
    pub fn parse(code: &str) -> Option<Self> {
        let valid = code.len() == 5
            && code.chars().all(|c| c.is_ascii_digit())
            && !code.starts_with('0');
        valid.then(|| Self(code.to_string()))
    }

    /// The code as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
