//! Shared test infrastructure for the catalog crates
//!
//! - `TestDatabase`: PostgreSQL container with the catalog schema applied (feature: "postgres")
//! - `TestRedis`: Redis container (feature: "redis")
//! - `TestDataBuilder`: deterministic test data
//!
//! Container-backed tests need Docker; mark them `#[ignore]` and run them with
//! `cargo test -- --ignored`.
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! # async fn example() {
//! let db = TestDatabase::new().await;
//! let builder = TestDataBuilder::from_test_name("creates_lamp");
//!
//! let owner = builder.user_id();
//! let name = builder.name("lamp", "main");
//! # }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "redis")]
mod redis;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

#[cfg(feature = "redis")]
pub use redis::TestRedis;

/// Seeded generator so reruns of a test see the same data
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the test name, so each test gets its own data
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Positive owner id in `1..=1_000_000`
    pub fn user_id(&self) -> i32 {
        (self.seed % 1_000_000) as i32 + 1
    }

    /// `test-{prefix}-{seed}-{suffix}`
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Image URL unique to this builder
    pub fn image_url(&self, file: &str) -> String {
        format!("https://cdn.example.com/{}/{}", self.seed, file)
    }
}

pub mod assertions {
    /// Unwrap `value` with a readable panic message
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_data() {
        let a = TestDataBuilder::new(42);
        let b = TestDataBuilder::new(42);

        assert_eq!(a.user_id(), b.user_id());
        assert_eq!(a.name("lamp", "x"), b.name("lamp", "x"));
    }

    #[test]
    fn different_names_diverge() {
        let a = TestDataBuilder::from_test_name("first");
        let b = TestDataBuilder::from_test_name("second");

        assert_ne!(a.name("lamp", "x"), b.name("lamp", "x"));
    }

    #[test]
    fn user_id_is_always_positive() {
        for seed in [0, 999_999, u64::MAX] {
            assert!(TestDataBuilder::new(seed).user_id() > 0);
        }
    }
}
