//! Ledger layout configuration.

/// Default ledger key holding the ordered list of live agreement identifiers.
pub const DEFAULT_INDEX_KEY: &str = "_LoanIndex";

/// Default ledger key holding the seed value written by the last `setup`.
pub const DEFAULT_DIAGNOSTIC_KEY: &str = "abc";

/// Well-known ledger keys used by the record store.
///
/// Neither key may collide with an agreement identifier; `create` rejects
/// identifiers equal to either one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Key of the agreement index.
    pub index_key: String,
    /// Key of the diagnostic seed value.
    pub diagnostic_key: String,
}

impl LedgerConfig {
    /// Whether `key` is one of the reserved well-known keys.
    #[must_use]
    pub fn is_reserved(&self, key: &str) -> bool {
        key == self.index_key || key == self.diagnostic_key
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            index_key: DEFAULT_INDEX_KEY.to_string(),
            diagnostic_key: DEFAULT_DIAGNOSTIC_KEY.to_string(),
        }
    }
}
