const USER_PREFIX: &str = "expense_tracker";

/// The storage keys a ledger reads and writes.
///
/// Single-user installs use fixed keys. Multi-account installs namespace every key
/// as `<prefix>_<user>_<name>` so that accounts never see each other's data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub expenses: String,
    pub currency: String,
    pub theme: String
}

impl StorageKeys {
    pub fn for_user(user_id: &str) -> Self {
        Self {
            expenses: format!("{USER_PREFIX}_{user_id}_expenses"),
            currency: format!("{USER_PREFIX}_{user_id}_currency"),
            theme: format!("{USER_PREFIX}_{user_id}_theme")
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            expenses: "expenses_v1".to_string(),
            currency: "currency_pref".to_string(),
            theme: "theme_pref".to_string()
        }
    }
}
