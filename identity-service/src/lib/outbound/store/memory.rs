use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::Username;
use crate::domain::account::ports::AccountStore;

/// In-memory account store.
///
/// Keeps accounts in a shared map keyed by username. Holding the write lock
/// across the uniqueness check and the insert makes `insert_if_absent` a
/// single atomic step under concurrent registration.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountError> {
        Ok(self.accounts.read().await.get(username.as_str()).cloned())
    }

    async fn insert_if_absent(&self, account: Account) -> Result<bool, AccountError> {
        let mut accounts = self.accounts.write().await;

        if accounts.contains_key(account.username.as_str()) {
            return Ok(false);
        }

        accounts.insert(account.username.as_str().to_string(), account);
        Ok(true)
    }
}
