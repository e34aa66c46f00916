use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenCodec;
use chrono::Utc;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::Role;
use crate::domain::account::models::Username;
use crate::domain::account::ports::AccountStore;
use crate::domain::account::ports::AuthServicePort;

/// Domain service implementing registration and login.
///
/// Orchestrates the account store, the password hasher, and the token codec.
/// Stateless across requests: every operation is a single attempt and no
/// session is kept server-side.
pub struct AuthService<S>
where
    S: AccountStore,
{
    store: Arc<S>,
    password_hasher: PasswordHasher,
    token_codec: Arc<TokenCodec>,
}

impl<S> AuthService<S>
where
    S: AccountStore,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Account persistence implementation
    /// * `token_codec` - Process-wide token codec, shared with the resolver
    pub fn new(store: Arc<S>, token_codec: Arc<TokenCodec>) -> Self {
        Self {
            store,
            password_hasher: PasswordHasher::new(),
            token_codec,
        }
    }
}

#[async_trait]
impl<S> AuthServicePort for AuthService<S>
where
    S: AccountStore,
{
    async fn register(&self, command: RegisterCommand) -> Result<String, AccountError> {
        let password_hash = self.password_hasher.hash(&command.password)?;

        let account = Account {
            username: command.username,
            email: command.email,
            display_name: command.display_name,
            password_hash,
            role: Role::default(),
            enabled: true,
            created_at: Utc::now(),
        };
        let username = account.username.clone();

        let inserted = self.store.insert_if_absent(account).await?;
        if !inserted {
            return Err(AccountError::UsernameAlreadyTaken(username.to_string()));
        }

        tracing::info!(username = %username, "Account registered");

        Ok(self.token_codec.mint(username.as_str())?)
    }

    async fn login(&self, username: &Username, password: &str) -> Result<String, AccountError> {
        // An unknown username and a wrong password collapse into the same
        // error; the response must not reveal which check failed.
        let account = self
            .store
            .find_by_username(username)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        let is_valid = self
            .password_hasher
            .matches(password, &account.password_hash)?;
        if !is_valid {
            return Err(AccountError::InvalidCredentials);
        }

        Ok(self.token_codec.mint(account.username.as_str())?)
    }

    async fn find_account(&self, username: &Username) -> Result<Option<Account>, AccountError> {
        self.store.find_by_username(username).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::account::models::EmailAddress;

    const TEST_SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    mock! {
        pub TestAccountStore {}

        #[async_trait]
        impl AccountStore for TestAccountStore {
            async fn find_by_username(&self, username: &Username) -> Result<Option<Account>, AccountError>;
            async fn insert_if_absent(&self, account: Account) -> Result<bool, AccountError>;
        }
    }

    fn test_codec() -> Arc<TokenCodec> {
        Arc::new(TokenCodec::new(TEST_SECRET, 60_000))
    }

    fn test_command(username: &str) -> RegisterCommand {
        RegisterCommand::new(
            Username::new(username.to_string()).unwrap(),
            EmailAddress::new(format!("{}@example.com", username)).unwrap(),
            "Test User".to_string(),
            "password123".to_string(),
        )
    }

    fn stored_account(username: &str, password: &str) -> Account {
        Account {
            username: Username::new(username.to_string()).unwrap(),
            email: EmailAddress::new(format!("{}@example.com", username)).unwrap(),
            display_name: "Test User".to_string(),
            password_hash: PasswordHasher::new().hash(password).unwrap(),
            role: Role::default(),
            enabled: true,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut store = MockTestAccountStore::new();

        store
            .expect_insert_if_absent()
            .withf(|account| {
                account.username.as_str() == "testuser"
                    && account.email.as_str() == "testuser@example.com"
                    && account.password_hash.starts_with("$argon2")
                    && account.role == Role::User
                    && account.enabled
            })
            .times(1)
            .returning(|_| Ok(true));

        let codec = test_codec();
        let service = AuthService::new(Arc::new(store), Arc::clone(&codec));

        let token = service
            .register(test_command("testuser"))
            .await
            .expect("Registration failed");

        // The token's subject is the registered username
        assert!(codec.verify(&token));
        assert_eq!(codec.extract_subject(&token).unwrap(), "testuser");
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let mut store = MockTestAccountStore::new();

        store
            .expect_insert_if_absent()
            .times(1)
            .returning(|_| Ok(false));

        let service = AuthService::new(Arc::new(store), test_codec());

        let result = service.register(test_command("testuser")).await;
        assert!(matches!(
            result,
            Err(AccountError::UsernameAlreadyTaken(name)) if name == "testuser"
        ));
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut store = MockTestAccountStore::new();

        let account = stored_account("alice", "password123");
        store
            .expect_find_by_username()
            .withf(|username| username.as_str() == "alice")
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let codec = test_codec();
        let service = AuthService::new(Arc::new(store), Arc::clone(&codec));

        let username = Username::new("alice".to_string()).unwrap();
        let token = service
            .login(&username, "password123")
            .await
            .expect("Login failed");

        assert!(codec.verify(&token));
        assert_eq!(codec.extract_subject(&token).unwrap(), "alice");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut store = MockTestAccountStore::new();

        let account = stored_account("alice", "password123");
        store
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let service = AuthService::new(Arc::new(store), test_codec());

        let username = Username::new("alice".to_string()).unwrap();
        let result = service.login(&username, "wrong_password").await;
        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_username() {
        let mut store = MockTestAccountStore::new();

        store
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(store), test_codec());

        let username = Username::new("nobody".to_string()).unwrap();
        let result = service.login(&username, "password123").await;

        // Same error as a wrong password; the two cases are indistinguishable
        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_find_account_passthrough() {
        let mut store = MockTestAccountStore::new();

        let account = stored_account("alice", "password123");
        store
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let service = AuthService::new(Arc::new(store), test_codec());

        let username = Username::new("alice".to_string()).unwrap();
        let found = service.find_account(&username).await.unwrap();
        assert_eq!(found.unwrap().username.as_str(), "alice");
    }
}
