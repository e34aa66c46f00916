use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::Username;

/// Port for authentication operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account and mint a bearer token for it.
    ///
    /// # Arguments
    /// * `command` - Validated command with username, email, display name, and password
    ///
    /// # Returns
    /// Bearer token whose subject is the new account's username
    ///
    /// # Errors
    /// * `UsernameAlreadyTaken` - Username already exists; nothing was stored
    /// * `Password` - Password hashing failed
    /// * `Token` - Token minting failed
    /// * `StorageError` - Store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<String, AccountError>;

    /// Verify credentials and mint a bearer token.
    ///
    /// # Arguments
    /// * `username` - Account username
    /// * `password` - Plaintext password to verify
    ///
    /// # Returns
    /// Bearer token whose subject is the username
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password, indistinguishably
    /// * `Token` - Token minting failed
    /// * `StorageError` - Store operation failed
    async fn login(&self, username: &Username, password: &str) -> Result<String, AccountError>;

    /// Look up an account by username.
    ///
    /// Used by the request identity resolver to derive a fresh identity from
    /// a verified token subject.
    ///
    /// # Errors
    /// * `StorageError` - Store operation failed
    async fn find_account(&self, username: &Username) -> Result<Option<Account>, AccountError>;
}

/// Persistence port for the account aggregate.
#[async_trait]
pub trait AccountStore: Send + Sync + 'static {
    /// Retrieve an account by username.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `StorageError` - Store operation failed
    async fn find_by_username(&self, username: &Username)
        -> Result<Option<Account>, AccountError>;

    /// Persist the account unless its username is already taken.
    ///
    /// The uniqueness check and the insert must be a single atomic step:
    /// two concurrent registrations for the same username must never both
    /// succeed.
    ///
    /// # Returns
    /// True if the account was stored, false if the username already existed
    ///
    /// # Errors
    /// * `StorageError` - Store operation failed
    async fn insert_if_absent(&self, account: Account) -> Result<bool, AccountError>;
}
