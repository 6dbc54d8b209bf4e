/**
 * Password Hashing
 *
 * One-way salted bcrypt hashes with a fixed cost factor. Both operations
 * run on the blocking pool so a hash does not stall the async workers.
 */

use bcrypt::{hash, verify};
use tokio::task::spawn_blocking;

use crate::backend::error::BackendError;

/// bcrypt cost factor used for every stored hash
pub const BCRYPT_COST: u32 = 10;

/// Hash a plaintext password for storage
pub async fn hash_password(password: &str) -> Result<String, BackendError> {
    let password = password.to_owned();
    let hashed = spawn_blocking(move || hash(password, BCRYPT_COST))
        .await
        .map_err(|e| BackendError::internal(format!("hashing task failed: {}", e)))??;
    Ok(hashed)
}

/// Check a plaintext password against a stored hash
pub async fn verify_password(password: &str, password_hash: &str) -> Result<bool, BackendError> {
    let password = password.to_owned();
    let password_hash = password_hash.to_owned();
    let matches = spawn_blocking(move || verify(password, &password_hash))
        .await
        .map_err(|e| BackendError::internal(format!("verification task failed: {}", e)))??;
    Ok(matches)
}
