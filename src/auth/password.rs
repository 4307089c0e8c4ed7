use bcrypt::DEFAULT_COST;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("password cannot be empty for hashing")]
    Empty,

    #[error("failed to hash password: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// Salted bcrypt hash at the default cost
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    hash_password_with_cost(password, DEFAULT_COST)
}

pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, PasswordError> {
    if password.is_empty() {
        return Err(PasswordError::Empty);
    }
    Ok(bcrypt::hash(password, cost)?)
}

/// A malformed stored hash counts as a mismatch
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}
