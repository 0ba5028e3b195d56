use thiserror::Error;

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("password must not be empty")]
    EmptyPassword,

    #[error(transparent)]
    Hash(#[from] bcrypt::BcryptError),
}

/// Produces and checks bcrypt digests. The digest carries its own salt and
/// cost, so verification needs nothing but the stored string.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn hash_password(&self, plaintext: &str) -> Result<String, CredentialError> {
        if plaintext.is_empty() {
            return Err(CredentialError::EmptyPassword);
        }
        Ok(bcrypt::hash(plaintext, self.cost)?)
    }

    /// Comparison is constant time inside `bcrypt::verify`. A digest that
    /// cannot be parsed never matches.
    pub fn verify_password(&self, plaintext: &str, digest: &str) -> bool {
        match bcrypt::verify(plaintext, digest) {
            Ok(matches) => matches,
            Err(e) => {
                log::warn!("stored password digest could not be verified: {}", e);
                false
            }
        }
    }
}
