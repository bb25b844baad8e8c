//! Wallet abstraction used for ownership checks and message signing.

use std::fmt;
use std::path::Path;

use async_trait::async_trait;
use ed25519_dalek::{Signer, SigningKey};

use crate::error::{BrandError, Result};

/// A connected wallet.
#[async_trait]
pub trait Wallet: Send + Sync {
    /// Address of the connected account, if any.
    fn address(&self) -> Option<String>;

    /// Sign an arbitrary message, returning the raw signature bytes.
    async fn sign_message(&self, message: &str) -> Result<Vec<u8>>;
}

/// An ed25519 key held in memory.
///
/// The address is the hex-encoded public key.
pub struct LocalWallet {
    key: SigningKey,
}

impl LocalWallet {
    pub fn from_bytes(secret: [u8; 32]) -> Self {
        Self {
            key: SigningKey::from_bytes(&secret),
        }
    }

    /// Parse a hex-encoded 32-byte secret key (surrounding whitespace ignored).
    pub fn from_hex(secret: &str) -> Result<Self> {
        let bytes = hex::decode(secret.trim()).map_err(|e| BrandError::Parse {
            message: format!("Invalid wallet key: {}", e),
            help: Some("The key file must contain a hex-encoded 32-byte ed25519 secret".to_string()),
        })?;

        let secret: [u8; 32] = bytes.try_into().map_err(|bytes: Vec<u8>| BrandError::Parse {
            message: format!("Invalid wallet key: expected 32 bytes, got {}", bytes.len()),
            help: Some("The key file must contain a hex-encoded 32-byte ed25519 secret".to_string()),
        })?;

        Ok(Self::from_bytes(secret))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BrandError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read wallet key: {}", e),
        })?;
        Self::from_hex(&content)
    }

    pub fn public_address(&self) -> String {
        hex::encode(self.key.verifying_key().to_bytes())
    }
}

impl fmt::Debug for LocalWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalWallet")
            .field("address", &self.public_address())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Wallet for LocalWallet {
    fn address(&self) -> Option<String> {
        Some(self.public_address())
    }

    async fn sign_message(&self, message: &str) -> Result<Vec<u8>> {
        if message.trim().is_empty() {
            return Err(BrandError::Signature {
                message: "nothing to sign".to_string(),
            });
        }
        Ok(self.key.sign(message.as_bytes()).to_bytes().to_vec())
    }
}
