//! Local sign-in.

use async_trait::async_trait;
use tokio::sync::Mutex;

use dialed_core::config::LocalUserConfig;
use dialed_core::error::{DialedError, Result};
use dialed_core::user::{AuthProvider, AuthUser};

/// Signs in as the user named in `config.toml`.
pub struct LocalAuthProvider {
    user: LocalUserConfig,
    signed_in: Mutex<bool>,
}

impl LocalAuthProvider {
    pub fn new(user: LocalUserConfig) -> Self {
        Self {
            user,
            signed_in: Mutex::new(false),
        }
    }

    pub async fn is_signed_in(&self) -> bool {
        *self.signed_in.lock().await
    }
}

#[async_trait]
impl AuthProvider for LocalAuthProvider {
    async fn sign_in(&self) -> Result<AuthUser> {
        if self.user.uid.trim().is_empty() {
            return Err(DialedError::auth("no user id configured"));
        }
        *self.signed_in.lock().await = true;
        tracing::info!(uid = %self.user.uid, "signed in");
        Ok(AuthUser {
            uid: self.user.uid.clone(),
            display_name: self.user.display_name.clone(),
        })
    }

    async fn sign_out(&self) -> Result<()> {
        *self.signed_in.lock().await = false;
        tracing::info!(uid = %self.user.uid, "signed out");
        Ok(())
    }
}
