//! Local account and session management.
//!
//! [`SessionProvider`] is the contract the rest of the core depends on; the
//! gateway and aggregator only ever read session presence and the user id.
//! [`LocalAuth`] implements it against the SQLite database with salted
//! HMAC-SHA256 password digests. The active session lives in the kv table so
//! it spans CLI invocations, and changes are published over a watch channel.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tokio::sync::watch;
use uuid::Uuid;

use crate::error::AuthError;
use crate::storage::database::UserRow;
use crate::storage::Database;

const SESSION_KEY: &str = "session";
const MIN_PASSWORD_LEN: usize = 8;

/// Proof of authenticated identity. Consumers only read `user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
    pub issued_at: DateTime<Utc>,
}

/// Authentication contract: sign-up/in/out plus current-session lookup.
pub trait SessionProvider {
    fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError>;
    fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;
    fn sign_out(&self) -> Result<(), AuthError>;
    fn current_session(&self) -> Option<Session>;
}

/// SQLite-backed session provider for a single local device.
pub struct LocalAuth<'a> {
    db: &'a Database,
    changes: watch::Sender<Option<Session>>,
}

impl<'a> LocalAuth<'a> {
    pub fn new(db: &'a Database) -> Self {
        let current = load_session(db);
        let (changes, _) = watch::channel(current);
        Self { db, changes }
    }

    /// Change-notification stream: receives the session after every
    /// sign-in/out.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.changes.subscribe()
    }

    fn store_session(&self, session: &Session) -> Result<(), AuthError> {
        let json = serde_json::to_string(session)
            .map_err(|e| AuthError::Storage(crate::error::DatabaseError::QueryFailed(e.to_string())))?;
        self.db.kv_set(SESSION_KEY, &json)?;
        let _ = self.changes.send(Some(session.clone()));
        Ok(())
    }
}

impl SessionProvider for LocalAuth<'_> {
    fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = email.trim().to_ascii_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(AuthError::InvalidEmail(email));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }
        if self.db.user_by_email(&email)?.is_some() {
            return Err(AuthError::EmailTaken(email));
        }

        let mut salt = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut salt);
        let user = UserRow {
            id: Uuid::new_v4(),
            email: email.clone(),
            pass_salt: hex::encode(salt),
            pass_hash: hex::encode(digest_password(&salt, password)),
            created_at: Utc::now(),
        };
        self.db.insert_user(&user)?;

        let session = Session {
            user_id: user.id,
            email,
            issued_at: Utc::now(),
        };
        self.store_session(&session)?;
        Ok(session)
    }

    fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = email.trim().to_ascii_lowercase();
        let user = self
            .db
            .user_by_email(&email)?
            .ok_or(AuthError::InvalidCredentials)?;

        let salt = hex::decode(&user.pass_salt).map_err(|_| AuthError::InvalidCredentials)?;
        let mut mac = Hmac::<Sha256>::new_from_slice(&salt)
            .map_err(|_| AuthError::InvalidCredentials)?;
        mac.update(password.as_bytes());
        let expected = hex::decode(&user.pass_hash).map_err(|_| AuthError::InvalidCredentials)?;
        mac.verify_slice(&expected)
            .map_err(|_| AuthError::InvalidCredentials)?;

        let session = Session {
            user_id: user.id,
            email: user.email,
            issued_at: Utc::now(),
        };
        self.store_session(&session)?;
        Ok(session)
    }

    fn sign_out(&self) -> Result<(), AuthError> {
        self.db.kv_delete(SESSION_KEY)?;
        let _ = self.changes.send(None);
        Ok(())
    }

    fn current_session(&self) -> Option<Session> {
        load_session(self.db)
    }
}

fn load_session(db: &Database) -> Option<Session> {
    let json = db.kv_get(SESSION_KEY).ok()??;
    serde_json::from_str(&json).ok()
}

fn digest_password(salt: &[u8], password: &str) -> Vec<u8> {
    // Salt keys the HMAC, so equal passwords never share a digest.
    let mut mac = Hmac::<Sha256>::new_from_slice(salt).expect("hmac accepts any key length");
    mac.update(password.as_bytes());
    mac.finalize().into_bytes().to_vec()
}
