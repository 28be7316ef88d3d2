//! Test doubles for session manager tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::config::{Environment, SessionConfig};
use crate::cookie::{CookieOptions, CookieStore};
use crate::session::{SessionError, SessionManager};
use crate::token::{SessionClaims, SessionTokenCodec, TokenCodec, TokenError};

pub(crate) const TEST_SECRET: &str = "session-test-secret-0123456789abcdef";

/// Recorded `CookieStore::set` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SetCall {
    pub(crate) name: String,
    pub(crate) value: String,
    pub(crate) options: CookieOptions,
}

/// In-memory cookie store recording every call
#[derive(Debug, Default)]
pub(crate) struct MockCookieStore {
    pub(crate) entries: Mutex<HashMap<String, String>>,
    pub(crate) set_calls: Mutex<Vec<SetCall>>,
    pub(crate) delete_calls: Mutex<Vec<String>>,
    pub(crate) unavailable: bool,
}

impl MockCookieStore {
    pub(crate) fn with_cookie(name: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .entries
            .lock()
            .unwrap()
            .insert(name.to_string(), value.to_string());
        store
    }

    pub(crate) fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub(crate) fn entry(&self, name: &str) -> Option<String> {
        self.entries.lock().unwrap().get(name).cloned()
    }

    fn check(&self) -> Result<(), SessionError> {
        if self.unavailable {
            Err(SessionError::CookieStoreUnavailable)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CookieStore for MockCookieStore {
    async fn get(&self, name: &str) -> Result<Option<String>, SessionError> {
        self.check()?;
        Ok(self.entry(name))
    }

    async fn set(
        &self,
        name: &str,
        value: &str,
        options: &CookieOptions,
    ) -> Result<(), SessionError> {
        self.check()?;
        self.set_calls.lock().unwrap().push(SetCall {
            name: name.to_string(),
            value: value.to_string(),
            options: options.clone(),
        });
        self.entries
            .lock()
            .unwrap()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, name: &str, _options: &CookieOptions) -> Result<(), SessionError> {
        self.check()?;
        self.delete_calls.lock().unwrap().push(name.to_string());
        self.entries.lock().unwrap().remove(name);
        Ok(())
    }
}

/// Codec with canned results that records which tokens it was asked to verify
#[derive(Debug)]
pub(crate) struct MockCodec {
    sign_result: Result<String, TokenError>,
    verify_result: Result<SessionClaims, TokenError>,
    pub(crate) verified_tokens: Mutex<Vec<String>>,
}

impl MockCodec {
    pub(crate) fn accepting(user_id: &str, email: &str) -> Self {
        Self {
            sign_result: Ok("signed-token".to_string()),
            verify_result: Ok(SessionClaims::for_test(
                user_id,
                email,
                Utc::now() + Duration::days(7),
            )),
            verified_tokens: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn rejecting(error: TokenError) -> Self {
        Self {
            sign_result: Ok("signed-token".to_string()),
            verify_result: Err(error),
            verified_tokens: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing_to_sign(error: TokenError) -> Self {
        Self {
            sign_result: Err(error.clone()),
            verify_result: Err(error),
            verified_tokens: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn verify_count(&self) -> usize {
        self.verified_tokens.lock().unwrap().len()
    }
}

impl SessionTokenCodec for MockCodec {
    fn sign(&self, _user_id: &str, _email: &str) -> Result<String, TokenError> {
        self.sign_result.clone()
    }

    fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        self.verified_tokens.lock().unwrap().push(token.to_string());
        self.verify_result.clone()
    }
}

pub(crate) fn test_config(environment: Environment) -> SessionConfig {
    SessionConfig::new(TEST_SECRET, environment).unwrap()
}

pub(crate) fn mock_manager(
    codec: MockCodec,
    store: MockCookieStore,
) -> SessionManager<MockCodec, MockCookieStore> {
    let options = CookieOptions::for_session(&test_config(Environment::Development));
    SessionManager::with_parts(codec, store, options)
}

pub(crate) fn real_codec_manager(
    environment: Environment,
    store: MockCookieStore,
) -> SessionManager<TokenCodec, MockCookieStore> {
    let config = test_config(environment);
    let options = CookieOptions::for_session(&config);
    SessionManager::with_parts(TokenCodec::new(TEST_SECRET.as_bytes(), config.ttl), store, options)
}
