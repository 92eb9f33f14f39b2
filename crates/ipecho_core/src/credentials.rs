//! Static username/password lookup loaded once at startup.
//!
//! The file format is one `username:password` record per line. Only the first
//! colon separates the fields, so passwords may themselves contain colons.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use secrecy::{ExposeSecret, SecretString};

use crate::{IpechoError, IpechoResult};

#[derive(Clone, Default)]
pub struct CredentialStore {
    users: HashMap<String, SecretString>,
}

impl CredentialStore {
    /// Read and parse a credential file. Fails when the file cannot be read or
    /// contains no usable records.
    pub fn load(path: impl AsRef<Path>) -> IpechoResult<Self> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|source| IpechoError::CredentialsIo {
                path: path.to_path_buf(),
                source,
            })?;

        let store = Self::parse(&contents);
        if store.is_empty() {
            return Err(IpechoError::NoCredentials {
                path: path.to_path_buf(),
            });
        }

        tracing::debug!(path = %path.display(), users = store.len(), "credentials loaded");
        Ok(store)
    }

    /// Parse records, skipping blank lines and lines without a colon.
    /// A later record for the same username replaces an earlier one.
    pub fn parse(contents: &str) -> Self {
        let users = contents
            .lines()
            .filter_map(|line| line.split_once(':'))
            .map(|(user, pass)| (user.trim(), pass.trim()))
            .map(|(user, pass)| (user.to_string(), SecretString::new(pass.into())))
            .collect();
        Self { users }
    }

    /// Exact comparison against the stored password. Not constant-time.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .is_some_and(|stored| stored.expose_secret() == password)
    }

    pub fn contains_user(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("users", &self.users.len())
            .finish()
    }
}
