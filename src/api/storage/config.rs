//! Store configuration read from the environment.

use std::fmt;

pub const PROJECT_ID_VAR: &str = "FIREBASE_PROJECT_ID";
pub const PRIVATE_KEY_VAR: &str = "FIREBASE_PRIVATE_KEY";
pub const CLIENT_EMAIL_VAR: &str = "FIREBASE_CLIENT_EMAIL";
pub const EMULATOR_HOST_VAR: &str = "FIRESTORE_EMULATOR_HOST";
pub const STRICT_READS_VAR: &str = "CHARETTE_STRICT_READS";

/// Service-account credential triple for the document database.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub project_id: String,
    pub private_key: String,
    pub client_email: String,
}

impl Credentials {
    /// Build credentials only when all three parts are present and non-blank.
    ///
    /// Escaped `\n` sequences in the key (common when a PEM is pasted into a
    /// single-line env var) are expanded.
    pub fn from_parts(
        project_id: Option<String>,
        private_key: Option<String>,
        client_email: Option<String>,
    ) -> Option<Self> {
        let present = |part: Option<String>| {
            part.map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        Some(Self {
            project_id: present(project_id)?,
            private_key: present(private_key)?.replace("\\n", "\n"),
            client_email: present(client_email)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("project_id", &self.project_id)
            .field("private_key", &"<redacted>")
            .field("client_email", &self.client_email)
            .finish()
    }
}

/// What read operations do when the backend fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReadPolicy {
    /// Log the failure and return the empty result.
    #[default]
    Lenient,
    /// Return the error to the caller.
    Strict,
}

#[derive(Clone, Debug, Default)]
pub struct StoreConfig {
    /// `None` means persistent mode is never attempted.
    pub credentials: Option<Credentials>,
    pub read_policy: ReadPolicy,
    /// `host:port` of a local Firestore emulator.
    pub emulator_host: Option<String>,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup (env vars, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let strict = lookup(STRICT_READS_VAR)
            .map(|value| matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            credentials: Credentials::from_parts(
                lookup(PROJECT_ID_VAR),
                lookup(PRIVATE_KEY_VAR),
                lookup(CLIENT_EMAIL_VAR),
            ),
            read_policy: if strict {
                ReadPolicy::Strict
            } else {
                ReadPolicy::Lenient
            },
            emulator_host: lookup(EMULATOR_HOST_VAR).filter(|host| !host.trim().is_empty()),
        }
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_read_policy(mut self, read_policy: ReadPolicy) -> Self {
        self.read_policy = read_policy;
        self
    }
}
