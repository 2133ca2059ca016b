//! Detached-signature settings.

use std::fmt;
use std::time::Duration;

/// Executable invoked when no other is configured.
pub const DEFAULT_GPG_EXECUTABLE: &str = "gpg";

/// Configuration for the external signing tool.
///
/// Signing is enabled by default. Disabling it is never an error: the signer
/// logs that it skipped the file and returns.
#[derive(Clone)]
pub struct SigningSettings {
    /// Whether staged files are signed.
    pub enabled: bool,

    /// Passphrase for the signing key. When set, the tool runs non-interactively.
    pub passphrase: Option<String>,

    /// Program name or path of the signing tool.
    pub executable: String,

    /// Key to sign with (`--local-user`). The tool's default key when `None`.
    pub key_name: Option<String>,

    /// Upper bound on a single signing invocation. Waits indefinitely when `None`.
    pub timeout: Option<Duration>,
}

impl Default for SigningSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            passphrase: None,
            executable: DEFAULT_GPG_EXECUTABLE.to_string(),
            key_name: None,
            timeout: None,
        }
    }
}

impl SigningSettings {
    /// Settings with signing turned off.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Returns the passphrase if one is configured and non-empty.
    pub fn passphrase(&self) -> Option<&str> {
        self.passphrase.as_deref().filter(|p| !p.is_empty())
    }
}

impl fmt::Debug for SigningSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningSettings")
            .field("enabled", &self.enabled)
            .field("passphrase", &self.passphrase.as_ref().map(|_| "<redacted>"))
            .field("executable", &self.executable)
            .field("key_name", &self.key_name)
            .field("timeout", &self.timeout)
            .finish()
    }
}
