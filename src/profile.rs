use serde::{Deserialize, Serialize};

/// Represents a Git identity stored under a profile name in the profiles file
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    /// Git username (user.name)
    pub name: String,
    /// Git email address (user.email)
    pub email: String,
    /// Optional commit signing settings
    #[serde(default, skip_serializing_if = "Signing::is_empty")]
    pub signing: Signing,
}

/// Signing settings attached to a profile
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Signing {
    /// Signing key id, empty when unset
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key: String,
}

impl Signing {
    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }
}

impl Profile {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            signing: Signing::default(),
        }
    }

    pub fn with_signing_key(mut self, key: impl Into<String>) -> Self {
        self.signing.key = key.into();
        self
    }

    /// Signing key, if one is set
    pub fn signing_key(&self) -> Option<&str> {
        if self.signing.key.is_empty() {
            None
        } else {
            Some(&self.signing.key)
        }
    }
}
