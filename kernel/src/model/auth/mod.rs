pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(pub String);

impl AccessToken {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }
}

/// Single-use tokens mailed to a member; each kind lives in its own key space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OneTimeTokenKind {
    EmailVerification,
    PasswordReset,
}

impl OneTimeTokenKind {
    pub fn prefix(self) -> &'static str {
        match self {
            OneTimeTokenKind::EmailVerification => "verify",
            OneTimeTokenKind::PasswordReset => "reset",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneTimeToken {
    pub kind: OneTimeTokenKind,
    pub value: String,
}

impl OneTimeToken {
    pub fn generate(kind: OneTimeTokenKind) -> Self {
        Self {
            kind,
            value: uuid::Uuid::new_v4().simple().to_string(),
        }
    }
}
