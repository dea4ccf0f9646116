use super::session::SESSION_ID;

/// The only account the stub knows about.
const USERNAME: &str = "UMU";

/// Plaintext password accepted by the `Password` scheme.
const PASSWORD: &str = "123456";

/// Pre-shared hash accepted by the `Hash` scheme.
const PASSWORD_HASH: &str = "207cf410532f92a47dee245ce9b11ff71f578ebd763eb3bbea44ebd043d018fb";

/// Selects how `Credential::datum` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialScheme {
    /// `data` is the plaintext password.
    Password,
    /// `data` is the pre-shared password hash.
    Hash,
    /// `data` is a session id from an earlier login.
    Session,
}

impl CredentialScheme {
    /// Map the wire `type` value onto a scheme.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Password),
            1 => Some(Self::Hash),
            2 => Some(Self::Session),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Self::Password => 0,
            Self::Hash => 1,
            Self::Session => 2,
        }
    }

    fn expected_datum(self) -> &'static str {
        match self {
            Self::Password => PASSWORD,
            Self::Hash => PASSWORD_HASH,
            Self::Session => SESSION_ID,
        }
    }
}

/// A (username, scheme, datum) triple presented by a login call.
#[derive(Debug, Clone, Copy)]
pub struct Credential<'a> {
    pub scheme: CredentialScheme,
    pub username: Option<&'a str>,
    pub datum: Option<&'a str>,
}

impl<'a> Credential<'a> {
    pub fn new(
        scheme: CredentialScheme,
        username: Option<&'a str>,
        datum: Option<&'a str>,
    ) -> Self {
        Self {
            scheme,
            username,
            datum,
        }
    }

    /// True when both username and datum equal the scheme's literals.
    /// Missing fields never match.
    pub fn is_accepted(&self) -> bool {
        self.username == Some(USERNAME) && self.datum == Some(self.scheme.expected_datum())
    }
}

// ============================================================================
// Tests
// ============================================================================
