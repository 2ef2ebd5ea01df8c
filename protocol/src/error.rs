//! Error taxonomy shared by the server and its clients
//!
//! Every failure the service can report is one [`ErrorKind`], optionally
//! carrying a short detail (the player or creature concerned). On the wire an
//! error is `error:<Kind>` or `error:<Kind>:<detail>`.

use crate::ParseError;

/// Broad class of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Player, creature or battle absent
    NotFound,
    /// Already registered, already in battle, not your turn
    Conflict,
    /// Insufficient roster, type mismatch
    Precondition,
    /// Bad argument shape
    Malformed,
    /// Roster storage failure
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    AlreadyRegistered,
    UnknownPlayer,
    AlreadyInBattle,
    InsufficientRoster,
    NotYourTurn,
    CreatureNotFound,
    CreatureCatalogMiss,
    TypeMismatch,
    AlreadyCaptured,
    BattleNotFound,
    Malformed,
    Storage,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 12] = [
        ErrorKind::AlreadyRegistered,
        ErrorKind::UnknownPlayer,
        ErrorKind::AlreadyInBattle,
        ErrorKind::InsufficientRoster,
        ErrorKind::NotYourTurn,
        ErrorKind::CreatureNotFound,
        ErrorKind::CreatureCatalogMiss,
        ErrorKind::TypeMismatch,
        ErrorKind::AlreadyCaptured,
        ErrorKind::BattleNotFound,
        ErrorKind::Malformed,
        ErrorKind::Storage,
    ];

    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorKind::UnknownPlayer
            | ErrorKind::CreatureNotFound
            | ErrorKind::CreatureCatalogMiss
            | ErrorKind::BattleNotFound => ErrorCategory::NotFound,
            ErrorKind::AlreadyRegistered
            | ErrorKind::AlreadyInBattle
            | ErrorKind::NotYourTurn
            | ErrorKind::AlreadyCaptured => ErrorCategory::Conflict,
            ErrorKind::InsufficientRoster | ErrorKind::TypeMismatch => {
                ErrorCategory::Precondition
            }
            ErrorKind::Malformed => ErrorCategory::Malformed,
            ErrorKind::Storage => ErrorCategory::Internal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::AlreadyRegistered => "AlreadyRegistered",
            ErrorKind::UnknownPlayer => "UnknownPlayer",
            ErrorKind::AlreadyInBattle => "AlreadyInBattle",
            ErrorKind::InsufficientRoster => "InsufficientRoster",
            ErrorKind::NotYourTurn => "NotYourTurn",
            ErrorKind::CreatureNotFound => "CreatureNotFound",
            ErrorKind::CreatureCatalogMiss => "CreatureCatalogMiss",
            ErrorKind::TypeMismatch => "TypeMismatch",
            ErrorKind::AlreadyCaptured => "AlreadyCaptured",
            ErrorKind::BattleNotFound => "BattleNotFound",
            ErrorKind::Malformed => "Malformed",
            ErrorKind::Storage => "Storage",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed request, as reported to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuelError {
    pub kind: ErrorKind,
    pub detail: Option<String>,
}

impl DuelError {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, detail: None }
    }

    pub fn with_detail(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: Some(detail.into()),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Serialize to wire format: error:KIND or error:KIND:DETAIL
    pub fn to_wire_format(&self) -> String {
        match &self.detail {
            Some(detail) => format!("error:{}:{}", self.kind, detail),
            None => format!("error:{}", self.kind),
        }
    }
}

impl std::fmt::Display for DuelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}: {}", self.kind, detail),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for DuelError {}

impl From<ErrorKind> for DuelError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<ParseError> for DuelError {
    fn from(err: ParseError) -> Self {
        Self::with_detail(ErrorKind::Malformed, err.to_string())
    }
}
