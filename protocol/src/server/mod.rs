mod roster;

pub use roster::CreatureSummary;

use crate::{DuelError, ErrorKind, ParseError};
use anyhow::Result;

/// Successful outcome of a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerResponse {
    Registered,
    Started { battle_id: String, first_mover: String },
    Damage { damage: u32, remaining_hp: u32 },
    Fainted(String),
    Won(String),
    Switched(String),
    Captured(String),
    Transferred(u32),
    Roster(Vec<CreatureSummary>),
}

/// What the server answers to every request
pub type Reply = std::result::Result<ServerResponse, DuelError>;

impl ServerResponse {
    /// Serialize to wire format
    pub fn to_wire_format(&self) -> String {
        match self {
            Self::Registered => "registered".to_string(),
            Self::Started {
                battle_id,
                first_mover,
            } => format!("started:{}:{}", battle_id, first_mover),
            Self::Damage {
                damage,
                remaining_hp,
            } => format!("damage:{}:{}", damage, remaining_hp),
            Self::Fainted(name) => format!("fainted:{}", name),
            Self::Won(name) => format!("won:{}", name),
            Self::Switched(name) => format!("switched:{}", name),
            Self::Captured(name) => format!("captured:{}", name),
            Self::Transferred(exp) => format!("transferred:{}", exp),
            Self::Roster(creatures) => format!(
                "roster:{}",
                serde_json::to_string(creatures).unwrap_or_else(|_| "[]".to_string())
            ),
        }
    }
}

/// Serialize a reply, success or failure, to wire format
pub fn reply_to_wire(reply: &Reply) -> String {
    match reply {
        Ok(response) => response.to_wire_format(),
        Err(err) => err.to_wire_format(),
    }
}

/// Parse a single response datagram into a Reply
pub fn parse_reply(line: &str) -> Result<Reply> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ParseError::EmptyMessage.into());
    }

    if line == "registered" {
        return Ok(Ok(ServerResponse::Registered));
    }

    let (tag, rest) = line
        .split_once(':')
        .ok_or_else(|| ParseError::InvalidFormat(line.to_string()))?;

    match tag {
        "error" => parse_error(rest).map(Err),
        "roster" => {
            let creatures: Vec<CreatureSummary> = serde_json::from_str(rest)?;
            Ok(Ok(ServerResponse::Roster(creatures)))
        }
        "started" => {
            let (battle_id, first_mover) = rest
                .split_once(':')
                .ok_or_else(|| ParseError::MissingField("first mover".to_string()))?;
            Ok(Ok(ServerResponse::Started {
                battle_id: battle_id.to_string(),
                first_mover: first_mover.to_string(),
            }))
        }
        "damage" => {
            let (damage, remaining_hp) = rest
                .split_once(':')
                .ok_or_else(|| ParseError::MissingField("remaining hp".to_string()))?;
            Ok(Ok(ServerResponse::Damage {
                damage: parse_number(damage)?,
                remaining_hp: parse_number(remaining_hp)?,
            }))
        }
        "transferred" => Ok(Ok(ServerResponse::Transferred(parse_number(rest)?))),
        "fainted" => Ok(Ok(ServerResponse::Fainted(non_empty(rest)?))),
        "won" => Ok(Ok(ServerResponse::Won(non_empty(rest)?))),
        "switched" => Ok(Ok(ServerResponse::Switched(non_empty(rest)?))),
        "captured" => Ok(Ok(ServerResponse::Captured(non_empty(rest)?))),
        _ => Err(ParseError::InvalidFormat(format!("unknown response '{}'", tag)).into()),
    }
}

fn parse_error(rest: &str) -> Result<DuelError> {
    // error:KIND or error:KIND:DETAIL, DETAIL may itself contain ':'
    let (kind, detail) = match rest.split_once(':') {
        Some((kind, detail)) => (kind, Some(detail)),
        None => (rest, None),
    };

    let kind = ErrorKind::parse(kind)
        .ok_or_else(|| ParseError::InvalidFormat(format!("unknown error kind '{}'", kind)))?;

    Ok(match detail {
        Some(detail) => DuelError::with_detail(kind, detail),
        None => DuelError::new(kind),
    })
}

fn parse_number(s: &str) -> Result<u32> {
    s.parse()
        .map_err(|_| ParseError::InvalidFormat(format!("expected a number, got '{}'", s)).into())
}

fn non_empty(s: &str) -> Result<String> {
    if s.is_empty() {
        return Err(ParseError::MissingField("name".to_string()).into());
    }
    Ok(s.to_string())
}
