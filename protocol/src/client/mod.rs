use crate::ParseError;

/// Action a player takes on their turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnAction {
    Attack,
    SwitchTo(String),
    Surrender,
}

impl TurnAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnAction::Attack => "attack",
            TurnAction::SwitchTo(_) => "switch",
            TurnAction::Surrender => "surrender",
        }
    }
}

/// Commands that clients can send to server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    /// register:NAME
    Register(String),

    /// startBattle:PLAYER|OPPONENT
    StartBattle { player: String, opponent: String },

    /// turn:PLAYER|attack, turn:PLAYER|switch|CREATURE, turn:PLAYER|surrender
    Turn { player: String, action: TurnAction },

    /// capture:PLAYER|CREATURE
    Capture { player: String, creature: String },

    /// donate:PLAYER|DONOR|RECIPIENT
    Donate {
        player: String,
        donor: String,
        recipient: String,
    },

    /// list:PLAYER
    ListRoster(String),
}

impl ClientCommand {
    /// Parse a request line of the form COMMAND:ARG|ARG|...
    ///
    /// Arguments may be separated by `|` or `:`. Parsing never has side
    /// effects; any shape error is reported as a [`ParseError`].
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(ParseError::EmptyMessage);
        }

        let (name, rest) = line.split_once(':').unwrap_or((line, ""));
        let args: Vec<&str> = if rest.is_empty() {
            Vec::new()
        } else {
            rest.split(['|', ':']).map(str::trim).collect()
        };

        Self::from_parts(name, &args)
    }

    /// Build a command from an already split name and argument list
    pub fn from_parts(name: &str, args: &[&str]) -> Result<Self, ParseError> {
        if let Some(pos) = args.iter().position(|a| a.is_empty()) {
            return Err(ParseError::MissingField(format!("argument {}", pos + 1)));
        }

        match name {
            "register" | "registerPlayer" => {
                expect_arity(name, args, 1)?;
                Ok(Self::Register(args[0].to_string()))
            }
            "startBattle" => {
                expect_arity(name, args, 2)?;
                Ok(Self::StartBattle {
                    player: args[0].to_string(),
                    opponent: args[1].to_string(),
                })
            }
            "turn" | "processBattleTurn" => parse_turn(name, args),
            "capture" | "capturePokemon" => {
                expect_arity(name, args, 2)?;
                Ok(Self::Capture {
                    player: args[0].to_string(),
                    creature: args[1].to_string(),
                })
            }
            "donate" | "destroyPokemon" => {
                expect_arity(name, args, 3)?;
                Ok(Self::Donate {
                    player: args[0].to_string(),
                    donor: args[1].to_string(),
                    recipient: args[2].to_string(),
                })
            }
            "list" | "listPokemon" => {
                expect_arity(name, args, 1)?;
                Ok(Self::ListRoster(args[0].to_string()))
            }
            _ => Err(ParseError::UnknownCommand(name.to_string())),
        }
    }

    /// The player on whose behalf the command is issued
    pub fn player(&self) -> &str {
        match self {
            Self::Register(player) | Self::ListRoster(player) => player,
            Self::StartBattle { player, .. }
            | Self::Turn { player, .. }
            | Self::Capture { player, .. }
            | Self::Donate { player, .. } => player,
        }
    }

    /// Serialize command to wire format
    pub fn to_wire_format(&self) -> String {
        match self {
            Self::Register(player) => format!("register:{}", player),
            Self::StartBattle { player, opponent } => {
                format!("startBattle:{}|{}", player, opponent)
            }
            Self::Turn { player, action } => match action {
                TurnAction::SwitchTo(creature) => format!("turn:{}|switch|{}", player, creature),
                other => format!("turn:{}|{}", player, other.as_str()),
            },
            Self::Capture { player, creature } => format!("capture:{}|{}", player, creature),
            Self::Donate {
                player,
                donor,
                recipient,
            } => format!("donate:{}|{}|{}", player, donor, recipient),
            Self::ListRoster(player) => format!("list:{}", player),
        }
    }
}

fn expect_arity(command: &str, args: &[&str], expected: usize) -> Result<(), ParseError> {
    if args.len() != expected {
        return Err(ParseError::WrongArity {
            command: command.to_string(),
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

fn parse_turn(name: &str, args: &[&str]) -> Result<ClientCommand, ParseError> {
    // turn:PLAYER|ACTION[|CREATURE]
    let (player, action) = match args {
        [player, action, ..] => (*player, *action),
        _ => return Err(ParseError::MissingField("turn action".to_string())),
    };

    let action = match action {
        "attack" => {
            expect_arity(name, args, 2)?;
            TurnAction::Attack
        }
        "surrender" => {
            expect_arity(name, args, 2)?;
            TurnAction::Surrender
        }
        "switch" => {
            expect_arity(name, args, 3)?;
            TurnAction::SwitchTo(args[2].to_string())
        }
        other => {
            return Err(ParseError::InvalidFormat(format!(
                "unknown turn action '{}'",
                other
            )));
        }
    };

    Ok(ClientCommand::Turn {
        player: player.to_string(),
        action,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_register() {
        assert_eq!(
            ClientCommand::parse("register:ash").unwrap(),
            ClientCommand::Register("ash".into())
        );
        assert_eq!(
            ClientCommand::parse("registerPlayer:ash").unwrap(),
            ClientCommand::Register("ash".into())
        );
    }

    #[test]
    fn test_parse_accepts_both_delimiters() {
        let expected = ClientCommand::StartBattle {
            player: "ash".into(),
            opponent: "gary".into(),
        };
        assert_eq!(ClientCommand::parse("startBattle:ash|gary").unwrap(), expected);
        assert_eq!(ClientCommand::parse("startBattle:ash:gary").unwrap(), expected);
    }

    #[test]
    fn test_parse_turn_actions() {
        assert_eq!(
            ClientCommand::parse("processBattleTurn:ash:attack").unwrap(),
            ClientCommand::Turn {
                player: "ash".into(),
                action: TurnAction::Attack
            }
        );
        assert_eq!(
            ClientCommand::parse("turn:ash|switch|pikachu").unwrap(),
            ClientCommand::Turn {
                player: "ash".into(),
                action: TurnAction::SwitchTo("pikachu".into())
            }
        );
        assert_eq!(
            ClientCommand::parse("turn:ash|surrender").unwrap(),
            ClientCommand::Turn {
                player: "ash".into(),
                action: TurnAction::Surrender
            }
        );
    }

    #[test]
    fn test_parse_switch_without_target() {
        let err = ClientCommand::parse("turn:ash|switch").unwrap_err();
        assert!(matches!(err, ParseError::WrongArity { expected: 3, got: 2, .. }));
    }

    #[test]
    fn test_parse_unknown_turn_action() {
        let err = ClientCommand::parse("turn:ash|dance").unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(_)));
    }

    #[test]
    fn test_parse_donate_aliases() {
        let expected = ClientCommand::Donate {
            player: "ash".into(),
            donor: "rattata".into(),
            recipient: "raticate".into(),
        };
        assert_eq!(
            ClientCommand::parse("destroyPokemon:ash|rattata|raticate").unwrap(),
            expected
        );
        assert_eq!(
            ClientCommand::parse("donate:ash|rattata|raticate").unwrap(),
            expected
        );
    }

    #[test]
    fn test_parse_wrong_arity() {
        let err = ClientCommand::parse("capture:ash").unwrap_err();
        assert_eq!(
            err,
            ParseError::WrongArity {
                command: "capture".into(),
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn test_parse_empty_argument() {
        let err = ClientCommand::parse("startBattle:ash|").unwrap_err();
        assert!(matches!(err, ParseError::MissingField(_)));
    }

    #[test]
    fn test_parse_unknown_and_empty() {
        assert_eq!(
            ClientCommand::parse("fly:ash").unwrap_err(),
            ParseError::UnknownCommand("fly".into())
        );
        assert_eq!(ClientCommand::parse("   ").unwrap_err(), ParseError::EmptyMessage);
        assert!(matches!(
            ClientCommand::parse("register").unwrap_err(),
            ParseError::WrongArity { got: 0, .. }
        ));
    }

    #[test]
    fn test_wire_format_parses_back() {
        let commands = [
            ClientCommand::Register("ash".into()),
            ClientCommand::Turn {
                player: "ash".into(),
                action: TurnAction::SwitchTo("bulbasaur".into()),
            },
            ClientCommand::Donate {
                player: "ash".into(),
                donor: "a".into(),
                recipient: "b".into(),
            },
        ];
        for cmd in commands {
            assert_eq!(ClientCommand::parse(&cmd.to_wire_format()).unwrap(), cmd);
        }
    }

    #[test]
    fn test_player() {
        let cmd = ClientCommand::parse("capture:misty|staryu").unwrap();
        assert_eq!(cmd.player(), "misty");
    }
}
