//! Command dispatcher: one request line in, one response line out

use std::sync::Arc;

use duel_battle::{Battle, Creature, experience};
use duel_protocol::{
    ClientCommand, DuelError, ErrorKind, Reply, ServerResponse, TurnAction, reply_to_wire,
};
use duel_team::{Catalog, RosterStore, StoreError};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::registry::SessionRegistry;

/// Largest payload a single UDP datagram can carry over IPv4
pub const MAX_RESPONSE: usize = 65_507;

pub struct Dispatcher {
    registry: SessionRegistry,
    store: Arc<dyn RosterStore>,
    catalog: Arc<Catalog>,
    max_response: usize,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn RosterStore>, catalog: Arc<Catalog>) -> Self {
        Self {
            registry: SessionRegistry::new(store.clone()),
            store,
            catalog,
            max_response: MAX_RESPONSE,
        }
    }

    /// Cap response size; longer replies are answered with an error instead
    pub fn with_max_response(mut self, max_response: usize) -> Self {
        self.max_response = max_response;
        self
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Parse and execute one request, returning the wire response
    pub async fn handle_line(&self, line: &str) -> String {
        let reply = match ClientCommand::parse(line) {
            Ok(command) => self.dispatch(command).await,
            Err(e) => {
                warn!(request = %line.trim(), err = %e, "malformed request");
                Err(e.into())
            }
        };
        let wire = reply_to_wire(&reply);
        if wire.len() > self.max_response {
            warn!(bytes = wire.len(), limit = self.max_response, "response exceeds one datagram");
            return DuelError::with_detail(ErrorKind::Storage, "response too large for one datagram")
                .to_wire_format();
        }
        wire
    }

    pub async fn dispatch(&self, command: ClientCommand) -> Reply {
        debug!(player = %command.player(), command = %command.to_wire_format(), "dispatching");
        let reply = match command {
            ClientCommand::Register(player) => self
                .registry
                .register(&player)
                .map(|()| ServerResponse::Registered)
                .map_err(DuelError::from),
            ClientCommand::StartBattle { player, opponent } => {
                self.start_battle(&player, &opponent).await
            }
            ClientCommand::Turn { player, action } => self.turn(&player, &action).await,
            ClientCommand::Capture { player, creature } => self.capture(&player, &creature).await,
            ClientCommand::Donate {
                player,
                donor,
                recipient,
            } => self.donate(&player, &donor, &recipient).await,
            ClientCommand::ListRoster(player) => self.list_roster(&player).await,
        };
        if let Err(e) = &reply {
            warn!(err = %e, category = ?e.category(), "request rejected");
        }
        reply
    }

    async fn start_battle(&self, player: &str, opponent: &str) -> Reply {
        let (battle_id, first_mover) = self.registry.begin_battle(player, opponent).await?;
        Ok(ServerResponse::Started {
            battle_id: battle_id.to_string(),
            first_mover,
        })
    }

    async fn turn(&self, player: &str, action: &TurnAction) -> Reply {
        let (id, battle) = self.registry.battle_for(player)?;
        let mut battle = battle.lock().await;

        let mut rng = StdRng::from_entropy();
        let outcome = battle.apply(player, action, &mut rng)?;
        debug!(battle = %id, player = %player, action = action.as_str(), ?outcome, "turn applied");

        // Both players stay mapped to the battle until their rosters are written
        if battle.is_concluded() {
            if let Some(share) = battle.award_experience(&mut rng) {
                info!(battle = %id, share, "experience awarded");
            }
            self.write_back(&battle).await;
            self.registry.end_battle(&id);
        }

        Ok(outcome.into())
    }

    /// Copy both battle snapshots back into their owners' rosters by name
    async fn write_back(&self, battle: &Battle) {
        for side in battle.sides() {
            let result: Result<(), StoreError> = async {
                let mut roster = self.store.load(&side.player).await?;
                for fought in side.committed() {
                    if let Some(slot) = roster.iter_mut().find(|c| c.name == fought.name) {
                        *slot = fought.clone();
                    }
                }
                self.store.save(&side.player, &roster).await
            }
            .await;

            if let Err(e) = result {
                warn!(battle = %battle.id(), player = %side.player, err = %e, "roster write-back failed");
            }
        }
    }

    fn require_registered(&self, player: &str) -> Result<(), DuelError> {
        if !self.registry.is_registered(player) {
            return Err(DuelError::with_detail(ErrorKind::UnknownPlayer, player));
        }
        Ok(())
    }

    async fn capture(&self, player: &str, name: &str) -> Reply {
        self.require_registered(player)?;
        let creature: Creature = self
            .catalog
            .instantiate(name)
            .ok_or_else(|| DuelError::with_detail(ErrorKind::CreatureCatalogMiss, name))?;

        let mut roster = self.store.load(player).await?;
        if roster.iter().any(|c| c.name == creature.name) {
            return Err(DuelError::with_detail(ErrorKind::AlreadyCaptured, name));
        }
        roster.push(creature);
        self.store.save(player, &roster).await?;

        info!(player = %player, creature = %name, "creature captured");
        Ok(ServerResponse::Captured(name.to_string()))
    }

    async fn donate(&self, player: &str, donor: &str, recipient: &str) -> Reply {
        self.require_registered(player)?;
        if self.registry.in_battle(player) {
            return Err(DuelError::with_detail(ErrorKind::AlreadyInBattle, player));
        }

        let mut roster = self.store.load(player).await?;
        let mut rng = StdRng::from_entropy();
        let donation = experience::donate(&mut roster, donor, recipient, &mut rng)?;
        self.store.save(player, &roster).await?;

        info!(
            player = %player,
            donor = %donor,
            recipient = %recipient,
            transferred = donation.transferred,
            levels = donation.levels_gained,
            "experience donated"
        );
        Ok(ServerResponse::Transferred(donation.transferred))
    }

    async fn list_roster(&self, player: &str) -> Reply {
        self.require_registered(player)?;
        let roster = self.store.load(player).await?;
        Ok(ServerResponse::Roster(
            roster.iter().map(Creature::summary).collect(),
        ))
    }
}
