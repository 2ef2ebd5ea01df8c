use std::sync::Arc;
use std::time::Duration;

use duel_client::{DuelClient, ErrorKind, ServerResponse};
use duel_server::{Dispatcher, transport};
use duel_team::{Catalog, JsonRosterStore, RosterStore};

const POKEDEX: &str = r#"[
    {"name": "bulbasaur", "type": ["grass", "poison"], "base_exp": 64, "stats": [
        {"name": "hp", "value": 45}, {"name": "attack", "value": 49},
        {"name": "defense", "value": 49}, {"name": "special-attack", "value": 65},
        {"name": "special-defense", "value": 65}, {"name": "speed", "value": 45}]},
    {"name": "oddish", "type": ["grass", "poison"], "base_exp": 64, "stats": [
        {"name": "hp", "value": 45}, {"name": "attack", "value": 50},
        {"name": "defense", "value": 55}, {"name": "special-attack", "value": 75},
        {"name": "special-defense", "value": 65}, {"name": "speed", "value": 30}]},
    {"name": "bellsprout", "type": ["grass", "poison"], "base_exp": 60, "stats": [
        {"name": "hp", "value": 50}, {"name": "attack", "value": 75},
        {"name": "defense", "value": 35}, {"name": "special-attack", "value": 70},
        {"name": "special-defense", "value": 30}, {"name": "speed", "value": 40}]}
]"#;

async fn start_test_server(roster_dir: &std::path::Path) -> std::net::SocketAddr {
    let catalog = Arc::new(Catalog::from_json(POKEDEX).unwrap());
    let store: Arc<dyn RosterStore> = Arc::new(JsonRosterStore::new(roster_dir));
    let dispatcher = Arc::new(Dispatcher::new(store, catalog));

    let socket = transport::bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
    let addr = socket.local_addr().unwrap();
    tokio::spawn(async move {
        transport::serve(socket, dispatcher).await.unwrap();
    });

    addr
}

async fn client(addr: std::net::SocketAddr) -> DuelClient {
    DuelClient::connect(addr)
        .await
        .unwrap()
        .with_timeout(Duration::from_secs(5))
}

async fn trainer(client: &mut DuelClient, player: &str) {
    assert_eq!(
        client.register(player).await.unwrap(),
        Ok(ServerResponse::Registered)
    );
    for creature in ["bulbasaur", "oddish", "bellsprout"] {
        assert_eq!(
            client.capture(player, creature).await.unwrap(),
            Ok(ServerResponse::Captured(creature.into()))
        );
    }
}

#[tokio::test]
async fn test_malformed_datagram() {
    let dir = tempfile::tempdir().unwrap();
    let addr = start_test_server(dir.path()).await;
    let mut client = client(addr).await;

    let err = client.request_raw("teleport:ash").await.unwrap().unwrap_err();
    assert_eq!(err.kind, ErrorKind::Malformed);
}

#[tokio::test]
async fn test_full_battle_over_udp() {
    let dir = tempfile::tempdir().unwrap();
    let addr = start_test_server(dir.path()).await;
    let mut ash = client(addr).await;
    let mut gary = client(addr).await;

    trainer(&mut ash, "ash").await;
    trainer(&mut gary, "gary").await;
    assert!(dir.path().join("ash_pokemon.json").exists());

    let Ok(ServerResponse::Started { first_mover, .. }) =
        ash.start_battle("ash", "gary").await.unwrap()
    else {
        panic!("battle did not start");
    };
    assert_eq!(first_mover, "ash");

    let err = gary.attack("gary").await.unwrap().unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotYourTurn);

    assert_eq!(
        ash.switch("ash", "bellsprout").await.unwrap(),
        Ok(ServerResponse::Switched("bellsprout".into()))
    );
    assert!(matches!(
        gary.attack("gary").await.unwrap(),
        Ok(ServerResponse::Damage { .. } | ServerResponse::Fainted(_))
    ));
    assert_eq!(
        ash.surrender("ash").await.unwrap(),
        Ok(ServerResponse::Won("gary".into()))
    );

    // Damage taken in battle is persisted
    let Ok(ServerResponse::Roster(roster)) = ash.list_roster("ash").await.unwrap() else {
        panic!("expected roster");
    };
    let bellsprout = roster.iter().find(|c| c.name == "bellsprout").unwrap();
    assert!(bellsprout.hp < bellsprout.max_hp);

    // Donation between creatures sharing a type
    assert_eq!(
        ash.donate("ash", "oddish", "bulbasaur").await.unwrap(),
        Ok(ServerResponse::Transferred(0))
    );
    let Ok(ServerResponse::Roster(roster)) = ash.list_roster("ash").await.unwrap() else {
        panic!("expected roster");
    };
    assert_eq!(roster.len(), 2);
}
