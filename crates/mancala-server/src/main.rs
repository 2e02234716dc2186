//! Mancala party runner.
//!
//! Creates a party through the party service and lets two bots play it out.

use anyhow::anyhow;
use mancala_core::{Bot, Outcome, Player};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod repository;
mod service;

use config::PartyConfig;
use repository::InMemoryPartyRepository;
use service::PartyService;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = PartyConfig::from_env()?;
    info!(?config, "Starting Mancala party runner...");

    let service = PartyService::new(config, InMemoryPartyRepository::new());
    let mut party = service.create_party()?;
    let mut bots = Player::ALL.map(|player| Bot::new(player, config.bot_difficulty));

    while !party.is_finished() {
        let player = party.turn_owner();
        let pit = bots[player.index()]
            .choose_move(&party)
            .ok_or_else(|| anyhow!("{player} has no move in an unfinished party"))?;
        party = service.player_move(party.id(), player, pit)?;
    }

    let party = service.find_party(party.id())?;
    let board = party.board();
    let (one, two) = (
        board.store_stones(Player::PlayerOne),
        board.store_stones(Player::PlayerTwo),
    );
    match party.outcome() {
        Some(Outcome::Winner(winner)) => info!("{winner} wins {one} to {two}"),
        Some(Outcome::Draw) => info!("Draw at {one} each"),
        None => {}
    }

    Ok(())
}
