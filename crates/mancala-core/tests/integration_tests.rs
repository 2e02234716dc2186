//! Integration tests for the Mancala rules engine.
//!
//! These tests play complete parties and check the documented scenarios.

use mancala_core::*;
use pretty_assertions::assert_eq;
use uuid::Uuid;

fn stones(board: &Board) -> Vec<u32> {
    board.pits().iter().map(Pit::stones).collect()
}

/// Play a party to the end with the given bots, checking stone conservation
/// after every move
fn play_out(mut party: Party, bots: &mut [Bot; 2], max_moves: usize) -> Party {
    let total = party.board().total_stones();
    let mut moves = 0;

    while !party.is_finished() && moves < max_moves {
        let player = party.turn_owner();
        let pit = bots[player.index()]
            .choose_move(&party)
            .expect("turn owner always has a move in an unfinished party");
        party = party.make_move(player, pit).unwrap();
        assert_eq!(party.board().total_stones(), total);
        moves += 1;
    }

    party
}

#[test]
fn test_opening_move_scenario() {
    let party = Party::start(Uuid::new_v4(), PartySettings::default()).unwrap();
    let next = party.make_move(Player::PlayerOne, 0).unwrap();

    assert_eq!(
        stones(next.board()),
        vec![0, 7, 7, 7, 7, 7, 1, 6, 6, 6, 6, 6, 6, 0]
    );
    assert_eq!(
        next.board().last_used_pit(),
        Some(Pit::store(Player::PlayerOne, 1))
    );
    assert_eq!(next.board().store_stones(Player::PlayerOne), 1);
}

#[test]
fn test_capture_scenario() {
    let board = Board::from_stones(&[4, 1, 0, 4, 4, 4], 0, &[4, 4, 4, 4, 4, 4], 0).unwrap();
    let next = board.make_move(Player::PlayerOne, 1).unwrap();

    assert_eq!(next.pit(2).unwrap().stones(), 0);
    assert_eq!(next.pit(10).unwrap().stones(), 0);
    assert_eq!(next.store_stones(Player::PlayerOne), 5);
}

#[test]
fn test_collapse_scenario() {
    let board = Board::from_stones(&[0, 0, 0, 0, 1, 0], 7, &[2, 2, 0, 1, 0, 3], 4).unwrap();
    let next = board.make_move(Player::PlayerOne, 4).unwrap();

    // the lone stone lands in empty house 5, whose opposite (7) holds 2
    assert!(next.is_finished());
    assert_eq!(next.store_stones(Player::PlayerOne), 10);
    assert_eq!(next.store_stones(Player::PlayerTwo), 10);
    assert_eq!(next.house_stones(Player::PlayerOne), 0);
    assert_eq!(next.house_stones(Player::PlayerTwo), 0);
}

#[test]
fn test_alternating_turns_without_extra_turn_rule() {
    let settings = PartySettings {
        rules: PartyRules {
            extra_turn_on_store: false,
        },
        ..PartySettings::default()
    };
    let mut party = Party::start(Uuid::new_v4(), settings).unwrap();
    let mut bots = [
        Bot::with_seed(Player::PlayerOne, BotDifficulty::Easy, 1),
        Bot::with_seed(Player::PlayerTwo, BotDifficulty::Easy, 2),
    ];

    for _ in 0..6 {
        if party.is_finished() {
            break;
        }
        let player = party.turn_owner();
        let pit = bots[player.index()].choose_move(&party).unwrap();
        let next = party.make_move(player, pit).unwrap();
        if !next.is_finished() {
            assert_eq!(next.turn_owner(), player.opponent());
        }
        party = next;
    }
}

#[test]
fn test_full_party_between_bots() {
    for seed in 0..10 {
        let party = Party::start(Uuid::new_v4(), PartySettings::default()).unwrap();
        let mut bots = [
            Bot::with_seed(Player::PlayerOne, BotDifficulty::Medium, seed),
            Bot::with_seed(Player::PlayerTwo, BotDifficulty::Easy, seed + 100),
        ];

        let party = play_out(party, &mut bots, 1_000);

        assert!(party.is_finished(), "party should end within 1000 moves");
        assert_eq!(party.status(), PartyStatus::Finished);
        assert_eq!(party.board().house_stones(Player::PlayerOne), 0);
        assert_eq!(party.board().house_stones(Player::PlayerTwo), 0);
        assert_eq!(
            party.board().store_stones(Player::PlayerOne)
                + party.board().store_stones(Player::PlayerTwo),
            72
        );
        assert!(party.outcome().is_some());
        assert!(matches!(
            party.make_move(party.turn_owner(), 0),
            Err(PartyError::GameOver)
        ));
    }
}

#[test]
fn test_small_board_party() {
    let settings = PartySettings {
        houses_per_player: 3,
        stones_per_house: 3,
        ..PartySettings::default()
    };
    let party = Party::start(Uuid::new_v4(), settings).unwrap();
    let mut bots = [
        Bot::with_seed(Player::PlayerOne, BotDifficulty::Hard, 5),
        Bot::with_seed(Player::PlayerTwo, BotDifficulty::Hard, 6),
    ];

    let party = play_out(party, &mut bots, 500);

    assert!(party.is_finished());
    assert_eq!(party.board().len(), 8);
    assert_eq!(party.board().total_stones(), 18);
}

#[test]
fn test_snapshot_survives_json() {
    let party = Party::start(Uuid::new_v4(), PartySettings::default())
        .unwrap()
        .make_move(Player::PlayerOne, 2)
        .unwrap();

    let json = serde_json::to_value(&party).unwrap();
    assert_eq!(json["turn_owner"], "PLAYER_TWO");
    assert_eq!(json["board"]["last_used_pit_index"], 8);

    let restored: Party = serde_json::from_value(json).unwrap();
    assert_eq!(restored, party);
}

#[test]
fn test_tampered_snapshot_is_rejected() {
    let party = Party::start(Uuid::new_v4(), PartySettings::default()).unwrap();
    let mut json = serde_json::to_value(&party).unwrap();
    json["board"]["pits"][6]["kind"] = "HOUSE".into();

    assert!(serde_json::from_value::<Party>(json).is_err());
}
