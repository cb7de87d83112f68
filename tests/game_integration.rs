//! Full-game integration tests

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use traitors_solo::core::config::Tuning;
use traitors_solo::core::error::TraitorsError;
use traitors_solo::core::types::PlayerId;
use traitors_solo::game::{GameController, GameEvent, Phase};
use traitors_solo::roster::{Player, Role};

fn seat(id: u32, role: Role, suspicion: f64) -> Player {
    let mut p = Player::new(PlayerId(id), format!("P{}", id), id == 0);
    p.role = role;
    p.suspicion = suspicion;
    p
}

fn deterministic(roster: Vec<Player>) -> GameController {
    let mut controller =
        GameController::new(Tuning::deterministic_ai(), ChaCha8Rng::seed_from_u64(2024)).unwrap();
    controller.load_roster(roster).unwrap();
    while controller.phase() == Phase::Reveal {
        controller.advance_reveal().unwrap();
    }
    controller
}

#[test]
fn test_scripted_game_ends_in_traitor_win() {
    let mut game = deterministic(vec![
        seat(0, Role::Faithful, 0.0),
        seat(1, Role::Traitor, 0.3),
        seat(2, Role::Faithful, 0.9),
        seat(3, Role::Faithful, 0.6),
    ]);

    // night 1: the most suspected faithful goes
    assert_eq!(game.phase(), Phase::Day);
    assert_eq!(game.state().round, 1);
    assert_eq!(game.state().night_kill, Some(PlayerId(2)));
    assert!(!game.state().player(PlayerId(2)).unwrap().alive);
    assert!(game.state().votes_cleared());

    game.start_vote().unwrap();
    assert!(game.state().votes_cleared());
    let request = game.state().pending_human_vote().unwrap();
    let ids: Vec<PlayerId> = request.candidates.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![PlayerId(1), PlayerId(3)]);

    game.submit_human_vote(PlayerId(3)).unwrap();

    let state = game.state();
    assert!(!state.player(PlayerId(3)).unwrap().alive);
    assert!(state.votes_cleared());
    assert_eq!(state.phase, Phase::Ended);
    let outcome = state.outcome.as_ref().unwrap();
    assert_eq!(outcome.winner, Role::Traitor);

    let banished: Vec<PlayerId> = state
        .history
        .iter()
        .filter_map(|e| match &e.event {
            GameEvent::Banished { player } => Some(player.id),
            _ => None,
        })
        .collect();
    assert_eq!(banished, vec![PlayerId(3)]);
    assert!(matches!(
        state.history.last().map(|e| &e.event),
        Some(GameEvent::GameOver { winner: Role::Traitor, .. })
    ));
}

#[test]
fn test_later_voters_see_earlier_votes() {
    // random suspicion drift switched off so only vote weights move scores
    let tuning = Tuning {
        night_survivor_bump_max: 0.0,
        traitor_night_decay: 0.0,
        banishment_bump_max: 0.0,
        ..Tuning::deterministic_ai()
    };
    let mut game = GameController::new(tuning, ChaCha8Rng::seed_from_u64(8)).unwrap();
    game.load_roster(vec![
        seat(0, Role::Faithful, 0.0),
        seat(1, Role::Traitor, 0.0),
        seat(2, Role::Faithful, 0.50),
        seat(3, Role::Faithful, 0.55),
        seat(4, Role::Faithful, 0.1),
        seat(5, Role::Faithful, 0.95),
    ])
    .unwrap();
    while game.phase() == Phase::Reveal {
        game.advance_reveal().unwrap();
    }
    assert_eq!(game.state().night_kill, Some(PlayerId(5)));

    // p3 leads p2 until the human's vote lifts p2 to 0.58
    game.start_vote().unwrap();
    game.submit_human_vote(PlayerId(2)).unwrap();

    let votes: Vec<(PlayerId, PlayerId)> = game
        .state()
        .history
        .entries_for_round(1)
        .filter_map(|e| match &e.event {
            GameEvent::VoteCast { voter, target, .. } => Some((voter.id, target.id)),
            _ => None,
        })
        .collect();
    assert_eq!(
        votes,
        vec![
            (PlayerId(0), PlayerId(2)),
            (PlayerId(1), PlayerId(2)),
            (PlayerId(2), PlayerId(3)),
            (PlayerId(3), PlayerId(2)),
            (PlayerId(4), PlayerId(2)),
        ]
    );
    assert!(!game.state().player(PlayerId(2)).unwrap().alive);
}

#[test]
fn test_banishing_last_traitor_wins_for_faithful() {
    let mut game = deterministic(vec![
        seat(0, Role::Faithful, 0.0),
        seat(1, Role::Traitor, 0.95),
        seat(2, Role::Faithful, 0.9),
        seat(3, Role::Faithful, 0.2),
        seat(4, Role::Faithful, 0.1),
    ]);
    assert_eq!(game.state().night_kill, Some(PlayerId(2)));

    game.start_vote().unwrap();
    game.submit_human_vote(PlayerId(1)).unwrap();

    let state = game.state();
    assert_eq!(state.phase, Phase::Ended);
    assert!(!state.player(PlayerId(1)).unwrap().alive);
    assert_eq!(state.outcome.as_ref().unwrap().winner, Role::Faithful);
    assert_eq!(state.alive_count(), 3);
}

#[test]
fn test_roster_without_traitors_ends_on_first_night() {
    let game = deterministic(vec![
        seat(0, Role::Faithful, 0.0),
        seat(1, Role::Faithful, 0.1),
        seat(2, Role::Faithful, 0.1),
        seat(3, Role::Faithful, 0.1),
    ]);

    let state = game.state();
    assert_eq!(state.phase, Phase::Ended);
    assert_eq!(state.round, 1);
    assert_eq!(state.alive_count(), 4);
    assert_eq!(state.outcome.as_ref().unwrap().winner, Role::Faithful);
}

#[test]
fn test_traitor_win_on_the_night_kill() {
    let game = deterministic(vec![
        seat(0, Role::Traitor, 0.0),
        seat(1, Role::Faithful, 0.5),
        seat(2, Role::Faithful, 0.4),
        seat(3, Role::Traitor, 0.1),
    ]);

    // both traitors go for p1, leaving two traitors against one faithful
    let state = game.state();
    assert_eq!(state.phase, Phase::Ended);
    assert_eq!(state.night_kill, Some(PlayerId(1)));
    assert_eq!(state.outcome.as_ref().unwrap().winner, Role::Traitor);
}

#[test]
fn test_rejected_vote_keeps_game_parked() {
    let mut game = deterministic(vec![
        seat(0, Role::Faithful, 0.0),
        seat(1, Role::Traitor, 0.3),
        seat(2, Role::Faithful, 0.9),
        seat(3, Role::Faithful, 0.6),
    ]);
    game.start_vote().unwrap();
    let before = game.state().clone();

    let err = game.submit_human_vote(PlayerId(2)).unwrap_err();
    assert!(matches!(err, TraitorsError::InvalidChoice { target: PlayerId(2), .. }));
    assert!(err.is_recoverable());
    assert_eq!(game.state(), &before);
}

#[test]
fn test_same_seed_same_game() {
    let play = |seed: u64| {
        let mut game = GameController::with_seed(seed);
        game.start_game(7, "Quinn").unwrap();
        for _ in 0..200 {
            match game.phase() {
                Phase::Reveal => game.advance_reveal().unwrap(),
                Phase::Day => game.start_vote().unwrap(),
                Phase::Vote => {
                    let pick = game.state().pending_human_vote().unwrap().candidates[0].id;
                    game.submit_human_vote(pick).unwrap();
                }
                _ => break,
            }
        }
        let state = game.state().clone();
        let roles: Vec<Role> = state.players.iter().map(|p| p.role).collect();
        let lines: Vec<String> = state.history.iter().map(|e| e.to_string()).collect();
        (roles, lines)
    };

    assert_eq!(play(31), play(31));
}
