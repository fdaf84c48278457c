use engine::api::{run_scripted_duel, DuelScript, ScriptPlayer};
use engine::content::builtin_scripts;
use engine::Move;

#[test]
fn builtin_script_smoke() {
    let json = builtin_scripts()["best_of_three"];
    let script: DuelScript = serde_json::from_str(json).expect("builtin parses");
    let report = run_scripted_duel(&script).expect("duel ran");

    assert_eq!(report.winner.as_deref(), Some("Rockfall"));
    assert_eq!(report.loser.as_deref(), Some("Papercut"));
    assert_eq!(report.rounds, 3);
    assert_eq!(report.beat_counts, [2, 0]);
    assert!(report.log.iter().any(|l| l.starts_with("[MATCH]")));
}

#[test]
fn extra_rounds_after_the_match_are_ignored() {
    let script = DuelScript {
        player_a: ScriptPlayer {
            id: 1,
            name: "Alice".to_string(),
        },
        player_b: ScriptPlayer {
            id: 2,
            name: "Bob".to_string(),
        },
        rounds: vec![
            [Move::Rock, Move::Scissors],
            [Move::Rock, Move::Scissors],
            [Move::Paper, Move::Scissors],
        ],
        win_threshold: None,
    };
    let report = run_scripted_duel(&script).expect("duel ran");
    assert_eq!(report.rounds, 2);
    assert_eq!(report.winner.as_deref(), Some("Alice"));
}

#[test]
fn exhausted_script_is_an_error() {
    let script = DuelScript {
        player_a: ScriptPlayer {
            id: 1,
            name: "Alice".to_string(),
        },
        player_b: ScriptPlayer {
            id: 2,
            name: "Bob".to_string(),
        },
        // One round win is not enough for best-of-three.
        rounds: vec![[Move::Rock, Move::Scissors]],
        win_threshold: None,
    };
    let err = run_scripted_duel(&script).unwrap_err();
    assert!(err.to_string().contains("without a decisive result"));
}

#[test]
fn threshold_one_tie_reports_a_draw() {
    let script = DuelScript {
        player_a: ScriptPlayer {
            id: 1,
            name: "Alice".to_string(),
        },
        player_b: ScriptPlayer {
            id: 2,
            name: "Bob".to_string(),
        },
        rounds: vec![[Move::Paper, Move::Paper]],
        win_threshold: Some(1),
    };
    let report = run_scripted_duel(&script).expect("duel ran");
    assert_eq!(report.winner, None);
    assert!(report.summary.is_tie);
}
