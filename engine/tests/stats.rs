use engine::{MatchSummary, Participant, ParticipantId, PlayerStats, StatsStore, XP_REWARD};
use tempfile::tempdir;

fn decisive(winner: Participant, loser: Participant) -> MatchSummary {
    MatchSummary {
        participants: [winner.clone(), loser.clone()],
        is_tie: false,
        winner: Some(winner),
        loser: Some(loser),
    }
}

fn tied(a: Participant, b: Participant) -> MatchSummary {
    MatchSummary {
        participants: [a, b],
        is_tie: true,
        winner: None,
        loser: None,
    }
}

#[test]
fn lazy_record_starts_zeroed() {
    let dir = tempdir().unwrap();
    let mut store = StatsStore::load(dir.path().join("players.json")).unwrap();
    assert!(store.is_empty());
    let record = store.stats(ParticipantId(1), "Alice");
    assert_eq!(
        record,
        &PlayerStats {
            username: "Alice".to_string(),
            ..PlayerStats::default()
        }
    );
    assert_eq!(store.len(), 1);
}

#[test]
fn decisive_result_moves_all_counters() {
    let dir = tempdir().unwrap();
    let mut store = StatsStore::load(dir.path().join("players.json")).unwrap();
    store.record_result(&decisive(
        Participant::new(1, "Alice"),
        Participant::new(2, "Bob"),
    ));

    let alice = store.get(ParticipantId(1)).unwrap();
    assert_eq!((alice.wins, alice.losses, alice.games), (1, 0, 1));
    assert_eq!(alice.xp, XP_REWARD);

    let bob = store.get(ParticipantId(2)).unwrap();
    assert_eq!((bob.wins, bob.losses, bob.games), (0, 1, 1));
    assert_eq!(bob.xp, 0);
}

#[test]
fn tie_awards_no_xp() {
    let dir = tempdir().unwrap();
    let mut store = StatsStore::load(dir.path().join("players.json")).unwrap();
    store.record_result(&tied(
        Participant::new(1, "Alice"),
        Participant::new(2, "Bob"),
    ));

    for id in [1, 2] {
        let record = store.get(ParticipantId(id)).unwrap();
        assert_eq!((record.wins, record.losses), (0, 0));
        assert_eq!(record.ties, 1);
        assert_eq!(record.games, 1);
        assert_eq!(record.xp, 0);
    }
}

#[test]
fn self_play_lands_on_one_record() {
    let dir = tempdir().unwrap();
    let mut store = StatsStore::load(dir.path().join("players.json")).unwrap();
    let me = Participant::new(7, "Solo");
    store.record_result(&decisive(me.clone(), me));

    assert_eq!(store.len(), 1);
    let record = store.get(ParticipantId(7)).unwrap();
    assert_eq!(record.games, 2, "both slots count as a played game");
    assert_eq!((record.wins, record.losses), (1, 1));
    assert_eq!(record.xp, XP_REWARD);
}

#[test]
fn results_survive_a_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("players.json");

    let mut store = StatsStore::load(&path).unwrap();
    store.record_result(&decisive(
        Participant::new(1, "Alice"),
        Participant::new(2, "Bob"),
    ));
    store.save().unwrap();
    drop(store);

    let reloaded = StatsStore::load(&path).unwrap();
    assert_eq!(reloaded.len(), 2);
    let alice = reloaded.get(ParticipantId(1)).unwrap();
    assert_eq!(alice.username, "Alice");
    assert_eq!(alice.wins, 1);
    assert_eq!(alice.xp, XP_REWARD);
}

#[test]
fn save_replaces_the_file_without_leftovers() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("players.json");

    let mut store = StatsStore::load(&path).unwrap();
    store.stats(ParticipantId(5), "Eve");
    store.save().unwrap();
    store.save().unwrap();

    assert!(path.exists());
    assert!(!dir.path().join("players.tmp").exists());
    // The durable file parses back on its own.
    let json = std::fs::read_to_string(&path).unwrap();
    assert!(serde_json::from_str::<serde_json::Value>(&json).is_ok());
}

#[test]
fn username_is_kept_from_first_reference() {
    let dir = tempdir().unwrap();
    let mut store = StatsStore::load(dir.path().join("players.json")).unwrap();
    store.stats(ParticipantId(1), "Alice");
    let record = store.stats(ParticipantId(1), "Renamed");
    assert_eq!(record.username, "Alice");
}
