use std::sync::Arc;

use dialed_application::{FixedClock, MergePolicy, PracticeTracker, SaveOutcome};
use dialed_core::config::LocalUserConfig;
use dialed_core::date::SessionDate;
use dialed_core::scoring::{LeagueScorecard, PracticeDraft, ScoringStyle};
use dialed_core::session::HistoryFilter;
use dialed_core::user::{DocumentStore, DraftRepository, UserRole};
use dialed_core::world::WorldGame;
use dialed_infrastructure::{FileDocumentStore, FileDraftRepository, LocalAuthProvider};
use tempfile::TempDir;

fn today() -> SessionDate {
    SessionDate::from_ymd(2024, 3, 5).unwrap()
}

fn open_tracker(data_dir: &std::path::Path, first_id: i64) -> PracticeTracker {
    let user = LocalUserConfig {
        uid: "putter".to_string(),
        display_name: "Putter".to_string(),
    };
    PracticeTracker::new(
        Arc::new(LocalAuthProvider::new(user)),
        Arc::new(FileDocumentStore::new(data_dir).unwrap()),
        Arc::new(FileDraftRepository::new(data_dir)),
        Arc::new(FixedClock::new(today(), first_id)),
    )
}

#[tokio::test]
async fn test_full_day_of_putting_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let tracker = open_tracker(temp_dir.path(), 1_000);
    tracker.sign_in().await.expect("Should sign in");

    // Morning session, with the draft stored after every round
    let mut draft = tracker.resume_draft().await.unwrap();
    assert!(draft.is_empty());
    draft.log_made(1, 5).unwrap();
    draft.set_distance(25).unwrap();
    draft.log_made(2, 3).unwrap();
    tracker.store_draft(draft.rounds()).await;

    let outcome = tracker
        .finish_practice(draft, MergePolicy::Ask)
        .await
        .unwrap();
    assert!(matches!(outcome, Some(SaveOutcome::Saved(_))));
    assert!(tracker.resume_draft().await.unwrap().is_empty());

    // Evening session lands on the same day
    let mut evening = PracticeDraft::new(ScoringStyle::Simple);
    evening.log_made(3, 4).unwrap();
    let Some(SaveOutcome::DuplicateFound { incoming, .. }) = tracker
        .finish_practice(evening, MergePolicy::Ask)
        .await
        .unwrap()
    else {
        panic!("Should detect the same-day session");
    };
    let SaveOutcome::Merged(merged) = tracker
        .save_session(incoming, MergePolicy::Merge)
        .await
        .unwrap()
    else {
        panic!("Should merge");
    };
    assert_eq!(merged.summary().made, 12);
    assert_eq!(merged.rounds.len(), 3);

    // World game and league night
    let mut game = WorldGame::new();
    for round_id in 10..14 {
        game.log(round_id, 5).unwrap();
    }
    assert_eq!(game.current_distance(), 30);
    tracker.finish_world(game).await.unwrap();

    let mut card = LeagueScorecard::new();
    for station in 1..=5 {
        card.record_station(station, 3).unwrap();
    }
    tracker.finish_league(card).await.unwrap();
    tracker.set_role(UserRole::League).await.unwrap();

    let stats = tracker.stats().await;
    assert_eq!(stats.streak.streak, 0); // Day One
    assert_eq!(stats.streak_stats.current, 1);
    assert_eq!(stats.world.map(|w| w.peak_distance), Some(25));
    assert!(stats.league.is_some());

    tracker.set_filter(HistoryFilter::Practice).await.unwrap();
    assert_eq!(tracker.visible_sessions().await.len(), 1);

    // A new process reads the same files back
    let reopened = open_tracker(temp_dir.path(), 5_000);
    reopened.sign_in().await.unwrap();
    let state = reopened.state().await;
    assert!(state.is_data_loaded);
    assert_eq!(state.history().len(), 3);
    assert_eq!(state.document.role, Some(UserRole::League));
    assert_eq!(reopened.stats().await, stats);
}

#[tokio::test]
async fn test_abandoned_draft_is_resumed_then_discarded() {
    let temp_dir = TempDir::new().unwrap();
    let drafts = FileDraftRepository::new(temp_dir.path());
    let mut draft = PracticeDraft::new(ScoringStyle::Simple);
    draft.log_made(1, 2).unwrap();
    drafts.save(draft.rounds()).await.unwrap();

    let tracker = open_tracker(temp_dir.path(), 1);
    tracker.sign_in().await.unwrap();
    let resumed = tracker.resume_draft().await.unwrap();
    assert_eq!(resumed.rounds().len(), 1);

    tracker.discard_draft().await;
    assert!(drafts.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_and_clear_reach_disk() {
    let temp_dir = TempDir::new().unwrap();
    let tracker = open_tracker(temp_dir.path(), 1);
    tracker.sign_in().await.unwrap();

    for made in [1, 2] {
        let mut draft = PracticeDraft::new(ScoringStyle::Simple);
        draft.log_made(i64::from(made), made).unwrap();
        tracker
            .finish_practice(draft, MergePolicy::KeepSeparate)
            .await
            .unwrap();
    }
    let first = tracker.state().await.history().sessions()[1].id;
    tracker.delete_session(first).await.unwrap();
    assert!(tracker.delete_session(first).await.unwrap_err().is_not_found());

    let store = FileDocumentStore::new(temp_dir.path()).unwrap();
    assert_eq!(store.load("putter").await.unwrap().unwrap().history.len(), 1);

    tracker.clear_history().await.unwrap();
    assert!(store.load("putter").await.unwrap().unwrap().history.is_empty());
}
