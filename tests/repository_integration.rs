use baseball_stats::{
    config::DatabaseConfig,
    database::Database,
    errors::RepositoryError,
    models::{InsertOutcome, PitcherRecord, PositionPlayerRecord},
    repositories::{RecordSink, Repository},
};

async fn memory_database() -> Database {
    let database = Database::new(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: Some(1),
    })
    .await
    .unwrap();
    database.migrate().await.unwrap();
    database
}

fn batter(name: &str, team: &str) -> PositionPlayerRecord {
    PositionPlayerRecord {
        name: name.to_string(),
        team: team.to_string(),
        games: 158,
        plate_appearances: 704,
        home_runs: 58,
        runs: 122,
        runs_batted_in: 144,
        stolen_bases: 10,
        weighted_runs_created_plus: 218,
        walk_rate: 18.9,
        strikeout_rate: 17.1,
        isolated_power: 0.379,
        babip: 0.367,
        batting_average: 0.322,
        on_base_percentage: 0.458,
        slugging_percentage: 0.701,
        woba: 0.476,
        expected_woba: 0.478,
        base_running: -0.7,
        wins_above_replacement: 11.2,
    }
}

fn pitcher(name: &str, team: &str) -> PitcherRecord {
    PitcherRecord {
        name: name.to_string(),
        team: team.to_string(),
        wins: 18,
        losses: 4,
        saves: 0,
        games: 31,
        games_started: 31,
        innings_pitched: 192.0,
        strikeouts_per_nine: 10.69,
        walks_per_nine: 1.64,
        home_runs_per_nine: 0.7,
        babip: 0.277,
        left_on_base_rate: 78.7,
        ground_ball_rate: 42.1,
        home_run_to_fly_ball_rate: 8.5,
        fastball_velocity: 96.8,
        era: 2.39,
        expected_era: 2.54,
        fip: 2.49,
        expected_fip: 2.92,
        wins_above_replacement: 6.0,
    }
}

#[tokio::test]
async fn duplicate_name_and_team_is_a_successful_no_op() {
    let database = memory_database().await;
    let repo = database.position_players();

    let first = repo.insert(&batter("Aaron Judge", "NYY")).await.unwrap();
    let mut changed = batter("Aaron Judge", "NYY");
    changed.home_runs = 1;
    let second = repo.insert(&changed).await.unwrap();

    assert!(matches!(first, InsertOutcome::Inserted(_)));
    assert_eq!(second, InsertOutcome::Ignored);
    assert_eq!(repo.count().await.unwrap(), 1);

    // The stored row keeps the first insert's values
    let stored = repo.find_all().await.unwrap();
    assert_eq!(stored[0].record.home_runs, 58);
}

#[tokio::test]
async fn same_name_on_another_team_is_a_new_row() {
    let database = memory_database().await;
    let repo = database.pitchers();

    repo.insert(&pitcher("Will Smith", "ATL")).await.unwrap();
    let outcome = repo.insert(&pitcher("Will Smith", "KCR")).await.unwrap();

    assert!(outcome.is_inserted());
    assert_eq!(repo.count().await.unwrap(), 2);
}

#[tokio::test]
async fn stored_records_read_back_unchanged() {
    let database = memory_database().await;
    let batters = database.position_players();
    let pitchers = database.pitchers();

    let InsertOutcome::Inserted(batter_id) = batters.insert(&batter("Juan Soto", "NYY")).await.unwrap() else {
        panic!("expected insert");
    };
    let InsertOutcome::Inserted(pitcher_id) = pitchers.insert(&pitcher("Tarik Skubal", "DET")).await.unwrap() else {
        panic!("expected insert");
    };

    let stored_batter = batters.find_by_id(batter_id).await.unwrap().unwrap();
    assert_eq!(stored_batter.id, batter_id);
    assert_eq!(stored_batter.record, batter("Juan Soto", "NYY"));

    let stored_pitcher = pitchers.find_by_id(pitcher_id).await.unwrap().unwrap();
    assert_eq!(stored_pitcher.record, pitcher("Tarik Skubal", "DET"));
}

#[tokio::test]
async fn find_all_is_ordered_by_id() {
    let database = memory_database().await;
    let repo = database.position_players();

    for (name, team) in [("C", "TOR"), ("A", "NYY"), ("B", "BOS")] {
        repo.insert(&batter(name, team)).await.unwrap();
    }

    let names: Vec<String> = repo
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.record.name)
        .collect();
    assert_eq!(names, vec!["C", "A", "B"]);
}

#[tokio::test]
async fn update_replaces_every_column() {
    let database = memory_database().await;
    let repo = database.pitchers();

    let InsertOutcome::Inserted(id) = repo.insert(&pitcher("Chris Sale", "ATL")).await.unwrap() else {
        panic!("expected insert");
    };

    let mut updated = pitcher("Chris Sale", "ATL");
    updated.wins = 19;
    updated.era = 2.38;
    let returned = repo.update(id, &updated).await.unwrap();
    assert_eq!(returned.id, id);

    let stored = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.record.wins, 19);
    assert_eq!(stored.record.era, 2.38);
}

#[tokio::test]
async fn update_and_delete_of_missing_id_are_not_found() {
    let database = memory_database().await;
    let repo = database.position_players();

    let err = repo.update(99, &batter("Nobody", "FA")).await.unwrap_err();
    assert!(matches!(err, RepositoryError::RecordNotFound { .. }));

    let err = repo.delete(99).await.unwrap_err();
    assert!(matches!(err, RepositoryError::RecordNotFound { .. }));
}

#[tokio::test]
async fn delete_removes_the_row() {
    let database = memory_database().await;
    let repo = database.position_players();

    let InsertOutcome::Inserted(id) = repo.insert(&batter("Jose Ramirez", "CLE")).await.unwrap() else {
        panic!("expected insert");
    };
    assert!(repo.exists(id).await.unwrap());

    repo.delete(id).await.unwrap();

    assert!(!repo.exists(id).await.unwrap());
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn update_onto_existing_name_and_team_is_a_constraint_violation() {
    let database = memory_database().await;
    let repo = database.position_players();

    repo.insert(&batter("Aaron Judge", "NYY")).await.unwrap();
    let InsertOutcome::Inserted(id) = repo.insert(&batter("Juan Soto", "NYY")).await.unwrap() else {
        panic!("expected insert");
    };

    let err = repo.update(id, &batter("Aaron Judge", "NYY")).await.unwrap_err();
    assert!(matches!(err, RepositoryError::ConstraintViolation { .. }));
}

#[tokio::test]
async fn negative_rates_violate_check_constraints() {
    let database = memory_database().await;
    let repo = database.pitchers();

    let mut record = pitcher("Zack Wheeler", "PHI");
    record.era = -1.0;
    let err = repo.insert(&record).await.unwrap_err();

    match err {
        RepositoryError::ConstraintViolation { constraint, .. } => assert_eq!(constraint, "check"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(repo.count().await.unwrap(), 0);
}
