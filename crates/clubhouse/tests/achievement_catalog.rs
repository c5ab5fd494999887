use clubhouse::scoring::achievements::{
    evaluate, AchievementCatalog, AchievementCondition, AchievementSnapshot, CatalogError,
    PlayerHistory, RoundSnapshot,
};
use clubhouse::scoring::{
    summarize_round, HoleScore, Par, PlayerId, RoundKey, TournamentId,
};

const CUSTOM_CATALOG: &str = r#"[
  {
    "id": "sub_seventy",
    "name": "Sub Seventy",
    "condition": "break_score",
    "rarity": "epic",
    "category": "scoring",
    "points": 120,
    "threshold": 70
  },
  {
    "id": "birdie",
    "name": "Birdie",
    "description": "One under on any hole",
    "condition": "birdie",
    "rarity": "common",
    "category": "scoring",
    "points": 5
  }
]"#;

fn round_of(strokes: u8, count: u8) -> Vec<HoleScore> {
    (1..=count)
        .map(|hole_number| HoleScore {
            hole_number,
            par: Par::Four,
            strokes,
            putts: 1,
            fairway_hit: true,
            green_in_regulation: true,
        })
        .collect()
}

fn snapshot(scores: Vec<HoleScore>) -> AchievementSnapshot {
    AchievementSnapshot::Round(RoundSnapshot {
        key: RoundKey {
            tournament_id: TournamentId("links".to_string()),
            player_id: PlayerId("fi".to_string()),
            round_number: 1,
        },
        summary: summarize_round(&scores),
        scores,
        history: PlayerHistory {
            rounds_completed: 1,
            career_birdies: 0,
        },
    })
}

#[test]
fn json_catalog_loads_and_drives_evaluation() {
    let catalog = AchievementCatalog::from_reader(CUSTOM_CATALOG.as_bytes()).expect("catalog loads");
    assert_eq!(catalog.len(), 2);

    // 18 x 3 on par fours = 54
    let matched = evaluate(&catalog, &snapshot(round_of(3, 18)));
    let ids: Vec<&str> = matched.iter().map(|a| a.id.0.as_str()).collect();
    assert_eq!(ids, vec!["sub_seventy"], "hole conditions stay out of round evaluation");

    let matched = evaluate(&catalog, &AchievementSnapshot::Hole(round_of(3, 1)[0]));
    let ids: Vec<&str> = matched.iter().map(|a| a.id.0.as_str()).collect();
    assert_eq!(ids, vec!["birdie"]);
}

#[test]
fn threshold_conditions_without_threshold_are_rejected() {
    let raw = r#"[{"id":"streak","name":"Streak","condition":"birdies_in_round","rarity":"rare","category":"scoring","points":10}]"#;
    match AchievementCatalog::from_reader(raw.as_bytes()) {
        Err(CatalogError::MissingThreshold { id, condition }) => {
            assert_eq!(id, "streak");
            assert_eq!(condition, AchievementCondition::BirdiesInRound);
        }
        other => panic!("expected missing threshold, got {other:?}"),
    }
}

#[test]
fn duplicate_ids_and_bad_json_are_rejected() {
    let duplicate = format!(
        "[{0},{0}]",
        r#"{"id":"x","name":"X","condition":"eagle","rarity":"rare","category":"scoring","points":1}"#
    );
    assert!(matches!(
        AchievementCatalog::from_reader(duplicate.as_bytes()),
        Err(CatalogError::DuplicateId(id)) if id == "x"
    ));
    assert!(matches!(
        AchievementCatalog::from_reader("{".as_bytes()),
        Err(CatalogError::Json(_))
    ));
}

#[test]
fn standard_catalog_rewards_an_incomplete_round_with_nothing() {
    let catalog = AchievementCatalog::standard();
    assert!(!catalog.is_empty());
    let matched = evaluate(&catalog, &snapshot(round_of(4, 12)));
    assert!(matched.is_empty());
}
