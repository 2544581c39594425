use capitrack_core::db::open_db_in_memory;
use capitrack_core::{
    Investment, NewProject, ProjectPatch, ProjectRepository, RepoError, SqliteProjectRepository,
    ValidationError,
};
use rusqlite::params;

fn sample_project() -> NewProject {
    let mut input = NewProject::new("PRJ-2025-042", "Refonte datacenter");
    input.owner = Some("DSI".to_string());
    input.start_month = Some("2025-02".parse().unwrap());
    input.end_month = Some("2026-06".parse().unwrap());
    input.description = Some("Consolidation des salles serveurs".to_string());
    input.deliverables = Some("Salle unique, PRA testé".to_string());
    input.status = Some("in_progress".to_string());
    input.cir = true;
    input.cir_amount_cents = Some(250_000_00);
    input.subvention = false;
    input.amortissement = true;
    input.investments = vec![
        Investment {
            amount_cents: 36_000_00,
            purchase_month: "2025-03".parse().unwrap(),
            duration_months: 36,
        },
        Investment {
            amount_cents: 5_000_00,
            purchase_month: "2025-09".parse().unwrap(),
            duration_months: 12,
        },
    ];
    input.themes = vec!["infrastructure".to_string(), "sécurité".to_string()];
    input.images = vec![
        "media/plan-salle.png".to_string(),
        "media/baie-a.jpg".to_string(),
        "media/baie-b.jpg".to_string(),
    ];
    input
}

#[test]
fn create_then_get_round_trips_every_field() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteProjectRepository::new(&mut conn);

    let input = sample_project();
    let created = repo.create_project(&input).unwrap();
    let fetched = repo.get_project(created.id).unwrap().unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.code, input.code);
    assert_eq!(fetched.name, input.name);
    assert_eq!(fetched.owner, input.owner);
    assert_eq!(fetched.start_month, input.start_month);
    assert_eq!(fetched.end_month, input.end_month);
    assert_eq!(fetched.description, input.description);
    assert_eq!(fetched.deliverables, input.deliverables);
    assert_eq!(fetched.status, input.status);
    assert!(fetched.cir);
    assert_eq!(fetched.cir_amount_cents, Some(250_000_00));
    assert!(!fetched.subvention);
    assert_eq!(fetched.subvention_amount_cents, None);
    assert!(fetched.amortissement);
    assert_eq!(fetched.investments, input.investments);
    assert_eq!(fetched.themes, input.themes);
    // Image order is display order and must survive storage.
    assert_eq!(fetched.images, input.images);
    assert!(fetched.created_at > 0);
    assert!(fetched.updated_at > 0);
}

#[test]
fn minimal_project_defaults_optional_fields() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteProjectRepository::new(&mut conn);

    let created = repo
        .create_project(&NewProject::new("PRJ-MIN", "Minimal"))
        .unwrap();
    assert_eq!(created.owner, None);
    assert_eq!(created.start_month, None);
    assert_eq!(created.status, None);
    assert!(!created.cir);
    assert!(created.investments.is_empty());
    assert!(created.themes.is_empty());
    assert!(created.images.is_empty());
}

#[test]
fn duplicate_code_fails_and_adds_no_row() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let mut repo = SqliteProjectRepository::new(&mut conn);
        repo.create_project(&NewProject::new("PRJ-DUP", "First"))
            .unwrap();

        let err = repo
            .create_project(&NewProject::new("PRJ-DUP", "Second"))
            .unwrap_err();
        assert!(matches!(err, RepoError::UniqueCode(code) if code == "PRJ-DUP"));

        assert_eq!(repo.list_projects().unwrap().len(), 1);
    }

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM projects;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn create_rejects_invalid_investments_without_writing() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteProjectRepository::new(&mut conn);

    let mut input = NewProject::new("PRJ-BAD", "Broken");
    input.investments = vec![Investment {
        amount_cents: -5,
        purchase_month: "2025-01".parse().unwrap(),
        duration_months: 12,
    }];

    let err = repo.create_project(&input).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::NonPositiveInvestmentAmount(-5))
    ));
    assert!(repo.list_projects().unwrap().is_empty());
}

#[test]
fn list_projects_orders_most_recent_first() {
    let mut conn = open_db_in_memory().unwrap();
    let (old_id, new_id) = {
        let mut repo = SqliteProjectRepository::new(&mut conn);
        let old = repo.create_project(&NewProject::new("PRJ-A", "Older")).unwrap();
        let new = repo.create_project(&NewProject::new("PRJ-B", "Newer")).unwrap();
        (old.id, new.id)
    };

    conn.execute(
        "UPDATE projects SET created_at = 1000 WHERE id = ?1;",
        params![old_id],
    )
    .unwrap();
    conn.execute(
        "UPDATE projects SET created_at = 2000 WHERE id = ?1;",
        params![new_id],
    )
    .unwrap();

    let mut repo = SqliteProjectRepository::new(&mut conn);
    let listed = repo.list_projects().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, new_id);
    assert_eq!(listed[1].id, old_id);
}

#[test]
fn patch_applies_only_supplied_fields() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteProjectRepository::new(&mut conn);
    let created = repo.create_project(&sample_project()).unwrap();

    let patch = ProjectPatch {
        name: Some("Refonte datacenter v2".to_string()),
        status: Some(Some("done".to_string())),
        // Clearable field reset to null.
        deliverables: Some(None),
        themes: Some(vec!["infrastructure".to_string()]),
        ..ProjectPatch::default()
    };
    let updated = repo.update_project(created.id, &patch).unwrap().unwrap();

    assert_eq!(updated.name, "Refonte datacenter v2");
    assert_eq!(updated.status.as_deref(), Some("done"));
    assert_eq!(updated.deliverables, None);
    assert_eq!(updated.themes, vec!["infrastructure".to_string()]);
    // Unsupplied fields stay untouched.
    assert_eq!(updated.code, created.code);
    assert_eq!(updated.owner, created.owner);
    assert_eq!(updated.investments, created.investments);
    assert_eq!(updated.created_at, created.created_at);
}

#[test]
fn patch_validates_the_patched_result() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteProjectRepository::new(&mut conn);
    let created = repo.create_project(&sample_project()).unwrap();

    let patch = ProjectPatch {
        name: Some("   ".to_string()),
        ..ProjectPatch::default()
    };
    let err = repo.update_project(created.id, &patch).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyName)
    ));

    // Rolled back: the stored name is unchanged.
    let fetched = repo.get_project(created.id).unwrap().unwrap();
    assert_eq!(fetched.name, created.name);
}

#[test]
fn patch_to_an_existing_code_reports_unique_violation() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteProjectRepository::new(&mut conn);
    repo.create_project(&NewProject::new("PRJ-ONE", "One"))
        .unwrap();
    let second = repo
        .create_project(&NewProject::new("PRJ-TWO", "Two"))
        .unwrap();

    let patch = ProjectPatch {
        code: Some("PRJ-ONE".to_string()),
        ..ProjectPatch::default()
    };
    let err = repo.update_project(second.id, &patch).unwrap_err();
    assert!(matches!(err, RepoError::UniqueCode(code) if code == "PRJ-ONE"));
}

#[test]
fn update_refreshes_updated_at() {
    let mut conn = open_db_in_memory().unwrap();
    let created = {
        let mut repo = SqliteProjectRepository::new(&mut conn);
        repo.create_project(&NewProject::new("PRJ-TS", "Timestamps"))
            .unwrap()
    };

    // Backdate so the refresh is observable at second granularity.
    conn.execute(
        "UPDATE projects SET updated_at = 1000 WHERE id = ?1;",
        params![created.id],
    )
    .unwrap();

    let mut repo = SqliteProjectRepository::new(&mut conn);
    let patch = ProjectPatch {
        owner: Some(Some("PMO".to_string())),
        ..ProjectPatch::default()
    };
    let updated = repo.update_project(created.id, &patch).unwrap().unwrap();
    assert!(updated.updated_at > 1000);
}

#[test]
fn missing_ids_use_soft_sentinels() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteProjectRepository::new(&mut conn);

    assert!(repo.get_project(999).unwrap().is_none());
    assert!(repo
        .update_project(999, &ProjectPatch::default())
        .unwrap()
        .is_none());
    assert!(!repo.delete_project(999).unwrap());
}
