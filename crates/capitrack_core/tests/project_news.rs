use capitrack_core::db::open_db_in_memory;
use capitrack_core::{
    NewProject, NewsRepository, ProjectRepository, RepoError, SqliteNewsRepository,
    SqliteProjectRepository, ValidationError,
};
use rusqlite::params;

fn create_project(conn: &mut rusqlite::Connection) -> i64 {
    SqliteProjectRepository::new(conn)
        .create_project(&NewProject::new("PRJ-NEWS", "Actualités"))
        .unwrap()
        .id
}

#[test]
fn create_news_trims_text_and_snapshots_the_row() {
    let mut conn = open_db_in_memory().unwrap();
    let project_id = create_project(&mut conn);

    let news = SqliteNewsRepository::new(&mut conn)
        .create_news(project_id, "  Démarrage du lot 2  ")
        .unwrap()
        .unwrap();
    assert_eq!(news.project_id, project_id);
    assert_eq!(news.text, "Démarrage du lot 2");
    assert!(news.created_at > 0);
}

#[test]
fn empty_news_text_is_a_validation_error() {
    let mut conn = open_db_in_memory().unwrap();
    let project_id = create_project(&mut conn);

    let mut repo = SqliteNewsRepository::new(&mut conn);
    let err = repo.create_news(project_id, "   ").unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyNewsText)
    ));
}

#[test]
fn create_news_on_missing_project_is_a_soft_none() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let mut repo = SqliteNewsRepository::new(&mut conn);
        assert!(repo.create_news(404, "sans projet").unwrap().is_none());
    }

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM project_news;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 0);
}

#[test]
fn list_news_orders_most_recent_first() {
    let mut conn = open_db_in_memory().unwrap();
    let project_id = create_project(&mut conn);

    let (first_id, second_id) = {
        let mut repo = SqliteNewsRepository::new(&mut conn);
        let first = repo.create_news(project_id, "ancienne").unwrap().unwrap();
        let second = repo.create_news(project_id, "récente").unwrap().unwrap();
        (first.id, second.id)
    };

    conn.execute(
        "UPDATE project_news SET created_at = 1000 WHERE id = ?1;",
        params![first_id],
    )
    .unwrap();
    conn.execute(
        "UPDATE project_news SET created_at = 2000 WHERE id = ?1;",
        params![second_id],
    )
    .unwrap();

    let items = SqliteNewsRepository::new(&mut conn)
        .list_news(project_id)
        .unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, second_id);
    assert_eq!(items[1].id, first_id);
}

#[test]
fn list_news_is_empty_for_unknown_project() {
    let mut conn = open_db_in_memory().unwrap();
    assert!(SqliteNewsRepository::new(&mut conn)
        .list_news(404)
        .unwrap()
        .is_empty());
}

#[test]
fn update_news_replaces_text_in_place() {
    let mut conn = open_db_in_memory().unwrap();
    let project_id = create_project(&mut conn);

    let mut repo = SqliteNewsRepository::new(&mut conn);
    let news = repo.create_news(project_id, "v1").unwrap().unwrap();

    assert!(repo.update_news(news.id, "  v2 corrigée ").unwrap());
    let items = repo.list_news(project_id).unwrap();
    assert_eq!(items[0].text, "v2 corrigée");

    assert!(!repo.update_news(9999, "personne").unwrap());
}

#[test]
fn delete_news_reports_success_exactly_once() {
    let mut conn = open_db_in_memory().unwrap();
    let project_id = create_project(&mut conn);

    let mut repo = SqliteNewsRepository::new(&mut conn);
    let news = repo.create_news(project_id, "éphémère").unwrap().unwrap();

    assert!(repo.delete_news(news.id).unwrap());
    assert!(!repo.delete_news(news.id).unwrap());
    assert!(repo.list_news(project_id).unwrap().is_empty());
}
