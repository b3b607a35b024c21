mod common;

use postboard::config::Env;
use postboard::db::models::post::{Manager, NewPost};
use postboard::db::{self, DatabaseConnection, DatabaseKind, Db as _};

#[actix_web::test]
async fn test_connect_when_sqlite_file_expect_sqlite_connection() {
    let test_db = common::initialize_db().await;
    assert_eq!(test_db.connection.kind, DatabaseKind::Sqlite);
    assert!(test_db.dir.path().join("posts.sqlite3").exists());
}

#[actix_web::test]
async fn test_connect_when_unsupported_url_expect_error() {
    let actual = DatabaseConnection::connect("mysql://localhost/posts").await;
    assert!(actual.is_err());
}

#[actix_web::test]
async fn test_migrate_when_run_twice_expect_ok() {
    let test_db = common::initialize_db().await;
    db::init::migrate(&test_db.connection).await.unwrap();
    assert!(test_db.connection.find_all().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_in_memory_database_expect_rows_survive_between_calls() {
    let env = Env {
        database_url: "sqlite::memory:".to_owned(),
        ..Env::default()
    };
    let connection = db::init::connect(&env).await.unwrap();
    db::init::migrate(&connection).await.unwrap();
    connection
        .create(&NewPost::new("Hello", "World"))
        .await
        .unwrap();
    assert_eq!(connection.find_all().await.unwrap().len(), 1);
}

#[actix_web::test]
async fn test_create_then_find_all_expect_post_with_fresh_id() {
    let test_db = common::initialize_db().await;
    let conn = &test_db.connection;
    let first = conn.create(&NewPost::new("a", "1")).await.unwrap();
    let second = conn.create(&NewPost::new("b", "2")).await.unwrap();
    assert!(second > first);

    let posts = conn.find_all().await.unwrap();
    let found = posts.iter().find(|post| post.id == second).unwrap();
    assert_eq!((found.title.as_str(), found.content.as_str()), ("b", "2"));
}

#[actix_web::test]
async fn test_delete_by_id_when_present_expect_gone() {
    let test_db = common::initialize_db().await;
    let conn = &test_db.connection;
    let id = conn.create(&NewPost::new("a", "1")).await.unwrap();
    assert_eq!(conn.delete_by_id(id).await.unwrap(), 1);
    assert!(conn.find_all().await.unwrap().iter().all(|post| post.id != id));
}

#[actix_web::test]
async fn test_delete_by_id_when_absent_expect_no_change() {
    let test_db = common::initialize_db().await;
    let conn = &test_db.connection;
    conn.create(&NewPost::new("a", "1")).await.unwrap();
    let before = conn.find_all().await.unwrap();
    assert_eq!(conn.delete_by_id(12_345).await.unwrap(), 0);
    assert_eq!(conn.find_all().await.unwrap(), before);
}

#[actix_web::test]
async fn test_ids_when_last_post_deleted_expect_not_reused() {
    let test_db = common::initialize_db().await;
    let conn = &test_db.connection;
    let id = conn.create(&NewPost::new("a", "1")).await.unwrap();
    conn.delete_by_id(id).await.unwrap();
    let next = conn.create(&NewPost::new("b", "2")).await.unwrap();
    assert!(next > id);
}

#[actix_web::test]
async fn test_empty_strings_expect_stored_as_is() {
    let test_db = common::initialize_db().await;
    let conn = &test_db.connection;
    conn.create(&NewPost::new("", "  spaced  ")).await.unwrap();
    let posts = conn.find_all().await.unwrap();
    assert_eq!(posts[0].title, "");
    assert_eq!(posts[0].content, "  spaced  ");
}
