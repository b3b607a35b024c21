#![allow(dead_code)]
use actix_http::body::MessageBody;
use actix_http::Request;
use actix_service::Service;
use actix_web::{dev::ServiceResponse, test, Error};
use tempfile::TempDir;

use postboard::config::Env;
use postboard::db::{self, DatabaseConnection};
use postboard::server::{api::state::App as AppState, app::init_app};

pub const TEST_MESSAGE: &str = "Hello from the test suite";

/// A migrated, empty database in a temporary directory.
///
/// The directory is removed when this is dropped, so keep it alive for the
/// whole test.
pub struct TestDb {
    pub dir: TempDir,
    pub env: Env,
    pub connection: DatabaseConnection,
}

pub async fn initialize_db() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("posts.sqlite3");
    let env = Env {
        database_url: format!("sqlite://{}?mode=rwc", db_path.to_string_lossy()),
        message: TEST_MESSAGE.to_owned(),
    };
    let connection = db::init::connect(&env).await.unwrap();
    db::init::migrate(&connection).await.unwrap();
    TestDb {
        dir,
        env,
        connection,
    }
}

pub async fn initialize_app(
    test_db: &TestDb,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    let state = AppState {
        db: test_db.connection.clone(),
        env: test_db.env.clone(),
    };
    let app = init_app(&state).unwrap();
    test::init_service(app).await
}
