//! Shared harness: the real router on an ephemeral port, backed by a
//! database file in a temp directory.

#![allow(dead_code)]

use std::sync::Arc;

use tempfile::TempDir;

use tdah_auth::TokenService;
use tdah_config::TdahConfig;
use tdah_core::entities::{NewPrincipal, NewStudent, Principal};
use tdah_core::enums::Role;
use tdah_db::TdahDb;
use tdah_server::{AppState, router};

pub const SECRET: &str = "integration-secret";

pub struct TestApp {
    pub base: String,
    pub client: reqwest::Client,
    pub db: Arc<TdahDb>,
    pub tokens: Arc<TokenService>,
    _dir: TempDir,
}

pub async fn spawn() -> TestApp {
    spawn_with(|_| {}).await
}

pub async fn spawn_with(customize: impl FnOnce(&mut TdahConfig)) -> TestApp {
    let dir = TempDir::new().unwrap();
    let mut config = TdahConfig::default();
    config.auth.jwt_secret = SECRET.to_string();
    config.database.path = dir.path().join("app.db").to_str().unwrap().to_string();
    customize(&mut config);

    let db = TdahDb::open_local(&config.database.path).await.unwrap();
    let state = AppState::new(db, &config).unwrap();
    let db = Arc::clone(&state.db);
    let tokens = Arc::clone(&state.tokens);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });

    TestApp {
        base: format!("http://{addr}"),
        client: reqwest::Client::new(),
        db,
        tokens,
        _dir: dir,
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    pub fn bearer(&self, principal: Principal) -> String {
        format!("Bearer {}", self.tokens.issue(&principal).unwrap())
    }

    pub async fn seed_principal(&self, role: Role, email: &str) -> Principal {
        let conn = self.db.acquire().await.unwrap();
        let id = conn
            .create_principal(&NewPrincipal {
                role,
                email: email.to_string(),
                password_hash: "unused".to_string(),
                name: "Name".to_string(),
                surname: "Surname".to_string(),
            })
            .await
            .unwrap();
        Principal { id, role }
    }

    pub async fn seed_student(&self, email: &str, name: &str, course: &str) -> i64 {
        let conn = self.db.acquire().await.unwrap();
        conn.insert_student(&NewStudent {
            email: email.to_string(),
            name: name.to_string(),
            surname: "Surname".to_string(),
            gender: None,
            course: Some(course.to_string()),
        })
        .await
        .unwrap()
    }

    pub async fn seed_link(&self, teacher_id: i64, student_id: i64) {
        let conn = self.db.acquire().await.unwrap();
        conn.link_student(teacher_id, student_id).await.unwrap();
    }

    pub async fn link_count(&self) -> i64 {
        let conn = self.db.acquire().await.unwrap();
        let mut rows = conn
            .conn()
            .query("SELECT COUNT(*) FROM teacher_student", ())
            .await
            .unwrap();
        rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap()
    }
}

/// Percent-encode a query-string value.
pub fn encode_component(raw: &str) -> String {
    raw.bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{b:02X}"),
        })
        .collect()
}
