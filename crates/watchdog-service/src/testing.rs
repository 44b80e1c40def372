//! Shared fixtures for service tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use watchdog_core::traits::Notifier;
use watchdog_core::types::id::UserId;
use watchdog_database::DatabasePool;
use watchdog_database::migration::run_migrations;
use watchdog_database::repositories::{TimerRepository, UserRepository};
use watchdog_entity::user::{CreateUser, User};

/// Notifier that records every message instead of delivering it.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(UserId, String)>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<(UserId, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|(_, m)| m.clone())
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, user_id: UserId, message: String) {
        self.sent.lock().unwrap().push((user_id, message));
    }
}

pub struct Fixture {
    pub users: Arc<UserRepository>,
    pub timers: Arc<TimerRepository>,
    pub notifier: Arc<RecordingNotifier>,
}

impl Fixture {
    pub async fn new() -> Self {
        let db = DatabasePool::in_memory().await.unwrap();
        run_migrations(db.pool()).await.unwrap();
        let pool = db.into_pool();
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            timers: Arc::new(TimerRepository::new(pool)),
            notifier: Arc::new(RecordingNotifier::default()),
        }
    }

    pub async fn user(&self, name: &str) -> User {
        self.users
            .create(&CreateUser {
                display_name: name.to_string(),
                external_id: Some(format!("chat-{name}")),
                access_key: format!("key-{name}"),
            })
            .await
            .unwrap()
    }
}
