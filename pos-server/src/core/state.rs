use std::path::PathBuf;
use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::{JwtService, SubscriptionGate};
use crate::core::Config;
use crate::db::DbService;

/// Shared server state, cheap to clone
///
/// | Field | Type | Meaning |
/// |-------|------|---------|
/// | config | Config | configuration (immutable) |
/// | db | Surreal<Db> | embedded database |
/// | jwt_service | Arc<JwtService> | token issuing/validation |
/// | subscriptions | SubscriptionGate | cached subscription checks |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    pub subscriptions: SubscriptionGate,
}

impl ServerState {
    /// Initialize working directory, database and services
    ///
    /// # Panics
    ///
    /// Panics when the working directory or database cannot be created;
    /// there is nothing useful the server can do without them.
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("pos.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");
        let db = db_service.db;

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let subscriptions = SubscriptionGate::new(db.clone());

        Self {
            config: config.clone(),
            db,
            jwt_service,
            subscriptions,
        }
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    pub fn subscriptions(&self) -> &SubscriptionGate {
        &self.subscriptions
    }

    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.config.uploads_dir()
    }
}
