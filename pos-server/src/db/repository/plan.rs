//! Subscription Plan Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Plan, PlanCreate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "plan";

#[derive(Clone)]
pub struct PlanRepository {
    base: BaseRepository,
}

impl PlanRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active plans
    pub async fn find_all(&self) -> RepoResult<Vec<Plan>> {
        let plans: Vec<Plan> = self
            .base
            .db()
            .query("SELECT * FROM plan WHERE is_active = true ORDER BY price")
            .await?
            .take(0)?;
        Ok(plans)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Plan>> {
        let rid = parse_record_id(id, TABLE)?;
        let plan: Option<Plan> = self.base.db().select(rid).await?;
        Ok(plan)
    }

    pub async fn create(&self, data: PlanCreate) -> RepoResult<Plan> {
        if data.duration_days <= 0 {
            return Err(RepoError::Validation(
                "Plan duration must be positive".to_string(),
            ));
        }

        let plan = Plan {
            id: None,
            name: data.name,
            price: data.price,
            duration_days: data.duration_days,
            is_active: true,
        };

        let created: Option<Plan> = self.base.db().create(TABLE).content(plan).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create plan".to_string()))
    }
}
