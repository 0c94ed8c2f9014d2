//! PostgreSQL adapter for FetchStore

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    prelude::DateTimeWithTimeZone, sea_query::Index, ActiveModelTrait, ColumnTrait,
    ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Schema, Set,
};
use uuid::Uuid;

use crate::domain::entities::{Fetch, FetchId, FetchSummary, NewFetch};
use crate::domain::ports::FetchStore;
use crate::entity::fetches;
use crate::error::DomainError;

/// PostgreSQL implementation of FetchStore
pub struct PostgresFetchStore {
    db: DatabaseConnection,
}

impl PostgresFetchStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create the `fetches` table and its lookup index if they do not exist
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        let backend = self.db.get_database_backend();
        let schema = Schema::new(backend);

        let mut table = schema.create_table_from_entity(fetches::Entity);
        table.if_not_exists();
        self.db
            .execute(backend.build(&table))
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let index = Index::create()
            .if_not_exists()
            .name("idx_fetches_feed_id_fetched_at")
            .table(fetches::Entity)
            .col(fetches::Column::FeedId)
            .col(fetches::Column::FetchedAt)
            .to_owned();
        self.db
            .execute(backend.build(&index))
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl FetchStore for PostgresFetchStore {
    async fn put(&self, fetch: &NewFetch) -> Result<FetchId, DomainError> {
        let id = Uuid::new_v4();

        let model = fetches::ActiveModel {
            id: Set(id),
            feed_id: Set(fetch.feed_id.clone()),
            fetched_at: Set(fetch.fetched_at.fixed_offset()),
            raw: Set(fetch.raw.clone()),
            feed: Set(fetch.feed.clone()),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(FetchId(id))
    }

    async fn latest(&self, feed_id: &str) -> Result<Option<Fetch>, DomainError> {
        let result = fetches::Entity::find()
            .filter(fetches::Column::FeedId.eq(feed_id))
            .order_by_desc(fetches::Column::FetchedAt)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn recent(&self, limit: u64) -> Result<Vec<FetchSummary>, DomainError> {
        let rows: Vec<(Uuid, String, DateTimeWithTimeZone)> = fetches::Entity::find()
            .select_only()
            .columns([
                fetches::Column::Id,
                fetches::Column::FeedId,
                fetches::Column::FetchedAt,
            ])
            .order_by_desc(fetches::Column::FetchedAt)
            .limit(limit)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(id, feed_id, fetched_at)| FetchSummary {
                id: FetchId(id),
                feed_id,
                fetched_at: fetched_at.with_timezone(&Utc),
            })
            .collect())
    }
}

/// Convert SeaORM model to domain entity
impl From<fetches::Model> for Fetch {
    fn from(model: fetches::Model) -> Self {
        Fetch {
            id: FetchId(model.id),
            feed_id: model.feed_id,
            fetched_at: model.fetched_at.with_timezone(&Utc),
            raw: model.raw,
            feed: model.feed,
        }
    }
}
