use async_trait::async_trait;
use chrono::Utc;
use diesel::sqlite::SqliteConnection;
use diesel::Connection;
use std::sync::Arc;

use crate::activities::PeriodType;
use crate::db::{get_connection, DbPool};
use crate::entries::entries_errors::{EntryError, Result};
use crate::entries::entries_model::{Entry, EntryUpdate};
use crate::entries::entries_repository::EntryRepository;
use crate::entries::entries_traits::EntryServiceTrait;
use crate::hooks::{Handler, RequestHooks, RequestPhase};

pub struct EntryRequestContext {
    pub period: PeriodType,
    pub stored: Entry,
}

/// Service guarding the open→closed entry lifecycle.
///
/// Every update and delete request is intercepted by the entry hooks before
/// persistence; a closed entry admits neither.
pub struct EntryService {
    pool: Arc<DbPool>,
    hooks: RequestHooks<EntryRequestContext, EntryError>,
}

fn reject_closed_update(
    _conn: &mut SqliteConnection,
    ctx: &mut EntryRequestContext,
) -> Result<()> {
    if ctx.stored.closed {
        return Err(EntryError::InvalidTransition(
            "Is not possible to reopen a closed entry".to_string(),
        ));
    }
    Ok(())
}

fn reject_closed_delete(
    _conn: &mut SqliteConnection,
    ctx: &mut EntryRequestContext,
) -> Result<()> {
    if ctx.stored.closed {
        return Err(EntryError::InvalidTransition(
            "Is not possible to delete a closed entry".to_string(),
        ));
    }
    Ok(())
}

impl EntryService {
    pub fn new(pool: Arc<DbPool>) -> Self {
        let mut hooks = RequestHooks::new();
        hooks.bind(
            RequestPhase::Update,
            Handler::new("entries_reject_closed_update", 0, reject_closed_update),
        );
        hooks.bind(
            RequestPhase::Delete,
            Handler::new("entries_reject_closed_delete", 0, reject_closed_delete),
        );

        EntryService { pool, hooks }
    }
}

#[async_trait]
impl EntryServiceTrait for EntryService {
    fn get_open_entries(&self, period: PeriodType) -> Result<Vec<Entry>> {
        let repo = EntryRepository::new(self.pool.clone());
        repo.get_open_entries(period)
    }

    fn get_entry(&self, period: PeriodType, entry_id: &str) -> Result<Entry> {
        let repo = EntryRepository::new(self.pool.clone());
        repo.get_entry(period, entry_id)
    }

    async fn update_entry(&self, period: PeriodType, update: EntryUpdate) -> Result<Entry> {
        update.validate()?;

        let mut conn = get_connection(&self.pool)
            .map_err(|e| EntryError::DatabaseError(e.to_string()))?;

        conn.transaction::<Entry, EntryError, _>(|tx_conn| {
            let stored = EntryRepository::find(tx_conn, period, &update.id)?;

            let mut ctx = EntryRequestContext { period, stored };
            self.hooks.trigger(RequestPhase::Update, tx_conn, &mut ctx)?;

            EntryRepository::set_progress(
                tx_conn,
                period,
                &update.id,
                update.progress,
                Utc::now().naive_utc(),
            )
        })
    }

    async fn delete_entry(&self, period: PeriodType, entry_id: String) -> Result<Entry> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| EntryError::DatabaseError(e.to_string()))?;

        conn.transaction::<Entry, EntryError, _>(|tx_conn| {
            let stored = EntryRepository::find(tx_conn, period, &entry_id)?;

            let mut ctx = EntryRequestContext {
                period,
                stored: stored.clone(),
            };
            self.hooks.trigger(RequestPhase::Delete, tx_conn, &mut ctx)?;

            EntryRepository::delete(tx_conn, period, &entry_id)?;

            Ok(stored)
        })
    }
}
