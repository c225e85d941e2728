use chrono::NaiveDateTime;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use crate::activities::PeriodType;
use crate::db::{get_connection, DbPool};
use crate::entries::entries_errors::{EntryError, Result};
use crate::entries::entries_model::Entry;

// The four period tables share one shape; the macro instantiates the same
// Diesel operations against each of them and `EntryRepository` dispatches on
// the period tag. Keeps the tables physically separate without four copies
// of every query in the callers.
macro_rules! entries_table_ops {
    ($period:ident, $table:ident) => {
        mod $period {
            use chrono::NaiveDateTime;
            use diesel::prelude::*;
            use diesel::sqlite::SqliteConnection;

            use crate::entries::entries_errors::Result;
            use crate::entries::entries_model::Entry;
            use crate::schema::$table::dsl::*;

            pub fn load_open(conn: &mut SqliteConnection) -> Result<Vec<Entry>> {
                Ok($table
                    .filter(closed.eq(false))
                    .order(created_at.asc())
                    .load::<Entry>(conn)?)
            }

            pub fn find(conn: &mut SqliteConnection, entry_id: &str) -> Result<Entry> {
                Ok($table.find(entry_id).first::<Entry>(conn)?)
            }

            pub fn find_open_for_activity(
                conn: &mut SqliteConnection,
                owner: &str,
            ) -> Result<Option<Entry>> {
                Ok($table
                    .filter(activity_id.eq(owner))
                    .filter(closed.eq(false))
                    .first::<Entry>(conn)
                    .optional()?)
            }

            pub fn insert(conn: &mut SqliteConnection, entry: &Entry) -> Result<Entry> {
                diesel::insert_into($table)
                    .values((
                        id.eq(&entry.id),
                        activity_id.eq(&entry.activity_id),
                        progress.eq(entry.progress),
                        goal.eq(entry.goal),
                        closed.eq(entry.closed),
                        created_at.eq(entry.created_at),
                        updated_at.eq(entry.updated_at),
                    ))
                    .execute(conn)?;

                find(conn, &entry.id)
            }

            pub fn mark_closed(
                conn: &mut SqliteConnection,
                entry_id: &str,
                now: NaiveDateTime,
            ) -> Result<()> {
                diesel::update($table.find(entry_id))
                    .set((closed.eq(true), updated_at.eq(now)))
                    .execute(conn)?;
                Ok(())
            }

            pub fn set_progress(
                conn: &mut SqliteConnection,
                entry_id: &str,
                value: i32,
                now: NaiveDateTime,
            ) -> Result<Entry> {
                diesel::update($table.find(entry_id))
                    .set((progress.eq(value), updated_at.eq(now)))
                    .execute(conn)?;

                find(conn, entry_id)
            }

            pub fn delete(conn: &mut SqliteConnection, entry_id: &str) -> Result<usize> {
                Ok(diesel::delete($table.find(entry_id)).execute(conn)?)
            }
        }
    };
}

entries_table_ops!(daily, daily_entries);
entries_table_ops!(weekly, weekly_entries);
entries_table_ops!(monthly, monthly_entries);
entries_table_ops!(yearly, yearly_entries);

macro_rules! dispatch {
    ($period:expr, $op:ident ( $($arg:expr),* )) => {
        match $period {
            PeriodType::Daily => daily::$op($($arg),*),
            PeriodType::Weekly => weekly::$op($($arg),*),
            PeriodType::Monthly => monthly::$op($($arg),*),
            PeriodType::Yearly => yearly::$op($($arg),*),
        }
    };
}

/// Repository for the four period-entry tables behind one interface.
pub struct EntryRepository {
    pool: Arc<DbPool>,
}

impl EntryRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    pub fn get_open_entries(&self, period: PeriodType) -> Result<Vec<Entry>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| EntryError::DatabaseError(e.to_string()))?;
        Self::load_open(&mut conn, period)
    }

    pub fn get_entry(&self, period: PeriodType, entry_id: &str) -> Result<Entry> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| EntryError::DatabaseError(e.to_string()))?;
        Self::find(&mut conn, period, entry_id)
    }

    pub fn get_open_entry_for_activity(
        &self,
        period: PeriodType,
        activity_id: &str,
    ) -> Result<Option<Entry>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| EntryError::DatabaseError(e.to_string()))?;
        Self::find_open_for_activity(&mut conn, period, activity_id)
    }

    pub(crate) fn load_open(conn: &mut SqliteConnection, period: PeriodType) -> Result<Vec<Entry>> {
        dispatch!(period, load_open(conn))
    }

    pub(crate) fn find(
        conn: &mut SqliteConnection,
        period: PeriodType,
        entry_id: &str,
    ) -> Result<Entry> {
        dispatch!(period, find(conn, entry_id))
    }

    pub(crate) fn find_open_for_activity(
        conn: &mut SqliteConnection,
        period: PeriodType,
        activity_id: &str,
    ) -> Result<Option<Entry>> {
        dispatch!(period, find_open_for_activity(conn, activity_id))
    }

    pub(crate) fn insert(
        conn: &mut SqliteConnection,
        period: PeriodType,
        entry: &Entry,
    ) -> Result<Entry> {
        dispatch!(period, insert(conn, entry))
    }

    pub(crate) fn mark_closed(
        conn: &mut SqliteConnection,
        period: PeriodType,
        entry_id: &str,
        now: NaiveDateTime,
    ) -> Result<()> {
        dispatch!(period, mark_closed(conn, entry_id, now))
    }

    pub(crate) fn set_progress(
        conn: &mut SqliteConnection,
        period: PeriodType,
        entry_id: &str,
        value: i32,
        now: NaiveDateTime,
    ) -> Result<Entry> {
        dispatch!(period, set_progress(conn, entry_id, value, now))
    }

    pub(crate) fn delete(
        conn: &mut SqliteConnection,
        period: PeriodType,
        entry_id: &str,
    ) -> Result<usize> {
        dispatch!(period, delete(conn, entry_id))
    }
}
