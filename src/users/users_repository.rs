use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{get_connection, DbPool};
use crate::schema::users;
use crate::users::users_errors::{Result, UserError};
use crate::users::users_model::{NewUser, User};

pub struct UserRepository {
    pool: Arc<DbPool>,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        UserRepository { pool }
    }

    pub fn get_by_id(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;
        Self::find(&mut conn, user_id)
    }

    pub fn create(&self, mut new_user: NewUser) -> Result<User> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        new_user.id = Some(Uuid::new_v4().to_string());

        Ok(diesel::insert_into(users::table)
            .values(&new_user)
            .returning(users::all_columns)
            .get_result(&mut conn)?)
    }

    /// Lookup for use inside a caller-owned transaction.
    pub(crate) fn find(conn: &mut SqliteConnection, user_id: &str) -> Result<User> {
        Ok(users::table.find(user_id).first::<User>(conn)?)
    }

    /// Persists a mutated balance inside a caller-owned transaction.
    pub(crate) fn save(conn: &mut SqliteConnection, user: &User) -> Result<User> {
        let mut updated = user.clone();
        updated.updated_at = Utc::now().naive_utc();

        diesel::update(users::table.find(&updated.id))
            .set(&updated)
            .execute(conn)?;

        Self::find(conn, &updated.id)
    }
}
