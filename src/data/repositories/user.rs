use chrono::Utc;
use diesel::prelude::*;

use super::ConfidenceLevelRepository;
use crate::data::models::{NewUser, User};
use crate::schema::users;

pub struct UserRepository;

impl UserRepository {
    pub fn find_by_username(
        conn: &mut SqliteConnection,
        username: &str,
    ) -> Result<Option<User>, diesel::result::Error> {
        users::table
            .filter(users::username.eq(username))
            .select(User::as_select())
            .first(conn)
            .optional()
    }

    pub fn find_by_id(
        conn: &mut SqliteConnection,
        user_id: i32,
    ) -> Result<Option<User>, diesel::result::Error> {
        users::table
            .find(user_id)
            .select(User::as_select())
            .first(conn)
            .optional()
    }

    pub fn username_exists(
        conn: &mut SqliteConnection,
        username: &str,
    ) -> Result<bool, diesel::result::Error> {
        use diesel::dsl::exists;
        use diesel::select;

        select(exists(users::table.filter(users::username.eq(username)))).get_result(conn)
    }

    /// Inserts the user and its starter confidence levels atomically.
    pub fn create_user(
        conn: &mut SqliteConnection,
        username: &str,
        email: Option<&str>,
        password_hash: &str,
    ) -> Result<User, diesel::result::Error> {
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let user = diesel::insert_into(users::table)
                .values(&NewUser {
                    username,
                    email,
                    password_hash,
                    created_at: Utc::now().naive_utc(),
                })
                .returning(User::as_returning())
                .get_result(conn)?;

            ConfidenceLevelRepository::seed_starter_levels(conn, user.id)?;
            Ok(user)
        })
    }

    /// Cards, confidence levels and review schedules go with the user.
    pub fn delete(conn: &mut SqliteConnection, user_id: i32) -> Result<usize, diesel::result::Error> {
        diesel::delete(users::table.find(user_id)).execute(conn)
    }
}
