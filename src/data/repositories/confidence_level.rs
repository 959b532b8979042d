use diesel::prelude::*;

use crate::data::models::{ConfidenceLevel, ConfidenceLevelForm, NewConfidenceLevel, STARTER_LEVELS};
use crate::schema::{cards, confidence_levels};

pub struct ConfidenceLevelRepository;

impl ConfidenceLevelRepository {
    pub fn list_for_user(
        conn: &mut SqliteConnection,
        user_id: i32,
    ) -> Result<Vec<ConfidenceLevel>, diesel::result::Error> {
        confidence_levels::table
            .filter(confidence_levels::user_id.eq(user_id))
            .order_by(confidence_levels::interval_days.asc())
            .then_order_by(confidence_levels::id.asc())
            .select(ConfidenceLevel::as_select())
            .load(conn)
    }

    pub fn find_for_user(
        conn: &mut SqliteConnection,
        level_id: i32,
        user_id: i32,
    ) -> Result<Option<ConfidenceLevel>, diesel::result::Error> {
        confidence_levels::table
            .filter(confidence_levels::id.eq(level_id))
            .filter(confidence_levels::user_id.eq(user_id))
            .select(ConfidenceLevel::as_select())
            .first(conn)
            .optional()
    }

    pub fn default_for_user(
        conn: &mut SqliteConnection,
        user_id: i32,
    ) -> Result<Option<ConfidenceLevel>, diesel::result::Error> {
        confidence_levels::table
            .filter(confidence_levels::user_id.eq(user_id))
            .filter(confidence_levels::is_default.eq(true))
            .select(ConfidenceLevel::as_select())
            .first(conn)
            .optional()
    }

    pub fn create(
        conn: &mut SqliteConnection,
        user_id: i32,
        form: &ConfidenceLevelForm,
    ) -> Result<ConfidenceLevel, diesel::result::Error> {
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            if form.is_default {
                Self::clear_default(conn, user_id)?;
            }

            diesel::insert_into(confidence_levels::table)
                .values(&NewConfidenceLevel {
                    description: form.description.trim(),
                    interval_days: form.interval_days,
                    is_default: form.is_default,
                    user_id,
                })
                .returning(ConfidenceLevel::as_returning())
                .get_result(conn)
        })
    }

    pub fn update(
        conn: &mut SqliteConnection,
        level_id: i32,
        user_id: i32,
        form: &ConfidenceLevelForm,
    ) -> Result<Option<ConfidenceLevel>, diesel::result::Error> {
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            if Self::find_for_user(conn, level_id, user_id)?.is_none() {
                return Ok(None);
            }

            if form.is_default {
                Self::clear_default(conn, user_id)?;
            }

            diesel::update(confidence_levels::table.find(level_id))
                .set((
                    confidence_levels::description.eq(form.description.trim()),
                    confidence_levels::interval_days.eq(form.interval_days),
                    confidence_levels::is_default.eq(form.is_default),
                ))
                .returning(ConfidenceLevel::as_returning())
                .get_result(conn)
                .map(Some)
        })
    }

    pub fn is_in_use(conn: &mut SqliteConnection, level_id: i32) -> Result<bool, diesel::result::Error> {
        use diesel::dsl::exists;
        use diesel::select;

        select(exists(cards::table.filter(cards::confidence_level_id.eq(level_id)))).get_result(conn)
    }

    pub fn delete(
        conn: &mut SqliteConnection,
        level_id: i32,
        user_id: i32,
    ) -> Result<usize, diesel::result::Error> {
        diesel::delete(
            confidence_levels::table
                .filter(confidence_levels::id.eq(level_id))
                .filter(confidence_levels::user_id.eq(user_id)),
        )
        .execute(conn)
    }

    pub fn seed_starter_levels(conn: &mut SqliteConnection, user_id: i32) -> Result<(), diesel::result::Error> {
        let levels: Vec<NewConfidenceLevel> = STARTER_LEVELS
            .iter()
            .enumerate()
            .map(|(i, &(description, interval_days))| NewConfidenceLevel {
                description,
                interval_days,
                is_default: i == 0,
                user_id,
            })
            .collect();

        diesel::insert_into(confidence_levels::table)
            .values(&levels)
            .execute(conn)?;
        Ok(())
    }

    fn clear_default(conn: &mut SqliteConnection, user_id: i32) -> Result<usize, diesel::result::Error> {
        diesel::update(
            confidence_levels::table
                .filter(confidence_levels::user_id.eq(user_id))
                .filter(confidence_levels::is_default.eq(true)),
        )
        .set(confidence_levels::is_default.eq(false))
        .execute(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::repositories::UserRepository;
    use crate::data::repositories::test_support::test_conn;

    fn level(description: &str, interval_days: i32, is_default: bool) -> ConfidenceLevelForm {
        ConfidenceLevelForm {
            description: description.to_string(),
            interval_days,
            is_default,
        }
    }

    fn default_count(conn: &mut SqliteConnection, user_id: i32) -> usize {
        ConfidenceLevelRepository::list_for_user(conn, user_id)
            .unwrap()
            .iter()
            .filter(|l| l.is_default)
            .count()
    }

    #[test]
    fn new_default_demotes_previous_default() {
        let mut conn = test_conn();
        let user = UserRepository::create_user(&mut conn, "lexi", None, "hash").unwrap();

        let created =
            ConfidenceLevelRepository::create(&mut conn, user.id, &level("Fresh", 2, true)).unwrap();

        assert_eq!(default_count(&mut conn, user.id), 1);
        let default = ConfidenceLevelRepository::default_for_user(&mut conn, user.id)
            .unwrap()
            .unwrap();
        assert_eq!(default.id, created.id);
    }

    #[test]
    fn update_to_default_keeps_single_default() {
        let mut conn = test_conn();
        let user = UserRepository::create_user(&mut conn, "lexi", None, "hash").unwrap();
        let high = ConfidenceLevelRepository::list_for_user(&mut conn, user.id)
            .unwrap()
            .into_iter()
            .find(|l| l.description == "High")
            .unwrap();

        let updated =
            ConfidenceLevelRepository::update(&mut conn, high.id, user.id, &level("High", 10, true))
                .unwrap()
                .unwrap();

        assert!(updated.is_default);
        assert_eq!(updated.interval_days, 10);
        assert_eq!(default_count(&mut conn, user.id), 1);
    }

    #[test]
    fn update_of_foreign_level_changes_nothing() {
        let mut conn = test_conn();
        let owner = UserRepository::create_user(&mut conn, "owner", None, "hash").unwrap();
        let other = UserRepository::create_user(&mut conn, "other", None, "hash").unwrap();
        let owned = ConfidenceLevelRepository::default_for_user(&mut conn, owner.id)
            .unwrap()
            .unwrap();

        let result =
            ConfidenceLevelRepository::update(&mut conn, owned.id, other.id, &level("Mine", 5, true))
                .unwrap();

        assert!(result.is_none());
        assert_eq!(default_count(&mut conn, other.id), 1);
        assert_eq!(
            ConfidenceLevelRepository::find_for_user(&mut conn, owned.id, owner.id)
                .unwrap()
                .unwrap()
                .description,
            "Low"
        );
    }

    #[test]
    fn store_rejects_second_default_row() {
        let mut conn = test_conn();
        let user = UserRepository::create_user(&mut conn, "lexi", None, "hash").unwrap();

        let result = diesel::insert_into(confidence_levels::table)
            .values(&NewConfidenceLevel {
                description: "Sneaky",
                interval_days: 4,
                is_default: true,
                user_id: user.id,
            })
            .execute(&mut conn);
        assert!(result.is_err());
    }
}
