use chrono::{Duration, NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::data::models::ReviewSchedule;
use crate::schema::{cards, confidence_levels, review_schedules};

/// Next review date after a completed review: the level's interval, in whole
/// days, added to the date the card was scheduled for.
pub fn advance_review_date(review_date: NaiveDateTime, interval_days: i32) -> NaiveDateTime {
    review_date + Duration::days(i64::from(interval_days))
}

/// Due-review selection and interval advancement for one user's schedules
pub struct ReviewScheduler<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> ReviewScheduler<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        ReviewScheduler { conn }
    }

    /// Schedules with `review_date <= reference` (now when `None`).
    pub fn due(
        &mut self,
        user_id: i32,
        reference: Option<NaiveDateTime>,
    ) -> Result<Vec<ReviewSchedule>, diesel::result::Error> {
        let reference = reference.unwrap_or_else(|| Utc::now().naive_utc());

        review_schedules::table
            .filter(review_schedules::user_id.eq(user_id))
            .filter(review_schedules::review_date.le(reference))
            .order_by((review_schedules::review_date.asc(), review_schedules::id.asc()))
            .select(ReviewSchedule::as_select())
            .load(self.conn)
    }

    /// Advances every due schedule by the interval of its own card's
    /// confidence level and stamps `last_reviewed` with the reference
    /// instant. All rows change or none do.
    pub fn complete_session(
        &mut self,
        user_id: i32,
        reference: Option<NaiveDateTime>,
    ) -> Result<Vec<ReviewSchedule>, diesel::result::Error> {
        let reference = reference.unwrap_or_else(|| Utc::now().naive_utc());

        self.conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let due: Vec<(ReviewSchedule, i32)> = review_schedules::table
                .inner_join(cards::table.inner_join(confidence_levels::table))
                .filter(review_schedules::user_id.eq(user_id))
                .filter(review_schedules::review_date.le(reference))
                .order_by(review_schedules::id.asc())
                .select((ReviewSchedule::as_select(), confidence_levels::interval_days))
                .load(conn)?;

            let mut advanced = Vec::with_capacity(due.len());
            for (schedule, interval_days) in due {
                let next = advance_review_date(schedule.review_date, interval_days);
                let updated = diesel::update(review_schedules::table.find(schedule.id))
                    .set((
                        review_schedules::review_date.eq(next),
                        review_schedules::last_reviewed.eq(Some(reference)),
                    ))
                    .returning(ReviewSchedule::as_returning())
                    .get_result(conn)?;
                advanced.push(updated);
            }

            log::info!(
                "Completed review session for user {}: {} schedule(s) advanced",
                user_id,
                advanced.len()
            );
            Ok(advanced)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::models::{ConfidenceLevelForm, NewCard, NewReviewSchedule};
    use crate::data::repositories::test_support::test_conn;
    use crate::data::repositories::{
        CardRepository, ConfidenceLevelRepository, ReviewScheduleRepository, UserRepository,
    };
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn level(conn: &mut SqliteConnection, user_id: i32, interval_days: i32) -> i32 {
        let form = ConfidenceLevelForm {
            description: format!("Every {} days", interval_days),
            interval_days,
            is_default: false,
        };
        ConfidenceLevelRepository::create(conn, user_id, &form).unwrap().id
    }

    /// Card whose only schedule is moved to `review_date`.
    fn card_due_at(
        conn: &mut SqliteConnection,
        user_id: i32,
        level_id: i32,
        review_date: NaiveDateTime,
    ) -> ReviewSchedule {
        let created = at(2024, 5, 1, 0);
        let card = CardRepository::create(
            conn,
            &NewCard {
                term: "term",
                definition: "definition",
                example: None,
                image_url: None,
                audio_url: None,
                user_id,
                confidence_level_id: level_id,
                created_at: created,
                updated_at: created,
            },
        )
        .unwrap();
        diesel::update(review_schedules::table.filter(review_schedules::card_id.eq(card.id)))
            .set(review_schedules::review_date.eq(review_date))
            .returning(ReviewSchedule::as_returning())
            .get_result(conn)
            .unwrap()
    }

    #[test]
    fn advance_adds_whole_days() {
        assert_eq!(advance_review_date(at(2024, 5, 7, 0), 3), at(2024, 5, 10, 0));
        assert_eq!(advance_review_date(at(2024, 12, 30, 9), 365), at(2025, 12, 30, 9));
        assert_eq!(advance_review_date(at(2024, 2, 28, 12), 1), at(2024, 2, 29, 12));
    }

    #[test]
    fn due_selection_is_boundary_inclusive() {
        let mut conn = test_conn();
        let user = UserRepository::create_user(&mut conn, "lexi", None, "hash").unwrap();
        let level_id = level(&mut conn, user.id, 3);
        let reference = at(2024, 5, 8, 15);

        let exact = card_due_at(&mut conn, user.id, level_id, reference);
        let later = card_due_at(&mut conn, user.id, level_id, at(2024, 5, 9, 12));
        let earlier = card_due_at(&mut conn, user.id, level_id, at(2024, 5, 7, 12));

        let due = ReviewScheduler::new(&mut conn).due(user.id, Some(reference)).unwrap();
        let ids: Vec<i32> = due.iter().map(|s| s.id).collect();

        assert_eq!(ids, vec![earlier.id, exact.id]);
        assert!(!ids.contains(&later.id));
    }

    #[test]
    fn due_selection_ignores_other_users() {
        let mut conn = test_conn();
        let lexi = UserRepository::create_user(&mut conn, "lexi", None, "hash").unwrap();
        let sam = UserRepository::create_user(&mut conn, "sam", None, "hash").unwrap();
        let level_id = level(&mut conn, sam.id, 2);
        card_due_at(&mut conn, sam.id, level_id, at(2024, 5, 1, 0));

        let due = ReviewScheduler::new(&mut conn)
            .due(lexi.id, Some(at(2024, 6, 1, 0)))
            .unwrap();
        assert!(due.is_empty());
    }

    #[test]
    fn completing_session_uses_each_cards_own_interval() {
        let mut conn = test_conn();
        let user = UserRepository::create_user(&mut conn, "lexi", None, "hash").unwrap();
        let three = level(&mut conn, user.id, 3);
        let ten = level(&mut conn, user.id, 10);
        let reference = at(2024, 5, 8, 15);

        let a = card_due_at(&mut conn, user.id, three, at(2024, 5, 7, 0));
        let b = card_due_at(&mut conn, user.id, ten, at(2024, 5, 8, 0));
        let not_due = card_due_at(&mut conn, user.id, three, at(2024, 5, 20, 0));

        let advanced = ReviewScheduler::new(&mut conn)
            .complete_session(user.id, Some(reference))
            .unwrap();
        assert_eq!(advanced.len(), 2);

        let a = ReviewScheduleRepository::find_for_user(&mut conn, a.id, user.id).unwrap().unwrap();
        let b = ReviewScheduleRepository::find_for_user(&mut conn, b.id, user.id).unwrap().unwrap();
        let untouched = ReviewScheduleRepository::find_for_user(&mut conn, not_due.id, user.id)
            .unwrap()
            .unwrap();

        assert_eq!(a.review_date, at(2024, 5, 10, 0));
        assert_eq!(b.review_date, at(2024, 5, 18, 0));
        assert_eq!(a.last_reviewed, Some(reference));
        assert_eq!(b.last_reviewed, Some(reference));
        assert_eq!(untouched, not_due);
    }

    #[test]
    fn completed_schedules_are_no_longer_due() {
        let mut conn = test_conn();
        let user = UserRepository::create_user(&mut conn, "lexi", None, "hash").unwrap();
        let level_id = level(&mut conn, user.id, 3);
        let reference = at(2024, 5, 8, 15);
        card_due_at(&mut conn, user.id, level_id, at(2024, 5, 7, 0));

        let mut scheduler = ReviewScheduler::new(&mut conn);
        scheduler.complete_session(user.id, Some(reference)).unwrap();
        assert!(scheduler.due(user.id, Some(reference)).unwrap().is_empty());

        // Running it again with nothing due is a no-op
        assert!(scheduler.complete_session(user.id, Some(reference)).unwrap().is_empty());
    }

    #[test]
    fn failed_session_leaves_every_schedule_untouched() {
        let mut conn = test_conn();
        let user = UserRepository::create_user(&mut conn, "lexi", None, "hash").unwrap();
        let level_id = level(&mut conn, user.id, 3);
        let first = card_due_at(&mut conn, user.id, level_id, at(2024, 5, 7, 0));
        let second = card_due_at(&mut conn, user.id, level_id, at(2024, 5, 7, 0));

        // The first row updates fine, the second one aborts the batch
        diesel::sql_query(format!(
            "CREATE TRIGGER refuse_review_update BEFORE UPDATE ON review_schedules \
             WHEN NEW.id = {} BEGIN SELECT RAISE(ABORT, 'review update refused'); END",
            second.id
        ))
        .execute(&mut conn)
        .unwrap();

        let result = ReviewScheduler::new(&mut conn).complete_session(user.id, Some(at(2024, 5, 8, 15)));
        assert!(result.is_err());

        let first_after = ReviewScheduleRepository::find_for_user(&mut conn, first.id, user.id)
            .unwrap()
            .unwrap();
        assert_eq!(first_after, first);
        assert_eq!(first_after.last_reviewed, None);
    }

    #[test]
    fn manually_created_schedule_is_advanced_too() {
        let mut conn = test_conn();
        let user = UserRepository::create_user(&mut conn, "lexi", None, "hash").unwrap();
        let level_id = level(&mut conn, user.id, 5);
        let first = card_due_at(&mut conn, user.id, level_id, at(2030, 1, 1, 0));

        let extra = ReviewScheduleRepository::create(
            &mut conn,
            &NewReviewSchedule {
                review_date: at(2024, 5, 1, 0),
                card_id: first.card_id,
                user_id: user.id,
            },
        )
        .unwrap();

        ReviewScheduler::new(&mut conn)
            .complete_session(user.id, Some(at(2024, 5, 2, 0)))
            .unwrap();

        let extra = ReviewScheduleRepository::find_for_user(&mut conn, extra.id, user.id)
            .unwrap()
            .unwrap();
        assert_eq!(extra.review_date, at(2024, 5, 6, 0));
    }
}
