use diesel::prelude::*;

use crate::data::models::{NewReviewSchedule, ReviewSchedule, ReviewScheduleChanges};
use crate::schema::review_schedules;

pub struct ReviewScheduleRepository;

impl ReviewScheduleRepository {
    pub fn list_for_user(
        conn: &mut SqliteConnection,
        user_id: i32,
    ) -> Result<Vec<ReviewSchedule>, diesel::result::Error> {
        review_schedules::table
            .filter(review_schedules::user_id.eq(user_id))
            .order_by((review_schedules::review_date.asc(), review_schedules::id.asc()))
            .select(ReviewSchedule::as_select())
            .load(conn)
    }

    pub fn find_for_user(
        conn: &mut SqliteConnection,
        schedule_id: i32,
        user_id: i32,
    ) -> Result<Option<ReviewSchedule>, diesel::result::Error> {
        review_schedules::table
            .filter(review_schedules::id.eq(schedule_id))
            .filter(review_schedules::user_id.eq(user_id))
            .select(ReviewSchedule::as_select())
            .first(conn)
            .optional()
    }

    pub fn create(
        conn: &mut SqliteConnection,
        new_schedule: &NewReviewSchedule,
    ) -> Result<ReviewSchedule, diesel::result::Error> {
        diesel::insert_into(review_schedules::table)
            .values(new_schedule)
            .returning(ReviewSchedule::as_returning())
            .get_result(conn)
    }

    pub fn update(
        conn: &mut SqliteConnection,
        schedule_id: i32,
        user_id: i32,
        changes: &ReviewScheduleChanges,
    ) -> Result<Option<ReviewSchedule>, diesel::result::Error> {
        // An empty changeset is an error in diesel; treat it as a read
        if changes.review_date.is_none() && changes.last_reviewed.is_none() {
            return Self::find_for_user(conn, schedule_id, user_id);
        }

        diesel::update(
            review_schedules::table
                .filter(review_schedules::id.eq(schedule_id))
                .filter(review_schedules::user_id.eq(user_id)),
        )
        .set(changes)
        .returning(ReviewSchedule::as_returning())
        .get_result(conn)
        .optional()
    }

    pub fn delete(
        conn: &mut SqliteConnection,
        schedule_id: i32,
        user_id: i32,
    ) -> Result<usize, diesel::result::Error> {
        diesel::delete(
            review_schedules::table
                .filter(review_schedules::id.eq(schedule_id))
                .filter(review_schedules::user_id.eq(user_id)),
        )
        .execute(conn)
    }
}
