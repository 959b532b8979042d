use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::api_models::{non_null, nullable};
use crate::schema::review_schedules;

#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable, Serialize)]
#[diesel(table_name = review_schedules)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ReviewSchedule {
    pub id: i32,
    pub review_date: NaiveDateTime,
    pub last_reviewed: Option<NaiveDateTime>,
    pub card_id: i32,
    pub user_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = review_schedules)]
pub struct NewReviewSchedule {
    pub review_date: NaiveDateTime,
    pub card_id: i32,
    pub user_id: i32,
}

/// Body of `PUT /review-schedules/{id}`. `review_date` may be left out but
/// not nulled; `last_reviewed: null` clears it. No field rules: the shape is
/// checked by deserialization alone, `Validate` lets it use `ValidatedJson`.
#[derive(Debug, Default, Deserialize, Validate, AsChangeset)]
#[diesel(table_name = review_schedules)]
pub struct ReviewScheduleChanges {
    #[serde(default, deserialize_with = "non_null")]
    pub review_date: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "nullable")]
    pub last_reviewed: Option<Option<NaiveDateTime>>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateReviewScheduleRequest {
    #[validate(range(min = 1, message = "Invalid card id"))]
    pub card_id: i32,
    /// Defaults to now, i.e. due immediately.
    #[serde(default)]
    pub review_date: Option<NaiveDateTime>,
}

/// Query string of the session endpoints; `at` defaults to now.
#[derive(Debug, Default, Deserialize)]
pub struct SessionParams {
    #[serde(default)]
    pub at: Option<NaiveDateTime>,
}
