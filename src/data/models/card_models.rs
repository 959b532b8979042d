use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::api_models::{not_blank, nullable};
use crate::schema::cards;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Serialize)]
#[diesel(table_name = cards)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Card {
    pub id: i32,
    pub term: String,
    pub definition: String,
    #[serde(rename = "example_sentence")]
    pub example: Option<String>,
    pub image_url: Option<String>,
    pub audio_url: Option<String>,
    pub user_id: i32,
    pub confidence_level_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = cards)]
pub struct NewCard<'a> {
    pub term: &'a str,
    pub definition: &'a str,
    pub example: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub audio_url: Option<&'a str>,
    pub user_id: i32,
    pub confidence_level_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial update; `None` leaves the column untouched, `Some(None)` sets NULL.
#[derive(AsChangeset)]
#[diesel(table_name = cards)]
pub struct CardChanges<'a> {
    pub term: Option<&'a str>,
    pub definition: Option<&'a str>,
    pub example: Option<Option<&'a str>>,
    pub image_url: Option<Option<&'a str>>,
    pub audio_url: Option<Option<&'a str>>,
    pub confidence_level_id: Option<i32>,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCardRequest {
    #[validate(length(min = 1, message = "Term is required"), custom(function = "not_blank"))]
    pub term: String,
    #[validate(length(min = 1, message = "Definition is required"), custom(function = "not_blank"))]
    pub definition: String,
    #[serde(default, rename = "example_sentence")]
    pub example: Option<String>,
    #[validate(url(message = "Invalid image URL"))]
    #[serde(default)]
    pub image_url: Option<String>,
    #[validate(url(message = "Invalid audio URL"))]
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub confidence_level_id: Option<i32>,
}

/// Absent fields are kept; `null` clears the optional ones.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCardRequest {
    #[validate(length(min = 1, message = "Term must not be empty"), custom(function = "not_blank"))]
    #[serde(default)]
    pub term: Option<String>,
    #[validate(length(min = 1, message = "Definition must not be empty"), custom(function = "not_blank"))]
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default, rename = "example_sentence", deserialize_with = "nullable")]
    pub example: Option<Option<String>>,
    #[validate(url(message = "Invalid image URL"))]
    #[serde(default, deserialize_with = "nullable")]
    pub image_url: Option<Option<String>>,
    #[validate(url(message = "Invalid audio URL"))]
    #[serde(default, deserialize_with = "nullable")]
    pub audio_url: Option<Option<String>>,
    #[serde(default)]
    pub confidence_level_id: Option<i32>,
}

impl UpdateCardRequest {
    pub fn changes(&self, updated_at: NaiveDateTime) -> CardChanges<'_> {
        CardChanges {
            term: self.term.as_deref().map(str::trim),
            definition: self.definition.as_deref().map(str::trim),
            example: self.example.as_ref().map(Option::as_deref),
            image_url: self.image_url.as_ref().map(Option::as_deref),
            audio_url: self.audio_url.as_ref().map(Option::as_deref),
            confidence_level_id: self.confidence_level_id,
            updated_at,
        }
    }
}
