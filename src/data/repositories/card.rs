use diesel::prelude::*;

use crate::data::models::{Card, CardChanges, NewCard, NewReviewSchedule};
use crate::schema::{cards, review_schedules};

pub struct CardRepository;

impl CardRepository {
    pub fn list_for_user(conn: &mut SqliteConnection, user_id: i32) -> Result<Vec<Card>, diesel::result::Error> {
        cards::table
            .filter(cards::user_id.eq(user_id))
            .order_by(cards::id.asc())
            .select(Card::as_select())
            .load(conn)
    }

    pub fn find_for_user(
        conn: &mut SqliteConnection,
        card_id: i32,
        user_id: i32,
    ) -> Result<Option<Card>, diesel::result::Error> {
        cards::table
            .filter(cards::id.eq(card_id))
            .filter(cards::user_id.eq(user_id))
            .select(Card::as_select())
            .first(conn)
            .optional()
    }

    /// Inserts the card together with its first review, due at creation time.
    pub fn create(conn: &mut SqliteConnection, new_card: &NewCard) -> Result<Card, diesel::result::Error> {
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let card = diesel::insert_into(cards::table)
                .values(new_card)
                .returning(Card::as_returning())
                .get_result(conn)?;

            diesel::insert_into(review_schedules::table)
                .values(&NewReviewSchedule {
                    review_date: card.created_at,
                    card_id: card.id,
                    user_id: card.user_id,
                })
                .execute(conn)?;

            Ok(card)
        })
    }

    pub fn update(
        conn: &mut SqliteConnection,
        card_id: i32,
        user_id: i32,
        changes: &CardChanges,
    ) -> Result<Option<Card>, diesel::result::Error> {
        diesel::update(
            cards::table
                .filter(cards::id.eq(card_id))
                .filter(cards::user_id.eq(user_id)),
        )
        .set(changes)
        .returning(Card::as_returning())
        .get_result(conn)
        .optional()
    }

    pub fn delete(conn: &mut SqliteConnection, card_id: i32, user_id: i32) -> Result<usize, diesel::result::Error> {
        diesel::delete(
            cards::table
                .filter(cards::id.eq(card_id))
                .filter(cards::user_id.eq(user_id)),
        )
        .execute(conn)
    }
}
