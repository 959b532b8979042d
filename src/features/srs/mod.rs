pub mod scheduler;

pub use scheduler::{ReviewScheduler, advance_review_date};
