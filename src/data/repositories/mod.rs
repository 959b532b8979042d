pub mod card;
pub mod confidence_level;
pub mod review_schedule;
pub mod user;

pub use card::CardRepository;
pub use confidence_level::ConfidenceLevelRepository;
pub use review_schedule::ReviewScheduleRepository;
pub use user::UserRepository;
