pub mod extract;
pub mod logging;
pub mod session;

pub use extract::ValidatedJson;
pub use session::{CurrentUser, get_current_user_id, set_user_session};
