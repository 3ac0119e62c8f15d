pub mod clock;
pub mod edit_session;
pub mod services;
pub mod utils;

pub use clock::{Clock, SystemClock};
pub use edit_session::EditSession;
