pub mod session_service;
pub mod streak_service;

pub use session_service::SessionService;
pub use streak_service::StreakService;
