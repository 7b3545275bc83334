pub mod history_repo;
pub mod routine_repo;
pub mod session_repo;
pub mod user_repo;

pub use history_repo::HistoryRepository;
pub use routine_repo::RoutineRepository;
pub use session_repo::SessionRepository;
pub use user_repo::UserRepository;
