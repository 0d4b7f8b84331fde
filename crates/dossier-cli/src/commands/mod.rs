//! Command implementations.

pub mod check;
pub mod config;
pub mod reconcile;
pub mod similarity;

pub use self::check::execute_check;
pub use self::config::execute_config;
pub use self::reconcile::execute_reconcile;
pub use self::similarity::execute_similarity;
