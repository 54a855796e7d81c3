pub mod config;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

// Re-export commonly used items
pub use config::AppConfig;
pub use models::expense::{Expense, InputError};
pub use store::ExpenseStore;
pub use ui::app::App;
