//! moneymap-core: domain types and arithmetic for the moneymap spending tracker

pub mod budget;
pub mod store;
pub mod time;
pub mod transaction;

pub use budget::{budget_status, Budget, BudgetStatus};
pub use store::{BudgetStore, MemoryStore, TransactionStore};
pub use time::{is_valid_month, month_of, Clock, FixedClock, SystemClock};
pub use transaction::{Category, ParsedTransaction, PaymentMethod, PersistedTransaction};
