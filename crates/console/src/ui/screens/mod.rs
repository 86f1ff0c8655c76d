pub mod assign;
pub mod dashboard;
pub mod import;
pub mod reports;
pub mod stock;
pub mod users;
