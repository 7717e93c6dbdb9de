pub mod alert;
pub mod health;
