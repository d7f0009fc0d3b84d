pub mod dashboard;
pub mod ideas;
pub mod renewals;
pub mod subscriptions;
pub mod ui;
