pub mod alert;
pub mod event;
pub mod failure;
pub mod outcome;
pub mod retry;
pub mod slack;
