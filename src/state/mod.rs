pub mod board;
pub mod calendar;
pub mod dashboard;
pub mod drafts;
pub mod fetch;
pub mod filters;
pub mod permissions;
