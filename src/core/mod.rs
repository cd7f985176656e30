pub mod event;
pub mod invitation;
pub mod notification;
pub mod project;
pub mod settings;
pub mod task;
pub mod team;
pub mod user;
