pub mod change;
pub mod event;
pub mod github;
pub mod payload;
