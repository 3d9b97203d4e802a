pub mod github;
pub mod render;
pub mod webhook;
