pub mod branches;
pub mod text;
