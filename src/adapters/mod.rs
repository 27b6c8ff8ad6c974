pub mod github;
pub mod linear;
