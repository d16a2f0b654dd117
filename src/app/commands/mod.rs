pub mod assign;
pub mod generate;
pub mod groups;
pub mod members;
