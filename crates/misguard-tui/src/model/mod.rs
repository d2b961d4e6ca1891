pub mod counter;
pub mod prompt;
