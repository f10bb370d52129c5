pub mod mode;
pub mod pass;
pub mod result;
