pub mod dasch_test;
pub mod builtin_test;
