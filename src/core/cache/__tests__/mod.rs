pub mod support;
pub mod generation_test;
