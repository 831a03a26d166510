mod common;
mod retry_tests;
