#![cfg(test)]

pub mod common;
pub mod local_storage_tests;
pub mod scenario_tests;
