#![cfg(test)]

pub mod common;
pub mod app_tests;
pub mod scenario_tests;
