#![allow(dead_code)]

pub mod app_builder;
pub mod auth;
pub mod fixtures;

pub const TEST_SECRET: &[u8] = b"test-secret-for-catalog-api";
