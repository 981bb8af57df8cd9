//! Integration tests for ethdo.

pub mod beacon_tests;
pub mod mock;
pub mod core_tests;
pub mod signature_tests;
pub mod wallet_tests;
