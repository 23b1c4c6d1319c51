//! Contract tests for class_system component
//!
//! These tests pin the public surface consumers of the class system rely on.

mod registry_contract_tests;
mod error_contract_tests;
