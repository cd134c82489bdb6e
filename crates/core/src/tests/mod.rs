//! Scenario tests spanning multiple modules, on top of the per-module unit
//! tests. Fixture data lives in [`fixtures`].


mod compose_tests;
mod derive_tests;
mod locks_tests;
