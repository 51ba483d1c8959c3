//! IDE layer tests: strategy dispatch, completion rendering, and
//! end-to-end suggestion scenarios.

pub mod tests_scenarios;
pub mod tests_strategies;
