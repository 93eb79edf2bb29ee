//! # streamcheck Report
//!
//! Renders the Cucumber JSON written by the BDD suite into a single,
//! self-contained `index.html`.

mod error;
mod generator;
pub mod model;
mod render;

pub use error::ReportError;
pub use generator::{ReportGenerator, ReportOutput};
pub use model::{Feature, Scenario, Status, Step, Totals};

#[cfg(test)]
mod test_fixtures;
