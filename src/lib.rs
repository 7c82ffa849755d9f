//! A small fuzzy inference toolbox.
//!
//! Variables own triangular or trapezoidal fuzzy sets, rules join two
//! `variable is set` clauses with `and`, `or` or `and_not`, and a run turns
//! crisp inputs into a single crisp output by averaging the centroids of the
//! activated output sets, weighted by their degrees.
//!
//! ```
//! use fuzzy_toolbox::{FuzzySystem, Inputs, Shape, VariableKind};
//!
//! let mut system = FuzzySystem::new("fan", "fan speed from room temperature");
//!
//! system.add_variable("temp", VariableKind::Input, 0. ..=40.)?;
//! system.add_variable("speed", VariableKind::Output, 0. ..=100.)?;
//! system.add_fuzzy_set("temp", "cold", Shape::Trapezoidal, &[0., 0., 10., 20.])?;
//! system.add_fuzzy_set("temp", "hot", Shape::Trapezoidal, &[20., 30., 40., 40.])?;
//! system.add_fuzzy_set("speed", "slow", Shape::Triangular, &[0., 10., 20.])?;
//! system.add_fuzzy_set("speed", "fast", Shape::Triangular, &[60., 80., 100.])?;
//! system.add_rule_tokens(&["temp", "cold", "or", "temp", "cold", "speed", "slow"])?;
//! system.add_rule_tokens(&["temp", "hot", "or", "temp", "hot", "speed", "fast"])?;
//!
//! let mut inputs = Inputs::new();
//! inputs.add("temp", 35.);
//!
//! assert_eq!(system.run(&inputs)?.crisp_value(), 80.);
//! # Ok::<(), fuzzy_toolbox::FuzzyError>(())
//! ```

mod error;
mod inference;
mod inputs;
mod math;
mod membership;
mod ops;
mod outputs;
mod rules;
mod system;
mod variable;

pub use error::{FuzzyError, Result};
pub use inference::{Activation, Inference};
pub use inputs::Inputs;
pub use membership::{MembershipFunction, Shape};
pub use ops::{Aggregation, AndNotOp, Operator};
pub use outputs::Outputs;
pub use rules::{Clause, FuzzyRule, Rules};
pub use system::FuzzySystem;
pub use variable::{Degrees, Fuzzified, FuzzySet, FuzzyVariable, VariableKey, VariableKind, Variables};
