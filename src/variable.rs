use std::collections::HashMap;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use indexmap::IndexMap;
use slotmap::{new_key_type, SlotMap};
use tracing::{debug, trace};

use crate::error::{FuzzyError, Result};
use crate::inputs::Inputs;
use crate::membership::MembershipFunction;

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

/// Whether a variable is read from a crisp value or produced by defuzzification.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum VariableKind {
    Input,
    Output,
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => f.write_str("IN"),
            Self::Output => f.write_str("OUT"),
        }
    }
}

impl FromStr for VariableKind {
    type Err = FuzzyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "IN" => Ok(Self::Input),
            "OUT" => Ok(Self::Output),
            _ => Err(FuzzyError::InvalidVariableKind(s.to_owned())),
        }
    }
}

/// Membership degrees of a single variable, by set name.
pub type Degrees = HashMap<String, f64>;

/// Membership degrees of every variable, by variable name.
pub type Fuzzified = HashMap<String, Degrees>;

#[derive(Clone, Debug, PartialEq)]
pub struct FuzzySet {
    name: String,
    membership: MembershipFunction,
}

impl FuzzySet {
    pub fn new(name: impl Into<String>, membership: MembershipFunction) -> Self {
        Self {
            name: name.into(),
            membership,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn membership_function(&self) -> &MembershipFunction {
        &self.membership
    }
}

#[derive(Clone, Debug)]
pub struct FuzzyVariable {
    name: String,
    kind: VariableKind,
    // Informational only, crisp values outside it are still evaluated
    range: RangeInclusive<f64>,
    sets: IndexMap<String, FuzzySet>,
}

impl FuzzyVariable {
    pub fn new(name: impl Into<String>, kind: VariableKind, range: RangeInclusive<f64>) -> Self {
        Self {
            name: name.into(),
            kind,
            range,
            sets: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    pub fn range(&self) -> &RangeInclusive<f64> {
        &self.range
    }

    /// Sets in the order they were first added.
    pub fn sets(&self) -> impl Iterator<Item = &FuzzySet> {
        self.sets.values()
    }

    pub fn set(&self, name: &str) -> Result<&FuzzySet> {
        self.sets.get(name).ok_or_else(|| FuzzyError::SetNotFound {
            variable: self.name.clone(),
            set: name.to_owned(),
        })
    }

    /// Inserts a set, replacing any previous set with the same name.
    pub fn add_fuzzy_set(&mut self, set: FuzzySet) {
        debug!(variable = %self.name, set = %set.name, membership = ?set.membership, "adding fuzzy set");
        self.sets.insert(set.name.clone(), set);
    }

    /// Evaluates every set of this variable against its crisp value.
    pub fn fuzzify(&self, inputs: &Inputs) -> Degrees {
        let crisp_value = inputs.get(&self.name);

        self.sets
            .values()
            .map(|set| (set.name.clone(), set.membership.degree_of_membership(crisp_value)))
            .collect()
    }
}

/// The variable catalog of a system, in declaration order.
#[derive(Clone, Debug, Default)]
pub struct Variables {
    slots: SlotMap<VariableKey, FuzzyVariable>,
    by_name: IndexMap<String, VariableKey>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        name: impl Into<String>,
        kind: VariableKind,
        range: RangeInclusive<f64>,
    ) -> Result<VariableKey> {
        let name = name.into();

        if self.by_name.contains_key(&name) {
            return Err(FuzzyError::DuplicateName(name));
        }

        debug!(variable = %name, %kind, ?range, "adding variable");

        let key = self.slots.insert(FuzzyVariable::new(name.clone(), kind, range));

        self.by_name.insert(name, key);

        Ok(key)
    }

    pub fn get(&self, key: VariableKey) -> Option<&FuzzyVariable> {
        self.slots.get(key)
    }

    pub fn key(&self, name: &str) -> Result<VariableKey> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| FuzzyError::VariableNotFound(name.to_owned()))
    }

    pub fn by_name(&self, name: &str) -> Result<&FuzzyVariable> {
        let key = self.key(name)?;

        Ok(&self.slots[key])
    }

    pub fn by_name_mut(&mut self, name: &str) -> Result<&mut FuzzyVariable> {
        let key = self.key(name)?;

        Ok(&mut self.slots[key])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FuzzyVariable> {
        self.by_name.values().map(|key| &self.slots[*key])
    }

    /// The first variable declared as an output, if any.
    pub fn output(&self) -> Option<&FuzzyVariable> {
        self.iter().find(|var| var.kind == VariableKind::Output)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Fuzzifies every variable, outputs included.
    pub fn fuzzify_all(&self, inputs: &Inputs) -> Fuzzified {
        let fuzzified: Fuzzified = self
            .iter()
            .map(|var| (var.name.clone(), var.fuzzify(inputs)))
            .collect();

        trace!(?fuzzified, "fuzzified variables");

        fuzzified
    }
}

#[test]
fn test_duplicate_variable_rejected() {
    let mut vars = Variables::new();

    vars.add("speed", VariableKind::Input, 0. ..=100.).unwrap();

    assert_eq!(
        vars.add("speed", VariableKind::Output, 0. ..=1.),
        Err(FuzzyError::DuplicateName("speed".into()))
    );
    assert_eq!(vars.len(), 1);
}

#[test]
fn test_set_overwrite_and_lookup() {
    let mut var = FuzzyVariable::new("speed", VariableKind::Input, 0. ..=100.);

    var.add_fuzzy_set(FuzzySet::new("slow", MembershipFunction::triangular(0., 0., 50.).unwrap()));
    var.add_fuzzy_set(FuzzySet::new("slow", MembershipFunction::triangular(0., 10., 50.).unwrap()));

    assert_eq!(var.sets().count(), 1);
    assert_eq!(var.set("slow").unwrap().membership_function().breakpoints(), &[0., 10., 50.]);
    assert_eq!(
        var.set("fast"),
        Err(FuzzyError::SetNotFound {
            variable: "speed".into(),
            set: "fast".into(),
        })
    );
}

#[test]
fn test_fuzzify_uses_own_value_and_defaults_to_zero() {
    let mut vars = Variables::new();

    vars.add("speed", VariableKind::Input, 0. ..=100.).unwrap();
    vars.add("load", VariableKind::Input, 0. ..=10.).unwrap();
    vars.add("empty", VariableKind::Output, 0. ..=1.).unwrap();
    vars.by_name_mut("speed")
        .unwrap()
        .add_fuzzy_set(FuzzySet::new("fast", MembershipFunction::triangular(50., 100., 150.).unwrap()));
    vars.by_name_mut("load")
        .unwrap()
        .add_fuzzy_set(FuzzySet::new("light", MembershipFunction::trapezoidal(-1., -1., 2., 4.).unwrap()));

    let inputs: Inputs = [("speed", 75.)].into_iter().collect();
    let fuzzified = vars.fuzzify_all(&inputs);

    assert_eq!(fuzzified["speed"]["fast"], 0.5);
    assert_eq!(fuzzified["load"]["light"], 1.);
    assert!(fuzzified["empty"].is_empty());
}

#[test]
fn test_declaration_order_and_output() {
    let mut vars = Variables::new();

    let out = vars.add("risk", VariableKind::Output, 0. ..=100.).unwrap();
    vars.add("age", VariableKind::Input, 0. ..=120.).unwrap();

    let names: Vec<_> = vars.iter().map(FuzzyVariable::name).collect();

    assert_eq!(names, ["risk", "age"]);
    assert_eq!(vars.output().map(FuzzyVariable::name), Some("risk"));
    assert_eq!(vars.get(out).map(FuzzyVariable::kind), Some(VariableKind::Output));
    assert_eq!(vars.by_name("height").err(), Some(FuzzyError::VariableNotFound("height".into())));
}

#[test]
fn test_kind_from_str() {
    assert_eq!("in".parse::<VariableKind>(), Ok(VariableKind::Input));
    assert_eq!("OUT".parse::<VariableKind>(), Ok(VariableKind::Output));
    assert!("both".parse::<VariableKind>().is_err());
}
