use std::fmt;

use crate::error::FuzzyError;
use crate::ops::Operator;

/// A `variable is set` proposition.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Clause {
    pub variable: String,
    pub set: String,
}

impl Clause {
    pub fn new(variable: impl Into<String>, set: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            set: set.into(),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.variable, self.set)
    }
}

/// `if <left> <op> <right> then <consequence>`
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct FuzzyRule {
    pub left: Clause,
    pub op: Operator,
    pub right: Clause,
    pub consequence: Clause,
}

impl FuzzyRule {
    pub fn new(left: Clause, op: Operator, right: Clause, consequence: Clause) -> Self {
        Self {
            left,
            op,
            right,
            consequence,
        }
    }

    /// Every clause the rule mentions, antecedents first.
    pub fn clauses(&self) -> [&Clause; 3] {
        [&self.left, &self.right, &self.consequence]
    }
}

impl fmt::Display for FuzzyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "If {} {} {} => {}", self.left, self.op, self.right, self.consequence)
    }
}

/// Builds a rule from its seven positional tokens:
/// `var1 set1 operator var2 set2 out_var out_set`.
impl TryFrom<&[&str]> for FuzzyRule {
    type Error = FuzzyError;

    fn try_from(tokens: &[&str]) -> Result<Self, Self::Error> {
        let &[var1, set1, op, var2, set2, out_var, out_set] = tokens else {
            return Err(FuzzyError::InvalidRuleFormat(tokens.len()));
        };

        Ok(Self::new(
            Clause::new(var1, set1),
            op.parse()?,
            Clause::new(var2, set2),
            Clause::new(out_var, out_set),
        ))
    }
}

#[derive(Clone, Debug, Default)]
pub struct Rules(pub(crate) Vec<FuzzyRule>);

impl Rules {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn add(&mut self, rule: FuzzyRule) {
        self.0.push(rule);
    }

    pub fn iter(&self) -> impl Iterator<Item = &FuzzyRule> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<FuzzyRule> for Rules {
    fn from_iter<I: IntoIterator<Item = FuzzyRule>>(iter: I) -> Self {
        Rules(iter.into_iter().collect())
    }
}

#[test]
fn test_rule_from_tokens() {
    let tokens = ["temp", "hot", "or", "humidity", "high", "fan", "fast"];
    let rule = FuzzyRule::try_from(&tokens[..]).unwrap();

    assert_eq!(rule.left, Clause::new("temp", "hot"));
    assert_eq!(rule.op, Operator::Or);
    assert_eq!(rule.right, Clause::new("humidity", "high"));
    assert_eq!(rule.consequence, Clause::new("fan", "fast"));
    assert_eq!(rule.to_string(), "If temp hot or humidity high => fan fast");
}

#[test]
fn test_rule_from_bad_tokens() {
    let short = ["temp", "hot", "or", "humidity", "high", "fan"];
    let bad_op = ["temp", "hot", "xor", "humidity", "high", "fan", "fast"];

    assert_eq!(
        FuzzyRule::try_from(&short[..]),
        Err(FuzzyError::InvalidRuleFormat(6))
    );
    assert_eq!(
        FuzzyRule::try_from(&bad_op[..]),
        Err(FuzzyError::InvalidOperator("xor".into()))
    );
}
