use std::fmt;
use std::str::FromStr;

use crate::error::{FuzzyError, Result};
use crate::math::mean;

/// The supported membership curve shapes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Shape {
    Triangular,
    Trapezoidal,
}

impl Shape {
    /// Number of breakpoints the shape is defined by.
    pub fn arity(self) -> usize {
        match self {
            Self::Triangular => 3,
            Self::Trapezoidal => 4,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Triangular => f.write_str("triangular"),
            Self::Trapezoidal => f.write_str("trapezoidal"),
        }
    }
}

impl FromStr for Shape {
    type Err = FuzzyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "TRI" => Ok(Self::Triangular),
            "TRAP" => Ok(Self::Trapezoidal),
            _ => Err(FuzzyError::InvalidShape(s.to_owned())),
        }
    }
}

/// A membership curve over the real line, defined by its breakpoints.
#[derive(Clone, Debug, PartialEq)]
pub enum MembershipFunction {
    /// `[a, b, c]`: rises on `(a, b]`, falls on `(b, c]`
    Triangular([f64; 3]),
    /// `[a, b, c, d]`: rises on `(a, b]`, plateau on `(b, c]`, falls on `(c, d]`
    Trapezoidal([f64; 4]),
}

impl MembershipFunction {
    /// Builds a membership function, checking the breakpoints.
    ///
    /// Breakpoints must be finite and non-decreasing. Equal neighbours are
    /// allowed: every segment is closed on the right, so a zero width ramp is
    /// never evaluated and no division by zero can occur.
    pub fn new(shape: Shape, params: &[f64]) -> Result<Self> {
        if params.len() != shape.arity() {
            return Err(FuzzyError::InvalidParamCount {
                shape,
                expected: shape.arity(),
                found: params.len(),
            });
        }

        let ordered = params.windows(2).all(|w| w[0] <= w[1]);

        if !ordered || !params.iter().all(|p| p.is_finite()) {
            return Err(FuzzyError::DegenerateMembershipParams {
                params: params.to_vec(),
            });
        }

        Ok(match shape {
            Shape::Triangular => Self::Triangular([params[0], params[1], params[2]]),
            Shape::Trapezoidal => Self::Trapezoidal([params[0], params[1], params[2], params[3]]),
        })
    }

    pub fn triangular(a: f64, b: f64, c: f64) -> Result<Self> {
        Self::new(Shape::Triangular, &[a, b, c])
    }

    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> Result<Self> {
        Self::new(Shape::Trapezoidal, &[a, b, c, d])
    }

    pub fn shape(&self) -> Shape {
        match self {
            Self::Triangular(_) => Shape::Triangular,
            Self::Trapezoidal(_) => Shape::Trapezoidal,
        }
    }

    pub fn breakpoints(&self) -> &[f64] {
        match self {
            Self::Triangular(params) => params.as_slice(),
            Self::Trapezoidal(params) => params.as_slice(),
        }
    }

    /// Degree in `[0, 1]` to which `value` belongs to this curve.
    pub fn degree_of_membership(&self, value: f64) -> f64 {
        match *self {
            Self::Triangular([a, b, c]) => {
                if value <= a {
                    0.
                } else if value <= b {
                    (value - a) / (b - a)
                } else if value <= c {
                    (c - value) / (c - b)
                } else {
                    0.
                }
            },
            Self::Trapezoidal([a, b, c, d]) => {
                if value <= a {
                    0.
                } else if value <= b {
                    (value - a) / (b - a)
                } else if value <= c {
                    1.
                } else if value <= d {
                    (d - value) / (d - c)
                } else {
                    0.
                }
            },
        }
    }

    /// Representative abscissa used for defuzzification.
    ///
    /// This is the mean of the breakpoints and not the geometric centroid of
    /// the area under the curve. Outputs depend on it, so keep it that way.
    pub fn centroid(&self) -> f64 {
        mean(self.breakpoints())
    }
}

#[test]
fn test_triangular_breakpoints() {
    let mf = MembershipFunction::triangular(0., 10., 20.).unwrap();

    assert_eq!(mf.degree_of_membership(-0.001), 0.);
    assert_eq!(mf.degree_of_membership(0.), 0.);
    assert_eq!(mf.degree_of_membership(5.), 0.5);
    assert_eq!(mf.degree_of_membership(10.), 1.);
    assert_eq!(mf.degree_of_membership(15.), 0.5);
    assert_eq!(mf.degree_of_membership(20.), 0.);
    assert_eq!(mf.degree_of_membership(20.001), 0.);
}

#[test]
fn test_trapezoidal_plateau() {
    let mf = MembershipFunction::trapezoidal(0., 10., 20., 40.).unwrap();

    assert_eq!(mf.degree_of_membership(0.), 0.);
    assert_eq!(mf.degree_of_membership(5.), 0.5);
    assert_eq!(mf.degree_of_membership(10.), 1.);
    assert_eq!(mf.degree_of_membership(15.), 1.);
    assert_eq!(mf.degree_of_membership(20.), 1.);
    assert_eq!(mf.degree_of_membership(30.), 0.5);
    assert_eq!(mf.degree_of_membership(40.), 0.);
    assert_eq!(mf.degree_of_membership(41.), 0.);
}

#[test]
fn test_shoulders_do_not_divide_by_zero() {
    let left = MembershipFunction::trapezoidal(0., 0., 10., 20.).unwrap();
    let right = MembershipFunction::trapezoidal(50., 60., 70., 70.).unwrap();
    let spike = MembershipFunction::triangular(5., 5., 5.).unwrap();

    for x in [-1., 0., 0.5, 10., 15., 20., 55., 70., 71.] {
        assert!(left.degree_of_membership(x).is_finite());
        assert!(right.degree_of_membership(x).is_finite());
        assert!(spike.degree_of_membership(x).is_finite());
    }

    assert_eq!(left.degree_of_membership(0.), 0.);
    assert_eq!(left.degree_of_membership(0.1), 1.);
    assert_eq!(right.degree_of_membership(70.), 1.);
    assert_eq!(right.degree_of_membership(70.1), 0.);
    assert_eq!(spike.degree_of_membership(5.), 0.);
}

#[test]
fn test_rejects_bad_params() {
    assert_eq!(
        MembershipFunction::new(Shape::Triangular, &[0., 1.]),
        Err(FuzzyError::InvalidParamCount {
            shape: Shape::Triangular,
            expected: 3,
            found: 2,
        })
    );
    assert_eq!(
        MembershipFunction::triangular(10., 5., 20.),
        Err(FuzzyError::DegenerateMembershipParams {
            params: vec![10., 5., 20.],
        })
    );
    assert!(matches!(
        MembershipFunction::trapezoidal(0., f64::NAN, 2., 3.),
        Err(FuzzyError::DegenerateMembershipParams { .. })
    ));
    assert!(matches!(
        MembershipFunction::trapezoidal(0., 1., 2., f64::INFINITY),
        Err(FuzzyError::DegenerateMembershipParams { .. })
    ));
}

#[test]
fn test_centroid_is_breakpoint_mean() {
    assert_eq!(MembershipFunction::triangular(0., 5., 10.).unwrap().centroid(), 5.);
    assert_eq!(MembershipFunction::triangular(5., 10., 15.).unwrap().centroid(), 10.);
    // a true centroid of this right-skewed trapezoid would not be 20
    assert_eq!(
        MembershipFunction::trapezoidal(0., 10., 10., 60.).unwrap().centroid(),
        20.
    );
}

#[test]
fn test_shape_from_str() {
    assert_eq!("TRI".parse::<Shape>(), Ok(Shape::Triangular));
    assert_eq!("trap".parse::<Shape>(), Ok(Shape::Trapezoidal));
    assert_eq!(
        "GAUSS".parse::<Shape>(),
        Err(FuzzyError::InvalidShape("GAUSS".into()))
    );
}
