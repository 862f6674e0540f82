//! Interval and scalar result containers returned by distribution queries.
//!
//! Every range-to-range operation is variant-homogeneous: combining, say, a
//! `Bounded` with a `Discrete` is a domain error. Empty results of
//! `intersection`/`difference` come back as `None`; results a single value of
//! the variant cannot hold (two disjoint pieces) are domain errors.
use crate::error::{Result, StatsError};
use serde::Serialize;
use std::fmt;

/// Half-open interval `[min, max)` with `min < max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounded {
    min: f64,
    max: f64,
}

impl Bounded {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if min.is_nan() || max.is_nan() || min >= max {
            return Err(StatsError::domain(format!(
                "bounded range requires min < max, got [{min}, {max})"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    fn contains(&self, x: f64) -> bool {
        self.min <= x && x < self.max
    }

    fn contains_range(&self, other: &Bounded) -> bool {
        other.min >= self.min && other.max <= self.max
    }

    fn overlaps(&self, other: &Bounded) -> bool {
        self.min < other.max && other.min < self.max
    }

    fn union(&self, other: &Bounded) -> Result<Bounded> {
        let touching = self.max == other.min || other.max == self.min;
        if !self.overlaps(other) && !touching {
            return Err(StatsError::domain(format!(
                "union of disjoint intervals {self} and {other} is not an interval"
            )));
        }
        Ok(Bounded {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        })
    }

    fn intersection(&self, other: &Bounded) -> Option<Bounded> {
        Bounded::new(self.min.max(other.min), self.max.min(other.max)).ok()
    }

    fn difference(&self, other: &Bounded) -> Result<Option<Bounded>> {
        if !self.overlaps(other) {
            return Ok(Some(*self));
        }
        if other.contains_range(self) {
            return Ok(None);
        }
        if other.min > self.min && other.max < self.max {
            return Err(StatsError::domain(format!(
                "{self} minus {other} splits into two intervals"
            )));
        }
        if other.min <= self.min {
            Ok(Some(Bounded {
                min: other.max,
                max: self.max,
            }))
        } else {
            Ok(Some(Bounded {
                min: self.min,
                max: other.min,
            }))
        }
    }
}

impl fmt::Display for Bounded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.min, self.max)
    }
}

/// Finite set of reals, kept sorted and free of duplicates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscreteSet {
    values: Vec<f64>,
}

impl DiscreteSet {
    pub fn new<I: IntoIterator<Item = f64>>(values: I) -> Result<Self> {
        let mut values = values
            .into_iter()
            // folds -0.0 into 0.0 so the total order below agrees with ==
            .map(|v| v + 0.0)
            .collect::<Vec<f64>>();
        if values.iter().any(|v| v.is_nan()) {
            return Err(StatsError::domain("discrete range cannot contain NaN"));
        }
        values.sort_by(f64::total_cmp);
        values.dedup();
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn contains(&self, x: f64) -> bool {
        self.values.binary_search_by(|v| v.total_cmp(&(x + 0.0))).is_ok()
    }

    fn filtered(&self, keep: impl Fn(f64) -> bool) -> Option<DiscreteSet> {
        let values: Vec<f64> = self.values.iter().copied().filter(|&v| keep(v)).collect();
        if values.is_empty() {
            None
        } else {
            Some(DiscreteSet { values })
        }
    }
}

/// Closed span `[first, last]` of an ordered sequence, matched to within
/// `accuracy`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Continuous {
    values: Vec<f64>,
    accuracy: f64,
}

impl Continuous {
    pub fn new(mut values: Vec<f64>, accuracy: f64) -> Result<Self> {
        if values.is_empty() {
            return Err(StatsError::domain("continuous range needs at least one value"));
        }
        if values.iter().any(|v| v.is_nan()) {
            return Err(StatsError::domain("continuous range cannot contain NaN"));
        }
        if accuracy.is_nan() || accuracy < 0.0 {
            return Err(StatsError::domain(format!(
                "continuous range accuracy must be >= 0, got {accuracy}"
            )));
        }
        values.sort_by(f64::total_cmp);
        values.dedup();
        Ok(Self { values, accuracy })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn lower(&self) -> f64 {
        self.values[0]
    }

    pub fn upper(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    fn contains(&self, x: f64) -> bool {
        self.lower() - self.accuracy <= x && x <= self.upper() + self.accuracy
    }

    fn contains_range(&self, other: &Continuous) -> bool {
        other.lower() >= self.lower() - self.accuracy && other.upper() <= self.upper() + self.accuracy
    }

    fn overlaps(&self, other: &Continuous) -> bool {
        let tol = self.accuracy.max(other.accuracy);
        self.lower() <= other.upper() + tol && other.lower() <= self.upper() + tol
    }

    fn union(&self, other: &Continuous) -> Result<Continuous> {
        if !self.overlaps(other) {
            return Err(StatsError::domain(
                "union of disjoint continuous ranges is not continuous",
            ));
        }
        let values = self.values.iter().chain(other.values.iter()).copied().collect();
        Continuous::new(values, self.accuracy.max(other.accuracy))
    }

    fn intersection(&self, other: &Continuous) -> Result<Option<Continuous>> {
        if !self.overlaps(other) {
            return Ok(None);
        }
        let lo = self.lower().max(other.lower());
        let hi = self.upper().min(other.upper()).max(lo);
        let values = std::iter::once(lo)
            .chain(
                self.values
                    .iter()
                    .chain(other.values.iter())
                    .copied()
                    .filter(|&v| v > lo && v < hi),
            )
            .chain(std::iter::once(hi))
            .collect();
        Continuous::new(values, self.accuracy.max(other.accuracy)).map(Some)
    }

    fn difference(&self, other: &Continuous) -> Result<Option<Continuous>> {
        if !self.overlaps(other) {
            return Ok(Some(self.clone()));
        }
        if other.contains_range(self) {
            return Ok(None);
        }
        if other.lower() > self.lower() && other.upper() < self.upper() {
            return Err(StatsError::domain(
                "continuous difference splits into two ranges",
            ));
        }
        let values: Vec<f64> = if other.lower() <= self.lower() {
            std::iter::once(other.upper())
                .chain(self.values.iter().copied().filter(|&v| v > other.upper()))
                .collect()
        } else {
            self.values
                .iter()
                .copied()
                .filter(|&v| v < other.lower())
                .chain(std::iter::once(other.lower()))
                .collect()
        };
        Continuous::new(values, self.accuracy).map(Some)
    }
}

/// Result of a distribution query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Range {
    Bounded(Bounded),
    Discrete(DiscreteSet),
    Continuous(Continuous),
    /// Degenerate range `[value, +inf)`, used to carry a scalar.
    Single(f64),
}

impl Range {
    pub fn bounded(min: f64, max: f64) -> Result<Range> {
        Bounded::new(min, max).map(Range::Bounded)
    }

    pub fn discrete<I: IntoIterator<Item = f64>>(values: I) -> Result<Range> {
        DiscreteSet::new(values).map(Range::Discrete)
    }

    pub fn continuous(values: Vec<f64>, accuracy: f64) -> Result<Range> {
        Continuous::new(values, accuracy).map(Range::Continuous)
    }

    pub fn single(value: f64) -> Range {
        Range::Single(value)
    }

    /// The carried scalar of a `Single` range.
    pub fn value(&self) -> Option<f64> {
        match self {
            Range::Single(v) => Some(*v),
            _ => None,
        }
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            Range::Bounded(_) => "bounded",
            Range::Discrete(_) => "discrete",
            Range::Continuous(_) => "continuous",
            Range::Single(_) => "single",
        }
    }

    fn mismatch(&self, other: &Range) -> StatsError {
        StatsError::domain(format!(
            "cannot combine a {} range with a {} range",
            self.variant_name(),
            other.variant_name()
        ))
    }

    pub fn contains(&self, x: f64) -> bool {
        match self {
            Range::Bounded(b) => b.contains(x),
            Range::Discrete(d) => d.contains(x),
            Range::Continuous(c) => c.contains(x),
            Range::Single(v) => x >= *v,
        }
    }

    pub fn contains_range(&self, other: &Range) -> Result<bool> {
        match (self, other) {
            (Range::Bounded(a), Range::Bounded(b)) => Ok(a.contains_range(b)),
            (Range::Discrete(a), Range::Discrete(b)) => {
                Ok(b.values.iter().all(|&v| a.contains(v)))
            }
            (Range::Continuous(a), Range::Continuous(b)) => Ok(a.contains_range(b)),
            (Range::Single(a), Range::Single(b)) => Ok(b >= a),
            _ => Err(self.mismatch(other)),
        }
    }

    pub fn overlaps(&self, other: &Range) -> Result<bool> {
        match (self, other) {
            (Range::Bounded(a), Range::Bounded(b)) => Ok(a.overlaps(b)),
            (Range::Discrete(a), Range::Discrete(b)) => {
                Ok(b.values.iter().any(|&v| a.contains(v)))
            }
            (Range::Continuous(a), Range::Continuous(b)) => Ok(a.overlaps(b)),
            // two upward-unbounded rays always meet
            (Range::Single(_), Range::Single(_)) => Ok(true),
            _ => Err(self.mismatch(other)),
        }
    }

    pub fn is_subset_of(&self, other: &Range) -> Result<bool> {
        other.contains_range(self)
    }

    pub fn is_superset_of(&self, other: &Range) -> Result<bool> {
        self.contains_range(other)
    }

    pub fn union(&self, other: &Range) -> Result<Range> {
        match (self, other) {
            (Range::Bounded(a), Range::Bounded(b)) => a.union(b).map(Range::Bounded),
            (Range::Discrete(a), Range::Discrete(b)) => {
                Range::discrete(a.values.iter().chain(b.values.iter()).copied())
            }
            (Range::Continuous(a), Range::Continuous(b)) => a.union(b).map(Range::Continuous),
            (Range::Single(a), Range::Single(b)) => Ok(Range::Single(a.min(*b))),
            _ => Err(self.mismatch(other)),
        }
    }

    pub fn intersection(&self, other: &Range) -> Result<Option<Range>> {
        match (self, other) {
            (Range::Bounded(a), Range::Bounded(b)) => Ok(a.intersection(b).map(Range::Bounded)),
            (Range::Discrete(a), Range::Discrete(b)) => {
                Ok(a.filtered(|v| b.contains(v)).map(Range::Discrete))
            }
            (Range::Continuous(a), Range::Continuous(b)) => {
                Ok(a.intersection(b)?.map(Range::Continuous))
            }
            (Range::Single(a), Range::Single(b)) => Ok(Some(Range::Single(a.max(*b)))),
            _ => Err(self.mismatch(other)),
        }
    }

    /// Elements of `self` not in `other`.
    ///
    /// For two `Single` rays `[a, inf) \ [b, inf)` the leftover `[a, b)` is
    /// returned as a `Bounded` range.
    pub fn difference(&self, other: &Range) -> Result<Option<Range>> {
        match (self, other) {
            (Range::Bounded(a), Range::Bounded(b)) => Ok(a.difference(b)?.map(Range::Bounded)),
            (Range::Discrete(a), Range::Discrete(b)) => {
                Ok(a.filtered(|v| !b.contains(v)).map(Range::Discrete))
            }
            (Range::Continuous(a), Range::Continuous(b)) => {
                Ok(a.difference(b)?.map(Range::Continuous))
            }
            (Range::Single(a), Range::Single(b)) => {
                if b <= a {
                    Ok(None)
                } else {
                    Range::bounded(*a, *b).map(Some)
                }
            }
            _ => Err(self.mismatch(other)),
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Range::Bounded(b) => write!(f, "{b}"),
            Range::Discrete(d) => {
                let items: Vec<String> = d.values.iter().map(|v| v.to_string()).collect();
                write!(f, "{{{}}}", items.join(", "))
            }
            Range::Continuous(c) => {
                write!(f, "[{}, {}] ±{}", c.lower(), c.upper(), c.accuracy)
            }
            Range::Single(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b(min: f64, max: f64) -> Range {
        Range::bounded(min, max).unwrap()
    }

    fn d(values: &[f64]) -> Range {
        Range::discrete(values.iter().copied()).unwrap()
    }

    #[test]
    fn bounded_construction() {
        assert!(Range::bounded(0., 1.).is_ok());
        assert!(Range::bounded(1., 1.).unwrap_err().is_domain());
        assert!(Range::bounded(2., 1.).is_err());
        assert!(Range::bounded(f64::NAN, 1.).is_err());
    }

    #[test]
    fn bounded_is_half_open() {
        let r = b(0., 1.);
        assert!(r.contains(0.));
        assert!(r.contains(0.999));
        assert!(!r.contains(1.));
        assert!(!r.contains(-0.1));
    }

    #[test]
    fn bounded_algebra() {
        let r = b(0., 2.);
        let s = b(1., 3.);
        assert!(r.overlaps(&s).unwrap());
        assert_eq!(r.union(&s).unwrap(), b(0., 3.));
        assert_eq!(r.intersection(&s).unwrap(), Some(b(1., 2.)));
        assert_eq!(r.difference(&s).unwrap(), Some(b(0., 1.)));
        assert_eq!(s.difference(&r).unwrap(), Some(b(2., 3.)));
        // touching intervals merge
        assert_eq!(b(0., 1.).union(&b(1., 2.)).unwrap(), b(0., 2.));
        // disjoint ones don't
        assert!(b(0., 1.).union(&b(2., 3.)).is_err());
        assert_eq!(b(0., 1.).intersection(&b(1., 2.)).unwrap(), None);
        assert!(b(0., 10.).difference(&b(2., 3.)).is_err());
        assert_eq!(b(2., 3.).difference(&b(0., 10.)).unwrap(), None);
        assert!(b(2., 3.).is_subset_of(&b(0., 10.)).unwrap());
        assert!(b(0., 10.).is_superset_of(&b(2., 3.)).unwrap());
    }

    #[test]
    fn discrete_set_semantics() {
        let r = d(&[3., 1., 2., 1.]);
        match &r {
            Range::Discrete(set) => assert_eq!(set.values(), &[1., 2., 3.]),
            other => panic!("unexpected {other:?}"),
        }
        assert!(r.contains(2.));
        assert!(!r.contains(2.5));
        assert!(d(&[0.]).contains(-0.));
        let s = d(&[2., 4.]);
        assert_eq!(r.union(&s).unwrap(), d(&[1., 2., 3., 4.]));
        assert_eq!(r.intersection(&s).unwrap(), Some(d(&[2.])));
        assert_eq!(r.difference(&s).unwrap(), Some(d(&[1., 3.])));
        assert_eq!(d(&[1.]).intersection(&d(&[2.])).unwrap(), None);
        assert!(d(&[1., 3.]).is_subset_of(&r).unwrap());
        assert!(!r.is_subset_of(&s).unwrap());
        assert!(Range::discrete(vec![f64::NAN]).is_err());
    }

    #[test]
    fn continuous_span() {
        let r = Range::continuous(vec![0., 0.5, 1.], 1e-9).unwrap();
        assert!(r.contains(0.));
        assert!(r.contains(1.));
        assert!(r.contains(1. + 1e-10));
        assert!(!r.contains(1.1));
        let s = Range::continuous(vec![0.8, 2.], 0.).unwrap();
        let u = r.union(&s).unwrap();
        assert!(u.contains(1.5));
        let i = r.intersection(&s).unwrap().unwrap();
        match &i {
            Range::Continuous(c) => {
                assert_eq!(c.lower(), 0.8);
                assert_eq!(c.upper(), 1.);
            }
            other => panic!("unexpected {other:?}"),
        }
        let diff = r.difference(&s).unwrap().unwrap();
        assert!(diff.contains(0.3));
        assert!(!diff.contains(0.9));
        assert!(Range::continuous(vec![], 0.).is_err());
        assert!(Range::continuous(vec![1.], -1.).is_err());
    }

    #[test]
    fn single_is_upward_ray() {
        let r = Range::single(2.);
        assert_eq!(r.value(), Some(2.));
        assert!(r.contains(5.));
        assert!(!r.contains(1.));
        assert_eq!(r.union(&Range::single(1.)).unwrap(), Range::single(1.));
        assert_eq!(
            r.intersection(&Range::single(1.)).unwrap(),
            Some(Range::single(2.))
        );
        assert_eq!(
            Range::single(1.).difference(&r).unwrap(),
            Some(b(1., 2.))
        );
        assert_eq!(r.difference(&Range::single(1.)).unwrap(), None);
        assert_eq!(b(0., 1.).value(), None);
    }

    #[test]
    fn mixed_variants_fail() {
        let single = Range::single(0.);
        let bounded = b(0., 1.);
        assert!(single.union(&bounded).unwrap_err().is_domain());
        assert!(bounded.contains_range(&single).is_err());
        assert!(bounded.overlaps(&d(&[0.])).is_err());
        assert!(d(&[0.]).intersection(&single).is_err());
        assert!(bounded.difference(&single).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(b(0., 1.).to_string(), "[0, 1)");
        assert_eq!(d(&[1., 2.]).to_string(), "{1, 2}");
        assert_eq!(Range::single(0.5).to_string(), "0.5");
    }
}
