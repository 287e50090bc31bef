//! Cost algebras describe how path costs combine and compare.
//!
//! A search never does arithmetic on costs directly. It asks the algebra
//! to combine two costs, for the identity (the cost of the empty path)
//! and for the maximum (the cost of an unreachable state), and to scale
//! a heuristic estimate by the inflation factor.

use std::fmt::Debug;
use std::marker::PhantomData;

use num::traits::Saturating as SaturatingOps;
use num::{Float, NumCast, PrimInt};

use crate::errors::{Result, SearchError};

/// A commutative monoid over [CostAlgebra::Cost] with an absorbing maximum.
pub trait CostAlgebra: Debug {
    type Cost: Debug + Clone + PartialOrd;

    /// Associative, commutative accumulation of two costs.
    fn combine(&self, a: &Self::Cost, b: &Self::Cost) -> Self::Cost;

    /// Neutral element of [CostAlgebra::combine].
    fn identity(&self) -> Self::Cost;

    /// Absorbing element, used for unreachable states.
    fn max(&self) -> Self::Cost;

    /// Inflate a cost by `factor`, which is always at least 1.
    fn scale(&self, cost: &Self::Cost, factor: f64) -> Self::Cost;

    /// Check the identity and absorption laws a search relies on.
    fn check_laws(&self) -> Result<()> {
        let identity = self.identity();
        let max = self.max();

        if self.combine(&identity, &max) != max {
            return Err(SearchError::AlgebraLaw("identity + max == max"));
        }
        if self.combine(&max, &identity) != max {
            return Err(SearchError::AlgebraLaw("max + identity == max"));
        }
        if self.combine(&identity, &identity) != identity {
            return Err(SearchError::AlgebraLaw("identity + identity == identity"));
        }
        Ok(())
    }
}

/// Floating point addition: identity 0, maximum +inf.
#[derive(Debug, Clone, Copy)]
pub struct Additive<T>(PhantomData<T>);

impl<T> Additive<T> {
    pub fn new() -> Self {
        Additive(PhantomData)
    }
}

impl<T> Default for Additive<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CostAlgebra for Additive<T>
where
    T: Float + Debug,
{
    type Cost = T;

    fn combine(&self, a: &T, b: &T) -> T {
        *a + *b
    }

    fn identity(&self) -> T {
        T::zero()
    }

    fn max(&self) -> T {
        T::infinity()
    }

    fn scale(&self, cost: &T, factor: f64) -> T {
        match <T as NumCast>::from(factor) {
            Some(f) => *cost * f,
            None => self.max(),
        }
    }
}

/// Floating point multiplication: identity 1, maximum +inf.
///
/// Scaling raises the cost to the power of the factor, which is what
/// combining a cost with itself `factor` times means here.
#[derive(Debug, Clone, Copy)]
pub struct Multiplicative<T>(PhantomData<T>);

impl<T> Multiplicative<T> {
    pub fn new() -> Self {
        Multiplicative(PhantomData)
    }
}

impl<T> Default for Multiplicative<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CostAlgebra for Multiplicative<T>
where
    T: Float + Debug,
{
    type Cost = T;

    fn combine(&self, a: &T, b: &T) -> T {
        *a * *b
    }

    fn identity(&self) -> T {
        T::one()
    }

    fn max(&self) -> T {
        T::infinity()
    }

    fn scale(&self, cost: &T, factor: f64) -> T {
        match <T as NumCast>::from(factor) {
            Some(f) => cost.powf(f),
            None => self.max(),
        }
    }
}

/// Integer addition which saturates at `T::max_value()`.
///
/// The saturation point doubles as the unreachable cost, so integer
/// problems can run without rounding.
#[derive(Debug, Clone, Copy)]
pub struct Saturating<T>(PhantomData<T>);

impl<T> Saturating<T> {
    pub fn new() -> Self {
        Saturating(PhantomData)
    }
}

impl<T> Default for Saturating<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CostAlgebra for Saturating<T>
where
    T: PrimInt + Debug,
{
    type Cost = T;

    fn combine(&self, a: &T, b: &T) -> T {
        SaturatingOps::saturating_add(*a, *b)
    }

    fn identity(&self) -> T {
        T::zero()
    }

    fn max(&self) -> T {
        T::max_value()
    }

    fn scale(&self, cost: &T, factor: f64) -> T {
        if *cost == self.max() {
            return self.max();
        }
        cost.to_f64()
            .and_then(|c| <T as NumCast>::from((c * factor).floor()))
            .unwrap_or_else(|| self.max())
    }
}
