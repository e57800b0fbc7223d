//! Dense tensors of type *V*<sup>⊗*n*</sup>.
//!
//! A [`Tensor`] is an element of the *n*-fold tensor product of a single
//! *k*-dimensional real vector space *V* with itself, stored as a dense
//! *k*<sup>*n*</sup> array. Every axis has the same extent *k*, which is what
//! allows the symmetric group *S*<sub>*n*</sub> to act on it by permuting
//! tensor factors (see [`TensorOperator`][crate::operator::TensorOperator]).
//!
//! <blockquote>
//!   <p style="font-size:20px">
//!     <i>T</i><sub><i>i</i><sub>1</sub>,...,<i>i</i><sub><i>n</i></sub></sub>,
//!     &nbsp; <i>i</i><sub><i>p</i></sub> ∈ {0, ..., <i>k</i> - 1}
//!   </p>
//! </blockquote>
//!
//! Because the number of factors is a runtime quantity, entries are visited
//! through [`Tensor::entries`] rather than nested loops.
//!
//! ```
//! use schur_transform::tensor::Tensor;
//!
//! let mut a: Tensor = Tensor::zeros(3, 2).unwrap();
//! for (idx, x) in a.entries_mut() {
//!     *x = idx.iter().sum::<usize>() as f64;
//! }
//! let b = a.scale(2.0);
//! let c = a.add(&b).unwrap();
//! assert_eq!(c.get(&[1, 1, 0]), Some(&6.0));
//! ```

use std::fmt;
use ndarray::{ self as nd, Dimension };
use thiserror::Error;
use crate::{ Scalar, multi_index::MultiIndex };

#[derive(Debug, Error)]
pub enum TensorError {
    /// Returned when attempting to create a tensor or operator with zero
    /// tensor factors.
    #[error("error in tensor creation: number of factors must be nonzero")]
    ZeroFactors,

    /// Returned when attempting to create a tensor or operator over a
    /// zero-dimensional base space.
    #[error("error in tensor creation: dimension must be nonzero")]
    ZeroDim,

    /// Returned when attempting to create a tensor or operator from an array
    /// whose axes do not all have the same extent (or that has the wrong
    /// number of axes).
    #[error("error in tensor creation: array of shape {0:?} is not of the form [k; n]")]
    NonUniformShape(Vec<usize>),

    /// Returned when two tensors of different type (*n*, *k*) are added.
    #[error("error in tensor add: type ({0}, {1}) does not match type ({2}, {3})")]
    IncompatibleTypeAdd(usize, usize, usize, usize),

    /// Returned when two operators of different type (*n*, *k*) are added.
    #[error("error in operator add: type ({0}, {1}) does not match type ({2}, {3})")]
    IncompatibleTypeOperatorAdd(usize, usize, usize, usize),

    /// Returned when an operator is applied to a tensor of a different type
    /// (*n*, *k*).
    #[error("error in operator application: tensor of type ({0}, {1}) is not compatible with operator of type ({2}, {3})")]
    IncompatibleTypeApply(usize, usize, usize, usize),

    /// Returned when a permutation acting on tensor factors has the wrong
    /// length or is not a bijection on its positions.
    #[error("error in operator creation: permutation {0:?} does not act on {1} factors")]
    BadPermutation(Vec<usize>, usize),

    /// Returned when flat reshaping of the underlying array fails.
    #[error("layout error: {0}")]
    Layout(#[from] nd::ShapeError),
}
use TensorError::*;
pub type TensorResult<T> = Result<T, TensorError>;

pub(crate) fn check_type(factors: usize, dim: usize) -> TensorResult<()> {
    (factors > 0).then_some(()).ok_or(ZeroFactors)?;
    (dim > 0).then_some(()).ok_or(ZeroDim)?;
    Ok(())
}

// recover (n, k) from a shape of the form [k; n * per_factor]
pub(crate) fn uniform_type(shape: &[usize], per_factor: usize)
    -> TensorResult<(usize, usize)>
{
    let non_uniform = || NonUniformShape(shape.to_vec());
    let dim = *shape.first().ok_or_else(non_uniform)?;
    (shape.len() % per_factor == 0 && shape.iter().all(|s| *s == dim))
        .then_some(())
        .ok_or_else(non_uniform)?;
    let factors = shape.len() / per_factor;
    check_type(factors, dim)?;
    Ok((factors, dim))
}

/// A dense element of *V*<sup>⊗*n*</sup> with dim *V* = *k*.
///
/// Here *n* is the number of *factors* and *k* is the *dimension*; together
/// they form the *type* (*n*, *k*) of the tensor. Entries are stored in a
/// standard-layout [`nd::ArrayD`] of shape `[k; n]`.
#[derive(Clone, PartialEq)]
pub struct Tensor<A = f64> {
    factors: usize,
    dim: usize,
    data: nd::ArrayD<A>,
}

impl<A> fmt::Debug for Tensor<A>
where A: fmt::Debug
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tensor(")?;
        writeln!(f)?;
        fmt::Debug::fmt(&self.data, f)?;
        write!(f, ",\nfactors={}, dim={})", self.factors, self.dim)?;
        Ok(())
    }
}

impl<A> fmt::Display for Tensor<A>
where A: fmt::Display
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.data, f)?;
        write!(f, " {{ n: {}, k: {} }}", self.factors, self.dim)
    }
}

impl<A> Tensor<A>
where A: Scalar
{
    /// Create a new zero tensor of type (`factors`, `dim`).
    pub fn zeros(factors: usize, dim: usize) -> TensorResult<Self> {
        check_type(factors, dim)?;
        let data: nd::ArrayD<A> = nd::ArrayD::zeros(vec![dim; factors]);
        Ok(Self { factors, dim, data })
    }

    /// Create a new tensor of type (`factors`, `dim`) using a function over
    /// multi-indices.
    pub fn new<F>(factors: usize, dim: usize, mut elems: F) -> TensorResult<Self>
    where F: FnMut(&[usize]) -> A
    {
        check_type(factors, dim)?;
        let data: nd::ArrayD<A>
            = nd::ArrayD::from_shape_fn(
                vec![dim; factors],
                |idxs| elems(idxs.slice()),
            );
        Ok(Self { factors, dim, data })
    }

    /// Wrap an existing array, which must have shape `[k; n]` for some
    /// nonzero *n* and *k*.
    pub fn from_array(data: nd::ArrayD<A>) -> TensorResult<Self> {
        let (factors, dim) = uniform_type(data.shape(), 1)?;
        let data
            = if data.is_standard_layout() {
                data
            } else {
                data.as_standard_layout().into_owned()
            };
        Ok(Self { factors, dim, data })
    }

    /// Return the number of tensor factors *n*.
    pub fn factors(&self) -> usize { self.factors }

    /// Return the dimension *k* of the base space.
    pub fn dim(&self) -> usize { self.dim }

    /// Return the type (*n*, *k*).
    pub fn tensor_type(&self) -> (usize, usize) { (self.factors, self.dim) }

    /// Return the total number of entries, *k*<sup>*n*</sup>.
    pub fn len(&self) -> usize { self.data.len() }

    /// Return `true` if `self` has no entries. Never true for a constructed
    /// tensor.
    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    /// Return the shape `[k; n]` of the underlying array.
    pub fn shape(&self) -> &[usize] { self.data.shape() }

    /// Get a reference to the entry at a multi-index, if it is in bounds.
    pub fn get(&self, index: &[usize]) -> Option<&A> { self.data.get(index) }

    /// Get a mutable reference to the entry at a multi-index, if it is in
    /// bounds.
    pub fn get_mut(&mut self, index: &[usize]) -> Option<&mut A> {
        self.data.get_mut(index)
    }

    /// Get a view of the underlying array.
    pub fn as_array(&self) -> nd::ArrayViewD<'_, A> { self.data.view() }

    /// Unwrap `self` into the underlying array.
    pub fn into_array(self) -> nd::ArrayD<A> { self.data }

    /// Iterate over all entries paired with their multi-indices, in
    /// lexicographic order of the multi-index.
    pub fn entries(&self) -> impl Iterator<Item = (Vec<usize>, &A)> + '_ {
        MultiIndex::new(self.factors, self.dim).zip(self.data.iter())
    }

    /// Like [`entries`][Self::entries], but yielding mutable references.
    pub fn entries_mut(&mut self)
        -> impl Iterator<Item = (Vec<usize>, &mut A)> + '_
    {
        MultiIndex::new(self.factors, self.dim).zip(self.data.iter_mut())
    }

    fn check_add(&self, other: &Self) -> TensorResult<()> {
        (self.tensor_type() == other.tensor_type())
            .then_some(())
            .ok_or(IncompatibleTypeAdd(
                self.factors, self.dim, other.factors, other.dim))
    }

    /// Add `other` to `self` element-wise, in place.
    ///
    /// Fails if the two tensors are not of the same type.
    pub fn add_inplace(&mut self, other: &Self) -> TensorResult<()> {
        self.check_add(other)?;
        self.data.zip_mut_with(&other.data, |a, b| { *a = *a + *b; });
        Ok(())
    }

    /// Return the element-wise sum of `self` and `other` as a new tensor.
    ///
    /// Fails if the two tensors are not of the same type.
    pub fn add(&self, other: &Self) -> TensorResult<Self> {
        let mut sum = self.clone();
        sum.add_inplace(other)?;
        Ok(sum)
    }

    /// Multiply every entry by `amount`, in place.
    pub fn scale_inplace(&mut self, amount: A) {
        self.data.mapv_inplace(|x| x * amount);
    }

    /// Return a new tensor with every entry multiplied by `amount`.
    pub fn scale(&self, amount: A) -> Self {
        Self {
            factors: self.factors,
            dim: self.dim,
            data: self.data.mapv(|x| x * amount),
        }
    }

    /// Return the Euclidean (Frobenius) norm of the entries.
    pub fn norm(&self) -> A {
        self.data.iter()
            .fold(A::zero(), |acc, x| acc + *x * *x)
            .sqrt()
    }

    /// Return the Euclidean norm of the difference `self - other`.
    ///
    /// Fails if the two tensors are not of the same type.
    pub fn distance(&self, other: &Self) -> TensorResult<A> {
        self.check_add(other)?;
        let d = self.data.iter().zip(other.data.iter())
            .fold(A::zero(), |acc, (a, b)| acc + (*a - *b) * (*a - *b))
            .sqrt();
        Ok(d)
    }

    /// Return `true` if every entry is exactly zero.
    pub fn is_zero(&self) -> bool { self.data.iter().all(|x| x.is_zero()) }
}
