//! Dense linear endomorphisms of *V*<sup>⊗*n*</sup>.
//!
//! A [`TensorOperator`] of type (*n*, *k*) is stored as a dense array with 2*n*
//! axes of extent *k*. The first *n* axes index the output and the last *n*
//! index the input, so that application to a [`Tensor`] is the contraction
//!
//! <blockquote>
//!   <p style="font-size:20px">
//!     (<i>AT</i>)<sub><i>I</i></sub>
//!       = Σ<sub><i>J</i></sub>
//!         <i>A</i><sub><i>I</i>,<i>J</i></sub> <i>T</i><sub><i>J</i></sub>
//!   </p>
//! </blockquote>
//!
//! over all *k*<sup>*n*</sup> input multi-indices *J* for each of the
//! *k*<sup>*n*</sup> output multi-indices *I*. Since the array is kept in
//! standard layout, this is carried out as a single
//! *k*<sup>*n*</sup> × *k*<sup>*n*</sup> matrix-vector product.
//!
//! Besides the zero operator, two canonical operators are provided: the
//! identity, and the action of a permutation *π* ∈ *S*<sub>*n*</sub> on tensor
//! factors,
//!
//! <blockquote>
//!   <p style="font-size:20px">
//!     <i>A</i><sub><i>I</i>,<i>J</i></sub> = 1
//!     &nbsp; iff &nbsp;
//!     <i>I</i><sub><i>p</i></sub> = <i>J</i><sub><i>π</i>(<i>p</i>)</sub>
//!     for all <i>p</i>,
//!   </p>
//! </blockquote>
//!
//! which moves the entry at *J* to the position *I* = *J* ∘ *π*, i.e. realizes
//! *π*<sup>-1</sup> on the factors.
//!
//! ```
//! use schur_transform::{ operator::TensorOperator, tensor::Tensor };
//!
//! let t: Tensor = Tensor::new(3, 2, |idx| (4 * idx[0] + 2 * idx[1] + idx[2]) as f64)
//!     .unwrap();
//! let op = TensorOperator::permutation(&[2, 3, 1], 2).unwrap();
//! let s = op.apply(&t).unwrap();
//! // (i, j, l) <- (l, i, j)
//! assert_eq!(s.get(&[1, 0, 0]), t.get(&[0, 1, 0]));
//! ```

use std::fmt;
use ndarray::{ self as nd, Dimension };
use crate::{
    Scalar,
    multi_index::{ self, MultiIndex },
    tensor::{ self, Tensor, TensorError, TensorResult },
};
use TensorError::*;

/// A dense element of End(*V*<sup>⊗*n*</sup>) with dim *V* = *k*.
///
/// Stored as a standard-layout [`nd::ArrayD`] of shape `[k; 2 * n]`; see the
/// [module-level documentation][self] for the index convention.
#[derive(Clone, PartialEq)]
pub struct TensorOperator<A = f64> {
    factors: usize,
    dim: usize,
    data: nd::ArrayD<A>,
}

impl<A> fmt::Debug for TensorOperator<A>
where A: fmt::Debug
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TensorOperator(")?;
        writeln!(f)?;
        fmt::Debug::fmt(&self.data, f)?;
        write!(f, ",\nfactors={}, dim={})", self.factors, self.dim)?;
        Ok(())
    }
}

// check that `perm` lists each of 1..=n exactly once
fn check_permutation(perm: &[usize], factors: usize) -> TensorResult<()> {
    let mut seen = vec![false; factors];
    let valid
        = perm.len() == factors
        && perm.iter().all(|v| {
            (1..=factors).contains(v)
                && !std::mem::replace(&mut seen[v - 1], true)
        });
    valid.then_some(()).ok_or_else(|| BadPermutation(perm.to_vec(), factors))
}

impl<A> TensorOperator<A>
where A: Scalar
{
    /// Create a new zero operator of type (`factors`, `dim`).
    pub fn zeros(factors: usize, dim: usize) -> TensorResult<Self> {
        tensor::check_type(factors, dim)?;
        let data: nd::ArrayD<A> = nd::ArrayD::zeros(vec![dim; 2 * factors]);
        Ok(Self { factors, dim, data })
    }

    /// Create the identity operator of type (`factors`, `dim`).
    ///
    /// Entries are 1 where the output multi-index equals the input
    /// multi-index and 0 elsewhere.
    pub fn identity(factors: usize, dim: usize) -> TensorResult<Self> {
        tensor::check_type(factors, dim)?;
        let data: nd::ArrayD<A>
            = nd::ArrayD::from_shape_fn(
                vec![dim; 2 * factors],
                |idxs| {
                    let idxs = idxs.slice();
                    if idxs[..factors] == idxs[factors..] {
                        A::one()
                    } else {
                        A::zero()
                    }
                },
            );
        Ok(Self { factors, dim, data })
    }

    /// Create the operator permuting tensor factors according to `perm`.
    ///
    /// `perm` lists the values *π*(1), ..., *π*(*n*) of a permutation of
    /// {1, ..., *n*}; the number of factors is `perm.len()`. The entry at
    /// (*I*, *J*) is 1 exactly when *I*<sub>*p*</sub> =
    /// *J*<sub>*π*(*p*) - 1</sub> for every (zero-based) position *p*.
    pub fn permutation(perm: &[usize], dim: usize) -> TensorResult<Self> {
        let mut op = Self::zeros(perm.len(), dim)?;
        op.add_permutation_inplace(perm, A::one())?;
        Ok(op)
    }

    /// Wrap an existing array, which must have shape `[k; 2 * n]` for some
    /// nonzero *n* and *k*.
    pub fn from_array(data: nd::ArrayD<A>) -> TensorResult<Self> {
        let (factors, dim) = tensor::uniform_type(data.shape(), 2)?;
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

    /// Return the shape `[k; 2 * n]` of the underlying array.
    pub fn shape(&self) -> &[usize] { self.data.shape() }

    /// Get a reference to the entry at an (output, input) multi-index of
    /// length 2*n*, if it is in bounds.
    pub fn get(&self, index: &[usize]) -> Option<&A> { self.data.get(index) }

    /// Get a view of the underlying array.
    pub fn as_array(&self) -> nd::ArrayViewD<'_, A> { self.data.view() }

    /// Iterate over all entries paired with their (output, input)
    /// multi-indices, in lexicographic order.
    pub fn entries(&self) -> impl Iterator<Item = (Vec<usize>, &A)> + '_ {
        MultiIndex::new(2 * self.factors, self.dim).zip(self.data.iter())
    }

    // side length of the flattened matrix form, k^n
    fn side(&self) -> usize { self.dim.pow(self.factors as u32) }

    /// Add `coeff` times the permutation operator for `perm` to `self`, in
    /// place.
    ///
    /// Equivalent to `self.add_inplace(&TensorOperator::permutation(perm,
    /// k)?.scale(coeff))` but touches only the *k*<sup>*n*</sup> nonzero
    /// entries of the permutation operator.
    pub fn add_permutation_inplace(&mut self, perm: &[usize], coeff: A)
        -> TensorResult<()>
    {
        check_permutation(perm, self.factors)?;
        let (n, k) = (self.factors, self.dim);
        let side = self.side();
        let mut mat = self.data.view_mut().into_shape((side, side))?;
        let mut out: Vec<usize> = vec![0; n];
        for input in MultiIndex::new(n, k) {
            out.iter_mut().zip(perm)
                .for_each(|(o, p)| { *o = input[p - 1]; });
            let i = multi_index::flatten(&out, k);
            let j = multi_index::flatten(&input, k);
            mat[[i, j]] = mat[[i, j]] + coeff;
        }
        Ok(())
    }

    /// Apply `self` to a tensor, returning the result as a new tensor.
    ///
    /// Fails if `tensor` is not of the same type as `self`.
    pub fn apply(&self, tensor: &Tensor<A>) -> TensorResult<Tensor<A>> {
        (tensor.tensor_type() == self.tensor_type())
            .then_some(())
            .ok_or(IncompatibleTypeApply(
                tensor.factors(), tensor.dim(), self.factors, self.dim))?;
        let side = self.side();
        let mat = self.data.view().into_shape((side, side))?;
        let input = tensor.as_array();
        let vec = input.into_shape(side)?;
        let output: nd::ArrayD<A>
            = mat.dot(&vec).into_shape(vec![self.dim; self.factors])?;
        Tensor::from_array(output)
    }

    fn check_add(&self, other: &Self) -> TensorResult<()> {
        (self.tensor_type() == other.tensor_type())
            .then_some(())
            .ok_or(IncompatibleTypeOperatorAdd(
                self.factors, self.dim, other.factors, other.dim))
    }

    /// Add `other` to `self` element-wise, in place.
    ///
    /// Fails if the two operators are not of the same type.
    pub fn add_inplace(&mut self, other: &Self) -> TensorResult<()> {
        self.check_add(other)?;
        self.data.zip_mut_with(&other.data, |a, b| { *a = *a + *b; });
        Ok(())
    }

    /// Return the element-wise sum of `self` and `other` as a new operator.
    ///
    /// Fails if the two operators are not of the same type.
    pub fn add(&self, other: &Self) -> TensorResult<Self> {
        let mut sum = self.clone();
        sum.add_inplace(other)?;
        Ok(sum)
    }

    /// Add `amount` times `other` to `self`, in place.
    ///
    /// Fails if the two operators are not of the same type.
    pub fn scaled_add_inplace(&mut self, amount: A, other: &Self)
        -> TensorResult<()>
    {
        self.check_add(other)?;
        self.data.scaled_add(amount, &other.data);
        Ok(())
    }

    /// Multiply every entry by `amount`, in place.
    pub fn scale_inplace(&mut self, amount: A) {
        self.data.mapv_inplace(|x| x * amount);
    }

    /// Return a new operator with every entry multiplied by `amount`.
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
    /// Fails if the two operators are not of the same type.
    pub fn distance(&self, other: &Self) -> TensorResult<A> {
        self.check_add(other)?;
        let d = self.data.iter().zip(other.data.iter())
            .fold(A::zero(), |acc, (a, b)| acc + (*a - *b) * (*a - *b))
            .sqrt();
        Ok(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting(factors: usize, dim: usize) -> Tensor {
        let mut k = 0.0;
        Tensor::new(factors, dim, |_| { k += 1.0; k }).unwrap()
    }

    #[test]
    fn creation_is_zero() {
        for n in 1..=3 {
            for k in 1..=3 {
                let op: TensorOperator = TensorOperator::zeros(n, k).unwrap();
                assert_eq!(op.shape().len(), 2 * n);
                assert!(op.entries().all(|(_, x)| *x == 0.0));
            }
        }
    }

    #[test]
    fn identity_entries() {
        let op: TensorOperator = TensorOperator::identity(2, 3).unwrap();
        for (idx, x) in op.entries() {
            let expected = if idx[..2] == idx[2..] { 1.0 } else { 0.0 };
            assert_eq!(*x, expected);
        }
        assert_eq!(op.norm(), 3.0);
    }

    #[test]
    fn permutation_matches_identity_for_identity_perm() {
        let id: TensorOperator = TensorOperator::identity(3, 2).unwrap();
        let p: TensorOperator = TensorOperator::permutation(&[1, 2, 3], 2).unwrap();
        assert_eq!(id, p);
    }

    #[test]
    fn permutation_entries() {
        let perm = [2, 3, 1];
        let op: TensorOperator = TensorOperator::permutation(&perm, 2).unwrap();
        for (idx, x) in op.entries() {
            let (out, inp) = idx.split_at(3);
            let hit = (0..3).all(|p| out[p] == inp[perm[p] - 1]);
            assert_eq!(*x, if hit { 1.0 } else { 0.0 });
        }
    }

    #[test]
    fn bad_permutations() {
        assert!(matches!(
            TensorOperator::<f64>::permutation(&[1, 1, 3], 2),
            Err(BadPermutation(..)),
        ));
        assert!(matches!(
            TensorOperator::<f64>::permutation(&[0, 1], 2),
            Err(BadPermutation(..)),
        ));
        let mut op: TensorOperator = TensorOperator::zeros(2, 2).unwrap();
        assert!(op.add_permutation_inplace(&[1, 2, 3], 1.0).is_err());
    }

    #[test]
    fn apply_transposition() {
        let t = counting(2, 3);
        let swap: TensorOperator = TensorOperator::permutation(&[2, 1], 3).unwrap();
        let s = swap.apply(&t).unwrap();
        for (idx, x) in s.entries() {
            assert_eq!(Some(x), t.get(&[idx[1], idx[0]]));
        }
    }

    #[test]
    fn apply_rejects_type_mismatch() {
        let op: TensorOperator = TensorOperator::identity(2, 2).unwrap();
        assert!(matches!(
            op.apply(&counting(3, 2)),
            Err(IncompatibleTypeApply(3, 2, 2, 2)),
        ));
        assert!(matches!(
            op.apply(&counting(2, 3)),
            Err(IncompatibleTypeApply(2, 3, 2, 2)),
        ));
    }

    #[test]
    fn linear_combination() {
        let t = counting(3, 2);
        let a: TensorOperator = TensorOperator::identity(3, 2).unwrap();
        let b = a.scale(3.0).add(&a.scale(5.0)).unwrap();
        let out = b.apply(&t).unwrap();
        for (idx, x) in out.entries() {
            assert_eq!(*x, 8.0 * t.get(&idx).unwrap());
        }

        let mut c = a.scale(3.0);
        c.scaled_add_inplace(5.0, &a).unwrap();
        assert_eq!(c, b);
        let mut d = a.clone();
        d.scale_inplace(3.0);
        d.add_inplace(&a.scale(5.0)).unwrap();
        assert_eq!(d.distance(&b).unwrap(), 0.0);
    }

    #[test]
    fn from_array_requires_even_axes() {
        let odd = nd::ArrayD::<f64>::zeros(vec![2, 2, 2]);
        assert!(matches!(TensorOperator::from_array(odd), Err(NonUniformShape(_))));
        let even = nd::ArrayD::<f64>::zeros(vec![2, 2, 2, 2]);
        assert_eq!(TensorOperator::from_array(even).unwrap().tensor_type(), (2, 2));
    }
}
