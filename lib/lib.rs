#![allow(non_snake_case, non_upper_case_globals)]

//! Fourier–Schur analysis of co-registered spatial series.
//!
//! A collection of *n* series of *k*-dimensional samples has a rank-*n* joint
//! moment tensor in *V*<sup>⊗*n*</sup>, dim *V* = *k*. The symmetric group
//! *S*<sub>*n*</sub> acts on this space by permuting tensor factors, and
//! Schur–Weyl duality splits the moment tensor into one isotypic component
//! per irreducible representation of *S*<sub>*n*</sub>, labeled by an integer
//! partition of *n*. The sizes of these components measure how much of the
//! joint behavior of the series is symmetric, antisymmetric, or of some
//! mixed symmetry type.
//!
//! The main entry point is [`SchurTransform`], or the free function
//! [`transform`], which uses a single process-wide engine.

use std::fmt;
use ndarray as nd;
use num_traits::Float;
use once_cell::sync::Lazy;

pub mod multi_index;
pub mod tensor;
pub mod operator;
pub mod group;
pub mod character;
mod character_tables;
pub mod projector;
pub mod transform;

pub use tensor::{ Tensor, TensorError };
pub use operator::TensorOperator;
pub use group::{ GroupError, Partition, Permutation };
pub use character::CharacterTable;
pub use projector::{ ProjectorBuilder, ProjectorCache, ProjectorError, ProjectorSet };
pub use transform::{
    Decomposition,
    SchurTransform,
    Summary,
    SummaryKind,
    TransformConfig,
    TransformError,
    TransformResult,
};

/// Relative tolerance for validation: projectors must sum to the identity,
/// and components must sum to the moment tensor, to within this fraction of
/// the reference norm.
pub const VALIDATION_TOLERANCE: f64 = 1e-9;

/// Factor applied to component norms in all norm-based summaries.
pub const COMPONENT_NORM_SCALE: f64 = 1.0;

/// Numeric entry type of [`Tensor`] and [`TensorOperator`].
pub trait Scalar
where Self: Float + nd::LinalgScalar + fmt::Debug + fmt::Display + Send + Sync
{ }

impl<T> Scalar for T
where T: Float + nd::LinalgScalar + fmt::Debug + fmt::Display + Send + Sync
{ }

static ENGINE: Lazy<SchurTransform> = Lazy::new(SchurTransform::new);

/// Run [`SchurTransform::transform`] on a process-wide engine, whose
/// projector cache persists between calls.
pub fn transform<S, D>(samples: &nd::ArrayBase<S, D>, config: TransformConfig)
    -> TransformResult<Summary>
where
    S: nd::Data<Elem = f64>,
    D: nd::Dimension,
{
    ENGINE.transform(samples, config)
}

/// Return the projector cache of the process-wide engine used by
/// [`transform`].
pub fn global_cache() -> &'static ProjectorCache { ENGINE.cache() }
