//! Isotypic projectors of *V*<sup>⊗*n*</sup> under the permutation action of
//! *S*<sub>*n*</sub>.
//!
//! For each irreducible representation *λ* of *S*<sub>*n*</sub>, the operator
//!
//! <blockquote>
//!   <p style="font-size:20px">
//!     <i>P</i><sub><i>λ</i></sub>
//!       = (<i>χ</i><sub><i>λ</i></sub>(1) / <i>n</i>!)
//!         Σ<sub><i>c</i></sub> <i>χ</i><sub><i>λ</i></sub>(<i>c</i>)
//!         Σ<sub><i>π</i> ∈ <i>c</i></sub> <i>A</i><sub><i>π</i></sub>
//!   </p>
//! </blockquote>
//!
//! projects onto the *λ*-isotypic component, where *A*<sub>*π*</sub> is the
//! permutation action of *π* on tensor factors and *c* runs over conjugacy
//! classes. Because characters are class functions, the inner sums (the
//! *class operators*) are computed once and shared by every *λ*. The
//! projectors sum to the identity, which is checked after every build.
//!
//! Projector sets cost *O*(*k*<sup>2*n*</sup>) memory each and are built once
//! per (*n*, *k*) by a [`ProjectorCache`].

use std::{
    collections::BTreeMap,
    sync::{ Arc, Mutex },
};
use once_cell::sync::OnceCell;
use rustc_hash::FxHashMap as HashMap;
use thiserror::Error;
use crate::{
    VALIDATION_TOLERANCE,
    character::CharacterTable,
    group::{ GroupError, Partition },
    operator::TensorOperator,
    tensor::{ Tensor, TensorError },
};

#[derive(Debug, Error)]
pub enum ProjectorError {
    /// Returned when an operator or tensor operation fails.
    #[error("projector error: {0}")]
    Tensor(#[from] TensorError),

    /// Returned when the character data for the requested rank cannot be
    /// obtained or is inconsistent.
    #[error("projector error: {0}")]
    Group(#[from] GroupError),

    /// Returned when the projectors fail to sum to the identity within
    /// tolerance.
    #[error("projectors do not sum to the identity: deviation {0:e} exceeds tolerance {1:e}")]
    SumNotIdentity(f64, f64),
}
use ProjectorError::*;
pub type ProjectorResult<T> = Result<T, ProjectorError>;

/// A complete set of isotypic projectors for one (*n*, *k*) pair, keyed by
/// irreducible representation label.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectorSet {
    rank: usize,
    dim: usize,
    projectors: BTreeMap<Partition, TensorOperator<f64>>,
}

impl ProjectorSet {
    /// Return the number of tensor factors *n*.
    pub fn rank(&self) -> usize { self.rank }

    /// Return the dimension *k* of the base space.
    pub fn dim(&self) -> usize { self.dim }

    /// Return the number of projectors, i.e. the number of irreducible
    /// representations of *S*<sub>*n*</sub>.
    pub fn len(&self) -> usize { self.projectors.len() }

    /// Return `true` if there are no projectors.
    pub fn is_empty(&self) -> bool { self.projectors.is_empty() }

    /// Get the projector for a representation label.
    pub fn get(&self, irrep: &Partition) -> Option<&TensorOperator<f64>> {
        self.projectors.get(irrep)
    }

    /// Iterate over representation labels, in order.
    pub fn labels(&self) -> impl Iterator<Item = &Partition> + '_ {
        self.projectors.keys()
    }

    /// Iterate over (label, projector) pairs, in label order.
    pub fn iter(&self)
        -> impl Iterator<Item = (&Partition, &TensorOperator<f64>)> + '_
    {
        self.projectors.iter()
    }

    /// Return the element-wise sum of all projectors.
    pub fn sum(&self) -> ProjectorResult<TensorOperator<f64>> {
        let mut acc = TensorOperator::zeros(self.rank, self.dim)?;
        for projector in self.projectors.values() {
            acc.add_inplace(projector)?;
        }
        Ok(acc)
    }

    /// Verify that the projectors sum to the identity, to within a tolerance
    /// of [`VALIDATION_TOLERANCE`] relative to the norm of the sum.
    pub fn validate(&self) -> ProjectorResult<()> {
        let sum = self.sum()?;
        let identity = TensorOperator::identity(self.rank, self.dim)?;
        let deviation = sum.distance(&identity)?;
        let tolerance = sum.norm() * VALIDATION_TOLERANCE;
        if deviation > tolerance {
            log::error!(
                "projectors for (n, k) = ({}, {}) do not sum to the identity: \
                deviation {:e} > {:e}",
                self.rank, self.dim, deviation, tolerance,
            );
            return Err(SumNotIdentity(deviation, tolerance));
        }
        Ok(())
    }

    /// Apply every projector to `tensor`, returning one component per
    /// representation label.
    pub fn apply(&self, tensor: &Tensor<f64>)
        -> ProjectorResult<BTreeMap<Partition, Tensor<f64>>>
    {
        self.projectors.iter()
            .map(|(irrep, projector)| {
                projector.apply(tensor)
                    .map(|component| (irrep.clone(), component))
                    .map_err(ProjectorError::from)
            })
            .collect()
    }
}

/// Constructs [`ProjectorSet`]s from the character table of
/// *S*<sub>*n*</sub>.
#[derive(Clone, Debug)]
pub struct ProjectorBuilder {
    table: CharacterTable,
}

impl ProjectorBuilder {
    /// Create a new builder using the distributed character table for
    /// `rank`.
    pub fn new(rank: usize) -> ProjectorResult<Self> {
        let table = CharacterTable::for_rank(rank)?;
        Ok(Self { table })
    }

    /// Create a new builder using a given character table, e.g. one supplied
    /// externally for a rank with no distributed table.
    pub fn with_table(table: CharacterTable) -> Self { Self { table } }

    /// Return the character table in use.
    pub fn table(&self) -> &CharacterTable { &self.table }

    /// Return the number of tensor factors *n*.
    pub fn rank(&self) -> usize { self.table.rank() }

    /// Compute the class operators Σ<sub>*π* ∈ *c*</sub> *A*<sub>*π*</sub> for
    /// every conjugacy class *c*, in the column order of the character table.
    pub fn class_operators(&self, dim: usize)
        -> ProjectorResult<Vec<(Partition, TensorOperator<f64>)>>
    {
        let rank = self.rank();
        self.table.conjugacy_classes()?
            .into_iter()
            .map(|class| -> ProjectorResult<(Partition, TensorOperator<f64>)> {
                let mut op = TensorOperator::zeros(rank, dim)?;
                for perm in class.permutations() {
                    op.add_permutation_inplace(perm.values(), 1.0)?;
                }
                Ok((class.partition().clone(), op))
            })
            .collect()
    }

    /// Build and validate the projector set for base dimension `dim`.
    ///
    /// Fails with [`ProjectorError::SumNotIdentity`] if the resulting
    /// projectors do not sum to the identity.
    pub fn build(&self, dim: usize) -> ProjectorResult<ProjectorSet> {
        let rank = self.rank();
        log::debug!("building projectors for (n, k) = ({}, {})", rank, dim);
        let class_ops = self.class_operators(dim)?;
        let identity_class = self.table.identity_class();
        let order = self.table.order() as f64;
        let values = self.table.values();
        let mut projectors: BTreeMap<Partition, TensorOperator<f64>>
            = BTreeMap::new();
        for (i, irrep) in self.table.irreps().iter().enumerate() {
            let irrep_dim
                = self.table.dimension(irrep)
                .ok_or_else(|| GroupError::UnknownClass(identity_class.clone()))?;
            let mut projector = TensorOperator::zeros(rank, dim)?;
            for (c, (_, class_op)) in class_ops.iter().enumerate() {
                let chi = values[[i, c]];
                if chi != 0 {
                    projector.scaled_add_inplace(chi as f64, class_op)?;
                }
            }
            projector.scale_inplace(irrep_dim as f64 / order);
            projectors.insert(irrep.clone(), projector);
        }
        let set = ProjectorSet { rank, dim, projectors };
        set.validate()?;
        Ok(set)
    }
}

// cache slot for a single (n, k) key; initialized at most once
type Slot = Arc<OnceCell<Arc<ProjectorSet>>>;

/// Memoizes [`ProjectorSet`]s by (*n*, *k*).
///
/// Each key is built at most once: concurrent requests for a key under
/// construction block until it is ready and then share the same set. A build
/// that fails (including validation) leaves the key empty, so the next request
/// retries. The cache is thread-safe and meant to live as long as the engine
/// using it.
#[derive(Debug, Default)]
pub struct ProjectorCache {
    slots: Mutex<HashMap<(usize, usize), Slot>>,
}

impl ProjectorCache {
    /// Create a new, empty cache.
    pub fn new() -> Self { Self::default() }

    fn slot(&self, key: (usize, usize)) -> Slot {
        let mut slots
            = self.slots.lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        slots.entry(key).or_default().clone()
    }

    /// Return the cached projector set for (`rank`, `dim`), if it has been
    /// built.
    pub fn get(&self, rank: usize, dim: usize) -> Option<Arc<ProjectorSet>> {
        let slots
            = self.slots.lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        slots.get(&(rank, dim)).and_then(|slot| slot.get().cloned())
    }

    /// Return the projector set for (`rank`, `dim`), building it from the
    /// distributed character table on first request.
    pub fn get_or_build(&self, rank: usize, dim: usize)
        -> ProjectorResult<Arc<ProjectorSet>>
    {
        self.get_or_build_with(rank, dim, || ProjectorBuilder::new(rank))
    }

    /// Like [`get_or_build`][Self::get_or_build], but building from a given
    /// character table on a miss.
    ///
    /// The cache is keyed only by (*n*, *k*), so a set already cached for
    /// the table's rank is returned as-is.
    pub fn get_or_build_from_table(&self, table: &CharacterTable, dim: usize)
        -> ProjectorResult<Arc<ProjectorSet>>
    {
        self.get_or_build_with(
            table.rank(),
            dim,
            || Ok(ProjectorBuilder::with_table(table.clone())),
        )
    }

    fn get_or_build_with<F>(&self, rank: usize, dim: usize, builder: F)
        -> ProjectorResult<Arc<ProjectorSet>>
    where F: FnOnce() -> ProjectorResult<ProjectorBuilder>
    {
        let slot = self.slot((rank, dim));
        if let Some(set) = slot.get() {
            log::debug!("projector cache hit for (n, k) = ({}, {})", rank, dim);
            return Ok(set.clone());
        }
        let res
            = slot.get_or_try_init(|| {
                log::debug!(
                    "projector cache miss for (n, k) = ({}, {})", rank, dim);
                builder()?.build(dim).map(Arc::new)
            })
            .map(Arc::clone);
        if res.is_err() { self.discard_empty(&slot, (rank, dim)); }
        res
    }

    // drop the slot for `key` if it is still `slot` and was never filled
    fn discard_empty(&self, slot: &Slot, key: (usize, usize)) {
        let mut slots
            = self.slots.lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let stale
            = slots.get(&key)
            .is_some_and(|s| Arc::ptr_eq(s, slot) && s.get().is_none());
        if stale { slots.remove(&key); }
    }

    /// Return the number of built projector sets.
    pub fn len(&self) -> usize {
        let slots
            = self.slots.lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        slots.values().filter(|slot| slot.get().is_some()).count()
    }

    /// Return `true` if no projector sets have been built.
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Discard all cached projector sets.
    pub fn clear(&self) {
        let mut slots
            = self.slots.lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        slots.clear();
    }
}
