//! Character tables of the symmetric groups.
//!
//! The irreducible representations of *S*<sub>*n*</sub> and its conjugacy
//! classes are both labeled by partitions of *n*. A [`CharacterTable`] holds
//! the integer value of each irreducible character on each class, together
//! with the class sizes, and satisfies the orthogonality relations
//!
//! <blockquote>
//!   <p style="font-size:20px">
//!     Σ<sub><i>c</i></sub>
//!       <i>χ</i><sub><i>λ</i></sub>(<i>c</i>)
//!       <i>χ</i><sub><i>μ</i></sub>(<i>c</i>)
//!       |<i>c</i>|
//!     = <i>n</i>! <i>δ</i><sub><i>λ</i>,<i>μ</i></sub>
//!   </p>
//! </blockquote>
//!
//! Tables for 2 ≤ *n* ≤ [`MAX_DISTRIBUTED_RANK`] ship with the crate; larger
//! ranks need a table supplied through [`CharacterTable::from_parts`].
//!
//! ```
//! use schur_transform::character::CharacterTable;
//!
//! let table = CharacterTable::for_rank(3).unwrap();
//! let standard = "2+1".parse().unwrap();
//! assert_eq!(table.dimension(&standard), Some(2));
//! assert_eq!(table.value(&standard, &"3".parse().unwrap()), Some(-1));
//! ```

use std::collections::BTreeMap;
use ndarray as nd;
use crate::{
    character_tables,
    group::{
        self,
        ConjugacyClass,
        GroupError,
        GroupResult,
        Partition,
    },
};
use GroupError::*;

/// Largest rank whose character table is distributed with the crate.
pub const MAX_DISTRIBUTED_RANK: usize = character_tables::MAX_RANK;

/// The character table of *S*<sub>*n*</sub>.
///
/// Rows are irreducible representations and columns are conjugacy classes,
/// both labeled by partitions of *n*.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharacterTable {
    rank: usize,
    order: u64,
    irreps: Vec<Partition>,
    classes: Vec<Partition>,
    class_sizes: Vec<u64>,
    values: nd::Array2<i64>,
}

impl CharacterTable {
    /// Load the distributed character table of *S*<sub>`rank`</sub>.
    ///
    /// Fails for `rank < 2`, and for `rank` above [`MAX_DISTRIBUTED_RANK`];
    /// tables for larger ranks must be supplied with
    /// [`from_parts`][Self::from_parts].
    pub fn for_rank(rank: usize) -> GroupResult<Self> {
        (rank >= 2).then_some(()).ok_or(RankTooSmall(rank))?;
        let raw
            = character_tables::lookup(rank)
            .ok_or(RankUnsupported(rank, MAX_DISTRIBUTED_RANK))?;
        let labels: Vec<Partition>
            = raw.partitions.iter()
            .map(|parts| Partition::new(parts.iter().copied()))
            .collect::<GroupResult<_>>()?;
        let n = labels.len();
        let values: nd::Array2<i64>
            = nd::Array2::from_shape_fn((n, n), |(i, c)| raw.values[i][c]);
        Ok(Self {
            rank,
            order: group::factorial(rank)?,
            irreps: labels.clone(),
            classes: labels,
            class_sizes: raw.class_sizes.to_vec(),
            values,
        })
    }

    /// Assemble a character table from externally supplied data.
    ///
    /// `values[[i, c]]` is the character of irreducible representation
    /// `irreps[i]` on conjugacy class `classes[c]`, and `class_sizes[c]` is
    /// the size of `classes[c]`. Every label must be a partition of `rank`,
    /// the identity class must be present, class sizes must sum to
    /// `rank`!, and the characters must satisfy the orthogonality relations.
    pub fn from_parts(
        rank: usize,
        irreps: Vec<Partition>,
        classes: Vec<Partition>,
        class_sizes: Vec<u64>,
        values: nd::Array2<i64>,
    ) -> GroupResult<Self>
    {
        (rank >= 2).then_some(()).ok_or(RankTooSmall(rank))?;
        (rank <= group::MAX_RANK).then_some(())
            .ok_or(RankTooLarge(rank, group::MAX_RANK))?;
        let n = classes.len();
        if irreps.len() != n || class_sizes.len() != n || values.dim() != (n, n) {
            return Err(MalformedTable(format!(
                "{} representations, {} classes, {} class sizes, {:?} values",
                irreps.len(), n, class_sizes.len(), values.dim(),
            )));
        }
        let bad_label
            = irreps.iter().chain(classes.iter())
            .find(|label| label.total() != rank);
        if let Some(label) = bad_label {
            return Err(MalformedTable(
                format!("label {label} is not a partition of {rank}")));
        }
        let mut sorted = classes.clone();
        sorted.sort();
        sorted.dedup();
        if sorted.len() != n {
            return Err(MalformedTable("duplicate class labels".to_string()));
        }
        let mut sorted = irreps.clone();
        sorted.sort();
        sorted.dedup();
        if sorted.len() != n {
            return Err(MalformedTable(
                "duplicate representation labels".to_string()));
        }
        if !classes.contains(&Partition::identity(rank)) {
            return Err(MalformedTable("missing identity class".to_string()));
        }
        let order = group::factorial(rank)?;
        let total: u64 = class_sizes.iter().sum();
        if total != order {
            return Err(MalformedTable(
                format!("class sizes sum to {total}, expected {order}")));
        }
        for (class, size) in classes.iter().zip(class_sizes.iter()) {
            let expected = class.class_size()?;
            if *size != expected {
                return Err(MalformedTable(format!(
                    "class {class} declared with {size} members, expected {expected}"
                )));
            }
        }
        let table = Self { rank, order, irreps, classes, class_sizes, values };
        table.check_orthogonality()?;
        Ok(table)
    }

    /// Return the rank *n*.
    pub fn rank(&self) -> usize { self.rank }

    /// Return the group order *n*!.
    pub fn order(&self) -> u64 { self.order }

    /// Return the irreducible representation labels, in row order.
    pub fn irreps(&self) -> &[Partition] { &self.irreps }

    /// Return the conjugacy class labels, in column order.
    pub fn classes(&self) -> &[Partition] { &self.classes }

    /// Return the conjugacy class sizes, in column order.
    pub fn class_sizes(&self) -> &[u64] { &self.class_sizes }

    /// Return the full table of values, indexed by `[irrep, class]`.
    pub fn values(&self) -> nd::ArrayView2<'_, i64> { self.values.view() }

    /// Return the label of the identity class, `1+...+1`.
    pub fn identity_class(&self) -> Partition { Partition::identity(self.rank) }

    fn irrep_index(&self, irrep: &Partition) -> Option<usize> {
        self.irreps.iter().position(|label| label == irrep)
    }

    fn class_index(&self, class: &Partition) -> Option<usize> {
        self.classes.iter().position(|label| label == class)
    }

    /// Return the size of a conjugacy class.
    pub fn class_size(&self, class: &Partition) -> Option<u64> {
        self.class_index(class).map(|c| self.class_sizes[c])
    }

    /// Return the value of a character on a conjugacy class.
    pub fn value(&self, irrep: &Partition, class: &Partition) -> Option<i64> {
        let i = self.irrep_index(irrep)?;
        let c = self.class_index(class)?;
        Some(self.values[[i, c]])
    }

    /// Return a character as a class function, mapping each conjugacy class
    /// label to the character's value there.
    pub fn character(&self, irrep: &Partition)
        -> Option<BTreeMap<Partition, i64>>
    {
        let i = self.irrep_index(irrep)?;
        let chi: BTreeMap<Partition, i64>
            = self.classes.iter().cloned()
            .zip(self.values.row(i).iter().copied())
            .collect();
        Some(chi)
    }

    /// Return the dimension of an irreducible representation, which is the
    /// value of its character on the identity class.
    pub fn dimension(&self, irrep: &Partition) -> Option<i64> {
        self.value(irrep, &self.identity_class())
    }

    /// Return Σ<sub>*c*</sub> *χ*<sub>*i*</sub>(*c*) *χ*<sub>*j*</sub>(*c*)
    /// |*c*| for rows `i` and `j`.
    ///
    /// *Panics* if either row is out of bounds.
    pub fn inner_product(&self, i: usize, j: usize) -> i128 {
        self.values.row(i).iter()
            .zip(self.values.row(j).iter())
            .zip(self.class_sizes.iter())
            .map(|((a, b), s)| *a as i128 * *b as i128 * *s as i128)
            .sum()
    }

    /// Verify the orthogonality relations for every pair of characters.
    pub fn check_orthogonality(&self) -> GroupResult<()> {
        let order = self.order() as i128;
        let n = self.irreps.len();
        for i in 0..n {
            for j in i..n {
                let product = self.inner_product(i, j);
                let expected = if i == j { order } else { 0 };
                if product != expected {
                    return Err(Orthogonality(
                        self.irreps[i].clone(),
                        self.irreps[j].clone(),
                        product as i64,
                        expected as i64,
                    ));
                }
            }
        }
        Ok(())
    }

    /// Enumerate all *n*! permutations and group them into the conjugacy
    /// classes of the table, in column order.
    ///
    /// Fails if any enumerated class does not have the size declared by the
    /// table, which indicates corrupted or incompatible table data.
    pub fn conjugacy_classes(&self) -> GroupResult<Vec<ConjugacyClass>> {
        group::conjugacy_classes(
            self.rank,
            self.classes.iter().zip(self.class_sizes.iter().copied()),
        )
    }
}
