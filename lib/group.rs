//! Permutations, partitions, and conjugacy classes of the symmetric group
//! *S*<sub>*n*</sub>.
//!
//! Permutations are written in one-line notation as the sequence of values
//! *π*(1), ..., *π*(*n*). Two permutations are conjugate in *S*<sub>*n*</sub>
//! exactly when they have the same *cycle type*, the multiset of lengths of
//! their disjoint cycles, which is a [`Partition`] of *n*. Partitions are
//! therefore used as conjugacy class labels, written in the `a+b+c` form (e.g.
//! `2+1+1` for the class of transpositions in *S*<sub>4</sub>).
//!
//! ```
//! use schur_transform::group::{ Partition, Permutation };
//!
//! let p = Permutation::new(vec![3, 1, 2, 4, 5, 7, 6, 8, 9, 10]).unwrap();
//! assert_eq!(p.cycle_type().to_string(), "3+2+1+1+1+1+1");
//!
//! let q = Partition::from_cycle_notation("(1 2)(3 4)", 5).unwrap();
//! assert_eq!(q, "2+2+1".parse().unwrap());
//! ```

use std::{ collections::BTreeMap, fmt, str::FromStr };
use itertools::Itertools;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GroupError {
    /// Returned when a sequence of values is not a permutation of
    /// {1, ..., *n*}.
    #[error("not a permutation in one-line notation: {0:?}")]
    InvalidPermutation(Vec<usize>),

    /// Returned when a string or sequence cannot be read as a partition.
    #[error("invalid partition: {0:?}")]
    InvalidPartition(String),

    /// Returned when a string cannot be read as a product of disjoint cycles.
    #[error("invalid cycle notation for rank {1}: {0:?}")]
    InvalidCycleNotation(String, usize),

    /// Returned when the symmetric group of the requested rank is trivial.
    #[error("symmetric group rank must be at least 2, got {0}")]
    RankTooSmall(usize),

    /// Returned when no distributed character table covers the requested
    /// rank and none was supplied.
    #[error("no distributed character table for rank {0} (ranks up to {1} are distributed); supply one externally")]
    RankUnsupported(usize, usize),

    /// Returned when the requested rank is too large for exact class-size
    /// arithmetic.
    #[error("symmetric group rank {0} exceeds the largest supported rank {1}")]
    RankTooLarge(usize, usize),

    /// Returned when an externally supplied character table has inconsistent
    /// shape or labels.
    #[error("malformed character table: {0}")]
    MalformedTable(String),

    /// Returned when two characters fail the orthogonality relations.
    #[error("characters {0} and {1} have inner product {2}, expected {3}")]
    Orthogonality(Partition, Partition, i64, i64),

    /// Returned when the enumerated size of a conjugacy class disagrees with
    /// the size declared by a character table.
    #[error("found {1} permutations of cycle type {0}, expected {2}")]
    ClassSizeMismatch(Partition, u64, u64),

    /// Returned when a permutation's cycle type is not a class of the table.
    #[error("cycle type {0} is not a conjugacy class of the table")]
    UnknownClass(Partition),
}
use GroupError::*;
pub type GroupResult<T> = Result<T, GroupError>;

/// Largest rank for which *n*! fits in a `u64`.
pub const MAX_RANK: usize = 20;

/// Return *n*!.
///
/// Fails with [`GroupError::RankTooLarge`] if the result does not fit in a
/// `u64`, i.e. if `n` exceeds [`MAX_RANK`].
pub fn factorial(n: usize) -> GroupResult<u64> {
    (1..=n as u64)
        .try_fold(1_u64, |acc, k| acc.checked_mul(k))
        .ok_or(RankTooLarge(n, MAX_RANK))
}

/// A partition of a positive integer, stored with parts in non-increasing
/// order.
///
/// The derived ordering is lexicographic on the parts, which sorts partitions
/// of *n* from `1+...+1` up to `n`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Partition(Vec<usize>);

impl Partition {
    /// Create a new partition from its parts, in any order.
    ///
    /// Fails if there are no parts or any part is zero.
    pub fn new<I>(parts: I) -> GroupResult<Self>
    where I: IntoIterator<Item = usize>
    {
        let mut parts: Vec<usize> = parts.into_iter().collect();
        if parts.is_empty() || parts.contains(&0) {
            return Err(InvalidPartition(format!("{parts:?}")));
        }
        parts.sort_unstable_by(|a, b| b.cmp(a));
        Ok(Self(parts))
    }

    /// Return the partition `1+...+1` of `n`, the cycle type of the identity
    /// permutation.
    pub fn identity(n: usize) -> Self { Self(vec![1; n]) }

    /// Read the cycle type of a permutation of {1, ..., `n`} written as a
    /// product of disjoint cycles, e.g. `(1 2)(3 4)`.
    ///
    /// Cycles must be parenthesized; entries may be separated by any
    /// non-digit characters. Points not mentioned are fixed, and a string
    /// with no cycles denotes the identity.
    pub fn from_cycle_notation(cycles: &str, n: usize) -> GroupResult<Self> {
        let bad = || InvalidCycleNotation(cycles.to_string(), n);
        let mut seen = vec![false; n];
        let mut lengths: Vec<usize> = Vec::new();
        let mut current: Option<usize> = None;
        let mut number: Option<usize> = None;
        for c in cycles.chars() {
            if let Some(d) = c.to_digit(10) {
                current.ok_or_else(bad)?;
                number = Some(number.unwrap_or(0) * 10 + d as usize);
                continue;
            }
            if let Some(x) = number.take() {
                (1..=n).contains(&x).then_some(()).ok_or_else(bad)?;
                (!std::mem::replace(&mut seen[x - 1], true))
                    .then_some(()).ok_or_else(bad)?;
                current = current.map(|len| len + 1);
            }
            match c {
                '(' => {
                    current.is_none().then_some(()).ok_or_else(bad)?;
                    current = Some(0);
                },
                ')' => {
                    let len = current.take().ok_or_else(bad)?;
                    if len > 0 { lengths.push(len); }
                },
                _ => { },
            }
        }
        (current.is_none() && number.is_none())
            .then_some(()).ok_or_else(bad)?;
        let fixed = n - lengths.iter().sum::<usize>();
        lengths.extend(std::iter::repeat(1).take(fixed));
        Self::new(lengths).map_err(|_| bad())
    }

    /// Return the parts in non-increasing order.
    pub fn parts(&self) -> &[usize] { &self.0 }

    /// Return the number of parts.
    pub fn len(&self) -> usize { self.0.len() }

    /// Return `true` if there are no parts. Never true for a constructed
    /// partition.
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Return the partitioned integer, i.e. the sum of all parts.
    pub fn total(&self) -> usize { self.0.iter().sum() }

    /// Return `true` if every part is 1.
    pub fn is_identity(&self) -> bool { self.0.iter().all(|p| *p == 1) }

    /// Return the number of permutations in *S*<sub>*n*</sub> with this cycle
    /// type,
    /// *n*! / ∏<sub>*i*</sub> *i*<sup>*m*<sub>*i*</sub></sup> *m*<sub>*i*</sub>!,
    /// where *m*<sub>*i*</sub> is the number of parts equal to *i*.
    ///
    /// Fails if the partitioned integer exceeds [`MAX_RANK`].
    pub fn class_size(&self) -> GroupResult<u64> {
        let order = factorial(self.total())?;
        // divides n!, so no overflow once n! fits
        let centralizer: u64
            = self.0.iter()
            .dedup_with_count()
            .map(|(m, i)| Ok((*i as u64).pow(m as u32) * factorial(m)?))
            .product::<GroupResult<u64>>()?;
        Ok(order / centralizer)
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join("+"))
    }
}

impl FromStr for Partition {
    type Err = GroupError;

    fn from_str(s: &str) -> GroupResult<Self> {
        let parts: Vec<usize>
            = s.split('+')
            .map(|part| part.trim().parse::<usize>())
            .collect::<Result<_, _>>()
            .map_err(|_| InvalidPartition(s.to_string()))?;
        Self::new(parts).map_err(|_| InvalidPartition(s.to_string()))
    }
}

/// A permutation of {1, ..., *n*} in one-line notation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    /// Create a new permutation from its values *π*(1), ..., *π*(*n*).
    ///
    /// Fails if `values` is not a rearrangement of 1, ..., *n*.
    pub fn new(values: Vec<usize>) -> GroupResult<Self> {
        let n = values.len();
        let mut seen = vec![false; n];
        let valid
            = values.iter().all(|v| {
                (1..=n).contains(v)
                    && !std::mem::replace(&mut seen[v - 1], true)
            });
        if valid { Ok(Self(values)) } else { Err(InvalidPermutation(values)) }
    }

    /// Return the identity permutation of {1, ..., `n`}.
    pub fn identity(n: usize) -> Self { Self((1..=n).collect()) }

    /// Iterate over all *n*! permutations of {1, ..., `n`} in lexicographic
    /// order.
    pub fn all(n: usize) -> impl Iterator<Item = Self> {
        (1..=n).permutations(n).map(Self)
    }

    /// Return the values *π*(1), ..., *π*(*n*).
    pub fn values(&self) -> &[usize] { &self.0 }

    /// Return the number of points *n* acted on.
    pub fn len(&self) -> usize { self.0.len() }

    /// Return `true` if `self` acts on no points.
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Return the inverse permutation.
    pub fn inverse(&self) -> Self {
        let mut inv = vec![0; self.0.len()];
        self.0.iter().enumerate()
            .for_each(|(k, v)| { inv[v - 1] = k + 1; });
        Self(inv)
    }

    /// Rearrange the positions of a multi-index the way the permutation
    /// operator of `self` rearranges tensor factors: position *p* of the
    /// result holds `index[`*π*(*p*)` - 1]`.
    ///
    /// *Panics* if `index` is shorter than *n*.
    pub fn act_on_index<T>(&self, index: &[T]) -> Vec<T>
    where T: Copy
    {
        self.0.iter().map(|v| index[v - 1]).collect()
    }

    /// Decompose into disjoint cycles, including fixed points, each cycle
    /// starting at its smallest point.
    pub fn cycles(&self) -> Vec<Vec<usize>> {
        let mut visited = vec![false; self.0.len()];
        let mut cycles: Vec<Vec<usize>> = Vec::new();
        for start in 1..=self.0.len() {
            if visited[start - 1] { continue; }
            let mut cycle = vec![start];
            visited[start - 1] = true;
            let mut next = self.0[start - 1];
            while next != start {
                visited[next - 1] = true;
                cycle.push(next);
                next = self.0[next - 1];
            }
            cycles.push(cycle);
        }
        cycles
    }

    /// Return the cycle type of `self`, the partition of *n* formed by the
    /// lengths of its disjoint cycles.
    pub fn cycle_type(&self) -> Partition {
        let mut lengths: Vec<usize>
            = self.cycles().into_iter().map(|c| c.len()).collect();
        lengths.sort_unstable_by(|a, b| b.cmp(a));
        Partition(lengths)
    }
}

impl AsRef<[usize]> for Permutation {
    fn as_ref(&self) -> &[usize] { &self.0 }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

/// A conjugacy class of *S*<sub>*n*</sub>: a cycle type together with every
/// permutation having it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConjugacyClass {
    partition: Partition,
    size: u64,
    permutations: Vec<Permutation>,
}

impl ConjugacyClass {
    /// Return the cycle type labeling the class.
    pub fn partition(&self) -> &Partition { &self.partition }

    /// Return the declared size of the class.
    pub fn size(&self) -> u64 { self.size }

    /// Return the members of the class in lexicographic order.
    pub fn permutations(&self) -> &[Permutation] { &self.permutations }
}

/// Enumerate all permutations of {1, ..., `n`} and group them by cycle type.
///
/// Members of each class are in lexicographic order.
pub fn classify_permutations(n: usize) -> BTreeMap<Partition, Vec<Permutation>> {
    let mut classes: BTreeMap<Partition, Vec<Permutation>> = BTreeMap::new();
    for perm in Permutation::all(n) {
        classes.entry(perm.cycle_type()).or_default().push(perm);
    }
    classes
}

/// Enumerate the conjugacy classes of *S*<sub>`n`</sub>, checking each
/// against a declared size.
///
/// `declared` must list every cycle type of *S*<sub>`n`</sub>. Fails with
/// [`GroupError::UnknownClass`] if an enumerated cycle type is missing from
/// `declared`, and with [`GroupError::ClassSizeMismatch`] if a class does not
/// have its declared number of members.
pub fn conjugacy_classes<'a, I>(n: usize, declared: I)
    -> GroupResult<Vec<ConjugacyClass>>
where I: IntoIterator<Item = (&'a Partition, u64)>
{
    let mut enumerated = classify_permutations(n);
    let mut classes: Vec<ConjugacyClass> = Vec::new();
    for (partition, size) in declared {
        let permutations = enumerated.remove(partition).unwrap_or_default();
        let found = permutations.len() as u64;
        if found != size {
            log::error!(
                "found {} permutations of cycle type {}, expected {}",
                found, partition, size,
            );
            return Err(ClassSizeMismatch(partition.clone(), found, size));
        }
        classes.push(
            ConjugacyClass { partition: partition.clone(), size, permutations });
    }
    if let Some(partition) = enumerated.into_keys().next() {
        return Err(UnknownClass(partition));
    }
    log::debug!("enumerated {} conjugacy classes of S_{}", classes.len(), n);
    Ok(classes)
}
