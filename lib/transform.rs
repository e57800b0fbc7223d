//! The Schur–Weyl decomposition of joint moment tensors.
//!
//! Given *n* co-registered series of *N* samples of *k*-dimensional points,
//! arranged as a `[series][sample][coordinate]` array *x*, the transform
//!
//! 1. recenters each series at its per-coordinate mean;
//! 2. forms the rank-*n* joint moment tensor
//!    <blockquote>
//!      <p style="font-size:20px">
//!        <i>M</i><sub><i>a</i><sub>1</sub>,...,<i>a</i><sub><i>n</i></sub></sub>
//!          = Σ<sub><i>j</i></sub>
//!            ∏<sub><i>i</i></sub> <i>x</i><sub><i>i</i>,<i>j</i>,<i>a</i><sub><i>i</i></sub></sub>
//!      </p>
//!    </blockquote>
//! 3. applies the isotypic projector of every irreducible representation of
//!    *S*<sub>*n*</sub> to *M*;
//! 4. checks that the resulting components sum back to *M*;
//! 5. summarizes the components according to a [`SummaryKind`].
//!
//! The "content" summaries repeat steps 1–4 over sub-collections of *r*
//! series and report the distribution of component norms.
//!
//! ```
//! use schur_transform::transform::{
//!     SchurTransform, Summary, SummaryKind, TransformConfig, samples_from_nested,
//! };
//!
//! let samples = samples_from_nested(vec![
//!     vec![vec![4.0, 2.0], vec![4.01, 2.1], vec![3.9, 2.2]],
//!     vec![vec![3.99, 2.1], vec![3.7, 2.1], vec![4.0, 2.2]],
//!     vec![vec![4.4, 1.9], vec![4.3, 1.8], vec![4.3, 1.8]],
//! ]).unwrap();
//! let engine = SchurTransform::new();
//! let summary
//!     = engine.transform(&samples, TransformConfig::new(SummaryKind::Norms))
//!     .unwrap();
//! if let Summary::Norms(norms) = summary {
//!     assert_eq!(norms.len(), 3);
//! }
//! ```

use std::{ collections::BTreeMap, fmt, sync::Arc };
use itertools::Itertools;
use ndarray as nd;
use statrs::statistics::Statistics;
use thiserror::Error;
use crate::{
    COMPONENT_NORM_SCALE,
    VALIDATION_TOLERANCE,
    group::{ GroupError, Partition },
    projector::{ ProjectorCache, ProjectorError, ProjectorSet },
    tensor::{ Tensor, TensorError },
};

#[derive(Debug, Error)]
pub enum TransformError {
    /// Returned when the input does not have exactly three axes.
    #[error("expected 3 axes (series, sample, spatial coordinate), got axes of sizes {0:?}")]
    WrongAxisCount(Vec<usize>),

    /// Returned when nested input lists are not rectangular.
    #[error("ragged samples: series {0}, sample {1} has {2} coordinates, expected {3}")]
    RaggedCoordinates(usize, usize, usize, usize),

    /// Returned when nested input series do not all have the same number of
    /// samples.
    #[error("ragged samples: series {0} has {1} samples, expected {2}")]
    RaggedSeries(usize, usize, usize),

    /// Returned when any of the three axes has zero length.
    #[error("empty samples: axes of sizes {0:?}")]
    EmptySamples(Vec<usize>),

    /// Returned when a content summary is requested without a factor count.
    #[error("summary kind {0} requires a number of tensor factors")]
    MissingFactorCount(SummaryKind),

    /// Returned when the factor count for a content summary is less than 2 or
    /// exceeds the number of series.
    #[error("factor count {0} is out of range for {1} series")]
    FactorCountOutOfRange(usize, usize),

    /// Returned when a tensor operation fails.
    #[error("transform error: {0}")]
    Tensor(#[from] TensorError),

    /// Returned when character data cannot be obtained.
    #[error("transform error: {0}")]
    Group(#[from] GroupError),

    /// Returned when projectors cannot be built or fail validation.
    #[error("transform error: {0}")]
    Projector(#[from] ProjectorError),

    /// Returned when the components fail to sum to the moment tensor within
    /// tolerance.
    #[error("components do not sum to the moment tensor: deviation {0:e} exceeds tolerance {1:e}")]
    DecompositionMismatch(f64, f64),
}
use TransformError::*;
pub type TransformResult<T> = Result<T, TransformError>;

/// Selects the output of [`SchurTransform::transform`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SummaryKind {
    /// The tensor components of the decomposition.
    #[default]
    Components,
    /// The Euclidean norm of each component.
    Norms,
    /// For each component type, the norms of that component over the
    /// decompositions of every *r*-combination of series.
    Content,
    /// As `Content`, but over the *n* - *r* + 1 runs of *r* consecutive
    /// series only.
    SequentialContent,
    /// The mean of each `Content` distribution.
    MeanContent,
    /// The population variance of each `Content` distribution.
    VarianceContent,
}

impl SummaryKind {
    /// Return `true` if `self` requires a factor count.
    pub fn needs_factors(self) -> bool {
        !matches!(self, Self::Components | Self::Norms)
    }
}

impl fmt::Display for SummaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Components => "COMPONENTS",
            Self::Norms => "NORMS",
            Self::Content => "CONTENT",
            Self::SequentialContent => "SEQUENTIAL_CONTENT",
            Self::MeanContent => "MEAN_CONTENT",
            Self::VarianceContent => "VARIANCE_CONTENT",
        };
        f.write_str(name)
    }
}

/// Options for a single call to [`SchurTransform::transform`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TransformConfig {
    /// What to compute.
    pub summary: SummaryKind,
    /// Number of series *r* per joint moment for the content summaries.
    /// Ignored otherwise, where it is always the total number of series.
    pub factors: Option<usize>,
}

impl TransformConfig {
    /// Create a new config with no factor count.
    pub fn new(summary: SummaryKind) -> Self { Self { summary, factors: None } }

    /// Set the factor count.
    pub fn with_factors(mut self, factors: usize) -> Self {
        self.factors = Some(factors);
        self
    }
}

/// Map from irreducible representation label to some per-component value.
pub type LabelMap<T> = BTreeMap<Partition, T>;

/// The isotypic components of a moment tensor, keyed by irreducible
/// representation label.
#[derive(Clone, Debug, PartialEq)]
pub struct Decomposition(LabelMap<Tensor<f64>>);

impl Decomposition {
    /// Return the number of components.
    pub fn len(&self) -> usize { self.0.len() }

    /// Return `true` if there are no components.
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Get the component for a representation label.
    pub fn get(&self, irrep: &Partition) -> Option<&Tensor<f64>> {
        self.0.get(irrep)
    }

    /// Iterate over (label, component) pairs, in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&Partition, &Tensor<f64>)> + '_ {
        self.0.iter()
    }

    /// Return the Euclidean norm of every component, scaled by
    /// [`COMPONENT_NORM_SCALE`].
    pub fn norms(&self) -> LabelMap<f64> {
        self.0.iter()
            .map(|(irrep, component)| {
                (irrep.clone(), component.norm() * COMPONENT_NORM_SCALE)
            })
            .collect()
    }

    /// Unwrap `self` into the underlying map.
    pub fn into_inner(self) -> LabelMap<Tensor<f64>> { self.0 }
}

/// The output of [`SchurTransform::transform`], one variant per
/// [`SummaryKind`].
#[derive(Clone, Debug, PartialEq)]
pub enum Summary {
    Components(Decomposition),
    Norms(LabelMap<f64>),
    Content(LabelMap<Vec<f64>>),
    SequentialContent(LabelMap<Vec<f64>>),
    MeanContent(LabelMap<f64>),
    VarianceContent(LabelMap<f64>),
}

impl Summary {
    /// Return the kind of summary held.
    pub fn kind(&self) -> SummaryKind {
        match self {
            Self::Components(_) => SummaryKind::Components,
            Self::Norms(_) => SummaryKind::Norms,
            Self::Content(_) => SummaryKind::Content,
            Self::SequentialContent(_) => SummaryKind::SequentialContent,
            Self::MeanContent(_) => SummaryKind::MeanContent,
            Self::VarianceContent(_) => SummaryKind::VarianceContent,
        }
    }

    /// Return the decomposition, if `self` is `Components`.
    pub fn components(&self) -> Option<&Decomposition> {
        match self {
            Self::Components(decomp) => Some(decomp),
            _ => None,
        }
    }

    /// Return the per-label scalars, if `self` is `Norms`, `MeanContent`, or
    /// `VarianceContent`.
    pub fn scalars(&self) -> Option<&LabelMap<f64>> {
        match self {
            Self::Norms(x) | Self::MeanContent(x) | Self::VarianceContent(x)
                => Some(x),
            _ => None,
        }
    }

    /// Return the per-label distributions, if `self` is `Content` or
    /// `SequentialContent`.
    pub fn distributions(&self) -> Option<&LabelMap<Vec<f64>>> {
        match self {
            Self::Content(x) | Self::SequentialContent(x) => Some(x),
            _ => None,
        }
    }
}

/// Convert nested `[series][sample][coordinate]` lists to an array.
///
/// Fails if the lists are not rectangular or any axis is empty.
pub fn samples_from_nested(samples: Vec<Vec<Vec<f64>>>)
    -> TransformResult<nd::Array3<f64>>
{
    let n = samples.len();
    let count = samples.first().map(|series| series.len()).unwrap_or(0);
    let k
        = samples.first()
        .and_then(|series| series.first())
        .map(|point| point.len())
        .unwrap_or(0);
    if n == 0 || count == 0 || k == 0 {
        return Err(EmptySamples(vec![n, count, k]));
    }
    let mut flat: Vec<f64> = Vec::with_capacity(n * count * k);
    for (i, series) in samples.into_iter().enumerate() {
        if series.len() != count {
            return Err(RaggedSeries(i, series.len(), count));
        }
        for (j, point) in series.into_iter().enumerate() {
            if point.len() != k {
                return Err(RaggedCoordinates(i, j, point.len(), k));
            }
            flat.extend(point);
        }
    }
    nd::Array3::from_shape_vec((n, count, k), flat)
        .map_err(|err| TensorError::from(err).into())
}

// check for exactly three nonempty axes
fn as_samples<S, D>(samples: &nd::ArrayBase<S, D>)
    -> TransformResult<nd::ArrayView3<'_, f64>>
where
    S: nd::Data<Elem = f64>,
    D: nd::Dimension,
{
    let shape = samples.shape().to_vec();
    let view
        = samples.view()
        .into_dimensionality::<nd::Ix3>()
        .map_err(|_| WrongAxisCount(shape.clone()))?;
    if shape.contains(&0) { return Err(EmptySamples(shape)); }
    Ok(view)
}

/// Subtract from every sample the per-coordinate mean of its series.
pub fn recenter_at_mean(samples: nd::ArrayView3<'_, f64>)
    -> TransformResult<nd::Array3<f64>>
{
    let means: nd::Array2<f64>
        = samples.mean_axis(nd::Axis(1))
        .ok_or_else(|| EmptySamples(samples.shape().to_vec()))?;
    let mut centered = samples.to_owned();
    centered.outer_iter_mut()
        .zip(means.outer_iter())
        .for_each(|(mut series, mean)| { series -= &mean; });
    Ok(centered)
}

/// Compute the joint moment tensor of (already centered) samples.
///
/// The tensor has one factor per series and dimension equal to the number of
/// coordinates. An identically zero result usually means degenerate input,
/// and is logged as a warning.
pub fn covariance_tensor(centered: nd::ArrayView3<'_, f64>)
    -> TransformResult<Tensor<f64>>
{
    let (n, count, k) = centered.dim();
    let moment
        = Tensor::new(n, k, |idx| {
            (0..count)
                .map(|j| {
                    idx.iter().enumerate()
                        .map(|(i, a)| centered[[i, j, *a]])
                        .product::<f64>()
                })
                .sum()
        })?;
    if moment.is_zero() {
        log::warn!(
            "moment tensor of {} series with {} samples is identically zero",
            n, count,
        );
    }
    Ok(moment)
}

/// Apply every projector in `projectors` to `tensor`.
pub fn decompose(tensor: &Tensor<f64>, projectors: &ProjectorSet)
    -> TransformResult<Decomposition>
{
    Ok(Decomposition(projectors.apply(tensor)?))
}

/// Check that the components of `decomposition` sum to `tensor`, to within a
/// tolerance of [`VALIDATION_TOLERANCE`] relative to the norm of `tensor`.
pub fn validate_decomposition(decomposition: &Decomposition, tensor: &Tensor<f64>)
    -> TransformResult<()>
{
    let mut resummed = Tensor::zeros(tensor.factors(), tensor.dim())?;
    for (_, component) in decomposition.iter() {
        resummed.add_inplace(component)?;
    }
    let deviation = resummed.distance(tensor)?;
    let tolerance = tensor.norm() * VALIDATION_TOLERANCE;
    if deviation > tolerance {
        log::error!(
            "components do not sum to the moment tensor: deviation {:e} > {:e}",
            deviation, tolerance,
        );
        return Err(DecompositionMismatch(deviation, tolerance));
    }
    Ok(())
}

/// Main driver for the transform.
///
/// Holds a [`ProjectorCache`], so that repeated transforms of the same rank
/// and dimension build their projectors only once.
#[derive(Debug, Default)]
pub struct SchurTransform {
    cache: ProjectorCache,
}

impl SchurTransform {
    /// Create a new engine with an empty projector cache.
    pub fn new() -> Self { Self::default() }

    /// Return a reference to the projector cache.
    pub fn cache(&self) -> &ProjectorCache { &self.cache }

    /// Return the (cached) projectors for `rank` tensor factors over a
    /// `dim`-dimensional space.
    pub fn projectors(&self, rank: usize, dim: usize)
        -> TransformResult<Arc<ProjectorSet>>
    {
        Ok(self.cache.get_or_build(rank, dim)?)
    }

    /// Recenter, form the moment tensor, decompose it, and validate the
    /// decomposition, with one tensor factor per series.
    pub fn decompose_samples(&self, samples: nd::ArrayView3<'_, f64>)
        -> TransformResult<Decomposition>
    {
        let (n, _, k) = samples.dim();
        let projectors = self.projectors(n, k)?;
        let centered = recenter_at_mean(samples)?;
        let moment = covariance_tensor(centered.view())?;
        let decomposition = decompose(&moment, &projectors)?;
        validate_decomposition(&decomposition, &moment)?;
        Ok(decomposition)
    }

    /// Compute the component norm distributions over sub-collections of
    /// `factors` series: all combinations, or only runs of consecutive series
    /// if `sequential` is `true`.
    fn content(
        &self,
        samples: nd::ArrayView3<'_, f64>,
        factors: usize,
        sequential: bool,
    ) -> TransformResult<LabelMap<Vec<f64>>>
    {
        let n = samples.dim().0;
        let subsets: Vec<Vec<usize>>
            = if sequential {
                (0..=n - factors).map(|s| (s..s + factors).collect()).collect()
            } else {
                (0..n).combinations(factors).collect()
            };
        log::debug!(
            "computing content over {} subsets of {} out of {} series",
            subsets.len(), factors, n,
        );
        let mut content: LabelMap<Vec<f64>> = BTreeMap::new();
        for series in subsets.iter() {
            let sub = samples.select(nd::Axis(0), series);
            let norms = self.decompose_samples(sub.view())?.norms();
            for (irrep, norm) in norms.into_iter() {
                content.entry(irrep).or_default().push(norm);
            }
        }
        Ok(content)
    }

    /// Run the transform on a `[series][sample][coordinate]` array.
    ///
    /// Fails without computing anything if `samples` does not have exactly
    /// three nonempty axes, or if a content summary is requested without a
    /// valid factor count. Validation failures of the projectors or of the
    /// decomposition are also returned as errors.
    pub fn transform<S, D>(
        &self,
        samples: &nd::ArrayBase<S, D>,
        config: TransformConfig,
    ) -> TransformResult<Summary>
    where
        S: nd::Data<Elem = f64>,
        D: nd::Dimension,
    {
        let samples = as_samples(samples)?;
        let n = samples.dim().0;
        let factors
            = if config.summary.needs_factors() {
                let r = config.factors.ok_or(MissingFactorCount(config.summary))?;
                (2..=n).contains(&r).then_some(r)
                    .ok_or(FactorCountOutOfRange(r, n))?
            } else {
                n
            };
        let summary
            = match config.summary {
                SummaryKind::Components
                    => Summary::Components(self.decompose_samples(samples)?),
                SummaryKind::Norms
                    => Summary::Norms(self.decompose_samples(samples)?.norms()),
                SummaryKind::Content
                    => Summary::Content(self.content(samples, factors, false)?),
                SummaryKind::SequentialContent
                    => Summary::SequentialContent(
                        self.content(samples, factors, true)?),
                SummaryKind::MeanContent => {
                    let means: LabelMap<f64>
                        = self.content(samples, factors, false)?
                        .into_iter()
                        .map(|(irrep, dist)| (irrep, dist.iter().mean()))
                        .collect();
                    Summary::MeanContent(means)
                },
                SummaryKind::VarianceContent => {
                    let variances: LabelMap<f64>
                        = self.content(samples, factors, false)?
                        .into_iter()
                        .map(|(irrep, dist)| {
                            (irrep, dist.iter().population_variance())
                        })
                        .collect();
                    Summary::VarianceContent(variances)
                },
            };
        Ok(summary)
    }
}
