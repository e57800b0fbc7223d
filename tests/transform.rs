use approx::assert_relative_eq;
use ndarray as nd;
use rand::{ Rng, SeedableRng, rngs::StdRng };
use schur_transform::{
    self as st,
    Partition,
    ProjectorBuilder,
    SchurTransform,
    Summary,
    SummaryKind,
    TransformConfig,
    TransformError,
    transform::{ covariance_tensor, recenter_at_mean, samples_from_nested },
};

fn part(s: &str) -> Partition { s.parse().unwrap() }

fn random_samples(series: usize, count: usize, dim: usize, seed: u64)
    -> nd::Array3<f64>
{
    let mut rng = StdRng::seed_from_u64(seed);
    nd::Array3::from_shape_fn((series, count, dim), |_| rng.gen_range(-1.0..1.0))
}

fn small_samples() -> nd::Array3<f64> {
    samples_from_nested(vec![
        vec![vec![4.0, 2.0], vec![4.01, 2.1], vec![3.9, 2.2]],
        vec![vec![3.99, 2.1], vec![3.7, 2.1], vec![4.0, 2.2]],
        vec![vec![4.4, 1.9], vec![4.3, 1.8], vec![4.3, 1.8]],
    ])
    .unwrap()
}

#[test]
fn three_components_resum() {
    let x = small_samples();
    let engine = SchurTransform::new();
    let summary = engine.transform(&x, TransformConfig::default()).unwrap();
    let Summary::Components(decomp) = summary else { panic!("wrong summary") };
    let labels: Vec<String> = decomp.iter().map(|(l, _)| l.to_string()).collect();
    assert_eq!(labels, ["1+1+1", "2+1", "3"]);

    let moment = covariance_tensor(recenter_at_mean(x.view()).unwrap().view())
        .unwrap();
    let mut total = decomp.get(&part("3")).unwrap().clone();
    total.add_inplace(decomp.get(&part("2+1")).unwrap()).unwrap();
    total.add_inplace(decomp.get(&part("1+1+1")).unwrap()).unwrap();
    assert!(total.distance(&moment).unwrap() <= 1e-9 * moment.norm());

    // no nonzero antisymmetric tensors with more factors than dimensions
    let antisym = decomp.get(&part("1+1+1")).unwrap();
    assert!(antisym.norm() <= 1e-12 * moment.norm());
    assert!(decomp.get(&part("3")).unwrap().norm() > 0.0);
}

#[test]
fn identical_series_are_purely_symmetric() {
    let one = random_samples(1, 8, 3, 1);
    let x = nd::concatenate(nd::Axis(0), &[one.view(), one.view(), one.view()])
        .unwrap();
    let engine = SchurTransform::new();
    let summary
        = engine.transform(&x, TransformConfig::new(SummaryKind::Norms))
        .unwrap();
    let norms = summary.scalars().unwrap();
    assert!(norms[&part("3")] > 0.0);
    assert!(norms[&part("2+1")] <= 1e-12 * norms[&part("3")]);
    assert!(norms[&part("1+1+1")] <= 1e-12 * norms[&part("3")]);
}

#[test]
fn components_are_fixed_by_their_projectors() {
    let x = random_samples(4, 12, 2, 2);
    let engine = SchurTransform::new();
    let decomp = engine.decompose_samples(x.view()).unwrap();
    assert_eq!(decomp.len(), 5);
    let projectors = engine.projectors(4, 2).unwrap();
    let scale: f64 = decomp.norms().values().sum();
    for (irrep, component) in decomp.iter() {
        for (other, projector) in projectors.iter() {
            let image = projector.apply(component).unwrap();
            if irrep == other {
                assert!(image.distance(component).unwrap() <= 1e-9 * scale);
            } else {
                assert!(image.norm() <= 1e-9 * scale);
            }
        }
    }
    // Young diagrams with more rows than dimensions contribute nothing
    for label in ["2+1+1", "1+1+1+1"] {
        assert!(decomp.get(&part(label)).unwrap().norm() <= 1e-9 * scale);
    }
}

#[test]
fn content_over_all_triples() {
    let x = random_samples(6, 10, 2, 3);
    let engine = SchurTransform::new();
    let config = TransformConfig::new(SummaryKind::Content).with_factors(3);
    let summary = engine.transform(&x, config).unwrap();
    let content = summary.distributions().unwrap();
    assert_eq!(content.len(), 3);
    assert!(content.values().all(|dist| dist.len() == 20));
    assert!(content.values().flatten().all(|norm| *norm >= 0.0));
    // every triple shares the projectors for (3, 2)
    assert_eq!(engine.cache().len(), 1);
    assert!(engine.cache().get(3, 2).is_some());
}

#[test]
fn sequential_content() {
    let x = random_samples(6, 10, 2, 3);
    let engine = SchurTransform::new();
    let config
        = TransformConfig::new(SummaryKind::SequentialContent).with_factors(3);
    let summary = engine.transform(&x, config).unwrap();
    assert_eq!(summary.kind(), SummaryKind::SequentialContent);
    let sequential = summary.distributions().unwrap();
    assert!(sequential.values().all(|dist| dist.len() == 4));

    // the first run is the first triple in lexicographic order
    let all
        = engine.transform(
            &x, TransformConfig::new(SummaryKind::Content).with_factors(3))
        .unwrap();
    let all = all.distributions().unwrap();
    for (irrep, dist) in sequential.iter() {
        assert_relative_eq!(dist[0], all[irrep][0]);
    }
}

#[test]
fn mean_and_variance_content() {
    let x = random_samples(5, 9, 2, 4);
    let engine = SchurTransform::new();
    let content
        = engine.transform(
            &x, TransformConfig::new(SummaryKind::Content).with_factors(2))
        .unwrap();
    let content = content.distributions().unwrap();
    let means
        = engine.transform(
            &x, TransformConfig::new(SummaryKind::MeanContent).with_factors(2))
        .unwrap();
    let variances
        = engine.transform(
            &x, TransformConfig::new(SummaryKind::VarianceContent).with_factors(2))
        .unwrap();
    let means = means.scalars().unwrap();
    let variances = variances.scalars().unwrap();
    assert_eq!(means.len(), 2);
    for (irrep, dist) in content.iter() {
        assert_eq!(dist.len(), 10);
        let n = dist.len() as f64;
        let mean = dist.iter().sum::<f64>() / n;
        let var = dist.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        assert_relative_eq!(means[irrep], mean, max_relative = 1e-10);
        assert_relative_eq!(variances[irrep], var, max_relative = 1e-9);
    }
}

#[test]
fn invalid_requests_fail_early() {
    let engine = SchurTransform::new();
    let x = random_samples(4, 5, 2, 5);
    assert!(matches!(
        engine.transform(&x, TransformConfig::new(SummaryKind::VarianceContent)),
        Err(TransformError::MissingFactorCount(SummaryKind::VarianceContent)),
    ));
    assert!(matches!(
        engine.transform(
            &x, TransformConfig::new(SummaryKind::Content).with_factors(5)),
        Err(TransformError::FactorCountOutOfRange(5, 4)),
    ));
    let flat = nd::Array2::<f64>::zeros((4, 5));
    assert!(matches!(
        engine.transform(&flat, TransformConfig::default()),
        Err(TransformError::WrongAxisCount(_)),
    ));
    assert!(engine.cache().is_empty());
}

#[test]
fn unsupported_rank_without_a_table() {
    let engine = SchurTransform::new();
    let x = random_samples(9, 2, 1, 6);
    assert!(engine.transform(&x, TransformConfig::default()).is_err());
    assert!(engine.cache().is_empty());
}

#[test]
fn externally_supplied_table_feeds_the_cache() {
    let engine = SchurTransform::new();
    let builder = ProjectorBuilder::new(3).unwrap();
    let set
        = engine.cache()
        .get_or_build_from_table(builder.table(), 2)
        .unwrap();
    assert_eq!(set.len(), 3);
    let again = engine.projectors(3, 2).unwrap();
    assert!(std::sync::Arc::ptr_eq(&set, &again));
}

#[test]
fn global_entry_point() {
    let x = small_samples();
    let summary
        = st::transform(&x, TransformConfig::new(SummaryKind::Norms)).unwrap();
    let norms = summary.scalars().unwrap();
    let local
        = SchurTransform::new()
        .transform(&x, TransformConfig::new(SummaryKind::Norms))
        .unwrap();
    for (irrep, norm) in local.scalars().unwrap().iter() {
        assert_relative_eq!(norms[irrep], *norm);
    }
    assert!(st::global_cache().get(3, 2).is_some());
}
