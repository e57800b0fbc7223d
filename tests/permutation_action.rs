use ndarray as nd;
use proptest::prelude::*;
use schur_transform::{
    group::Permutation,
    multi_index::MultiIndex,
    operator::TensorOperator,
    tensor::Tensor,
};

fn tensor_from(factors: usize, dim: usize, entries: Vec<f64>) -> Tensor {
    let data
        = nd::ArrayD::from_shape_vec(nd::IxDyn(&vec![dim; factors]), entries)
        .unwrap();
    Tensor::from_array(data).unwrap()
}

fn case() -> impl Strategy<Value = (Vec<usize>, usize, Vec<f64>)> {
    (2_usize..=4, 2_usize..=3)
        .prop_flat_map(|(n, k)| {
            (
                Just((1..=n).collect::<Vec<usize>>()).prop_shuffle(),
                Just(k),
                prop::collection::vec(-10.0_f64..10.0, k.pow(n as u32)),
            )
        })
}

proptest! {
    #[test]
    fn permutation_moves_entries((perm, k, entries) in case()) {
        let n = perm.len();
        let t = tensor_from(n, k, entries);
        let op = TensorOperator::permutation(&perm, k).unwrap();
        let s = op.apply(&t).unwrap();
        for out in MultiIndex::new(n, k) {
            // out[p] = in[perm[p] - 1]
            let mut inp = vec![0; n];
            perm.iter().zip(out.iter())
                .for_each(|(target, x)| { inp[target - 1] = *x; });
            prop_assert_eq!(s.get(&out), t.get(&inp));
        }
        let p = Permutation::new(perm).unwrap();
        for inp in MultiIndex::new(n, k) {
            prop_assert_eq!(s.get(&p.act_on_index(&inp)), t.get(&inp));
        }
    }

    #[test]
    fn inverse_undoes_permutation((perm, k, entries) in case()) {
        let n = perm.len();
        let t = tensor_from(n, k, entries);
        let inverse = Permutation::new(perm.clone()).unwrap().inverse();
        let there = TensorOperator::permutation(&perm, k).unwrap();
        let back = TensorOperator::permutation(inverse.values(), k).unwrap();
        let s = back.apply(&there.apply(&t).unwrap()).unwrap();
        prop_assert_eq!(s, t);
    }

    #[test]
    fn identity_is_a_no_op((perm, k, entries) in case()) {
        let n = perm.len();
        let t = tensor_from(n, k, entries);
        let id = TensorOperator::identity(n, k).unwrap();
        prop_assert_eq!(id.apply(&t).unwrap(), t.clone());
        let trivial
            = TensorOperator::permutation(Permutation::identity(n).values(), k)
            .unwrap();
        prop_assert_eq!(trivial, id);
    }
}

#[test]
fn three_cycle_on_rank_three() {
    let t: Tensor
        = Tensor::new(3, 3, |idx| (9 * idx[0] + 3 * idx[1] + idx[2]) as f64)
        .unwrap();
    let s = TensorOperator::permutation(&[2, 3, 1], 3).unwrap()
        .apply(&t)
        .unwrap();
    for idx in MultiIndex::new(3, 3) {
        let (i, j, l) = (idx[0], idx[1], idx[2]);
        assert_eq!(s.get(&[i, j, l]), t.get(&[l, i, j]));
    }
}

#[test]
fn bad_permutations_are_rejected() {
    assert!(TensorOperator::<f64>::permutation(&[1, 1, 2], 2).is_err());
    assert!(TensorOperator::<f64>::permutation(&[0, 1], 2).is_err());
    assert!(TensorOperator::<f64>::permutation(&[1, 2, 4], 2).is_err());
    assert!(Permutation::new(vec![3, 1]).is_err());
}
