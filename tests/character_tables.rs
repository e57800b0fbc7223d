use schur_transform::{
    character::{ CharacterTable, MAX_DISTRIBUTED_RANK },
    group::{ self, Partition, Permutation },
};

#[test]
fn row_orthogonality() {
    for rank in 2..=MAX_DISTRIBUTED_RANK {
        let table = CharacterTable::for_rank(rank).unwrap();
        table.check_orthogonality().unwrap();
        let order = group::factorial(rank).unwrap() as i128;
        for i in 0..table.irreps().len() {
            for j in 0..table.irreps().len() {
                let expected = if i == j { order } else { 0 };
                assert_eq!(table.inner_product(i, j), expected, "rank {rank}");
            }
        }
    }
}

#[test]
fn column_orthogonality() {
    for rank in 2..=MAX_DISTRIBUTED_RANK {
        let table = CharacterTable::for_rank(rank).unwrap();
        let values = table.values();
        let order = group::factorial(rank).unwrap() as i128;
        for (c, size) in table.class_sizes().iter().enumerate() {
            for d in 0..table.classes().len() {
                let sum: i128
                    = values.column(c).iter().zip(values.column(d).iter())
                    .map(|(a, b)| *a as i128 * *b as i128)
                    .sum();
                let expected = if c == d { order / *size as i128 } else { 0 };
                assert_eq!(sum, expected, "rank {rank}, classes {c}, {d}");
            }
        }
    }
}

#[test]
fn dimensions_square_sum_to_order() {
    for rank in 2..=MAX_DISTRIBUTED_RANK {
        let table = CharacterTable::for_rank(rank).unwrap();
        let total: i64
            = table.irreps().iter()
            .map(|irrep| table.dimension(irrep).unwrap().pow(2))
            .sum();
        assert_eq!(total as u64, table.order());
    }
}

#[test]
fn class_sizes_match_cycle_types() {
    for rank in 2..=MAX_DISTRIBUTED_RANK {
        let table = CharacterTable::for_rank(rank).unwrap();
        for (class, size) in table.classes().iter().zip(table.class_sizes()) {
            assert_eq!(class.class_size().unwrap(), *size, "rank {rank}, class {class}");
        }
    }
}

#[test]
fn enumerated_classes_are_complete() {
    for rank in 2..=MAX_DISTRIBUTED_RANK {
        let table = CharacterTable::for_rank(rank).unwrap();
        let classes = table.conjugacy_classes().unwrap();
        assert_eq!(classes.len(), table.classes().len());
        let total: usize
            = classes.iter()
            .map(|class| {
                assert!(
                    class.permutations().iter()
                        .all(|p| &p.cycle_type() == class.partition())
                );
                class.permutations().len()
            })
            .sum();
        assert_eq!(total as u64, table.order());
    }
}

#[test]
fn trivial_and_sign_characters() {
    for rank in 2..=MAX_DISTRIBUTED_RANK {
        let table = CharacterTable::for_rank(rank).unwrap();
        let trivial = Partition::new([rank]).unwrap();
        let sign_irrep = Partition::identity(rank);
        for class in table.classes() {
            assert_eq!(table.value(&trivial, class), Some(1));
            assert_eq!(table.value(&sign_irrep, class), Some(sign(class)));
        }
    }
}

fn conjugate(irrep: &Partition) -> Partition {
    let parts = irrep.parts();
    let columns: Vec<usize>
        = (0..parts[0])
        .map(|j| parts.iter().filter(|p| **p > j).count())
        .collect();
    Partition::new(columns).unwrap()
}

fn hook_length_dimension(irrep: &Partition) -> u64 {
    let parts = irrep.parts();
    let columns = conjugate(irrep);
    let hooks: u64
        = parts.iter().enumerate()
        .flat_map(|(i, row)| {
            let columns = &columns;
            (0..*row).map(move |j| (row - j + columns.parts()[j] - i - 1) as u64)
        })
        .product();
    group::factorial(irrep.total()).unwrap() / hooks
}

fn sign(class: &Partition) -> i64 {
    if class.parts().iter().map(|p| p - 1).sum::<usize>() % 2 == 0 { 1 } else { -1 }
}

#[test]
fn dimensions_follow_hook_lengths() {
    for rank in 2..=MAX_DISTRIBUTED_RANK {
        let table = CharacterTable::for_rank(rank).unwrap();
        for irrep in table.irreps() {
            assert_eq!(
                table.dimension(irrep).unwrap() as u64,
                hook_length_dimension(irrep),
                "rank {rank}, irrep {irrep}",
            );
        }
    }
}

#[test]
fn conjugate_labels_twist_by_sign() {
    for rank in 2..=MAX_DISTRIBUTED_RANK {
        let table = CharacterTable::for_rank(rank).unwrap();
        for irrep in table.irreps() {
            let twisted = conjugate(irrep);
            for class in table.classes() {
                assert_eq!(
                    table.value(&twisted, class),
                    table.value(irrep, class).map(|x| sign(class) * x),
                    "rank {rank}, irrep {irrep}, class {class}",
                );
            }
        }
    }
}

#[test]
fn s3_table_by_cycle_notation() {
    let table = CharacterTable::for_rank(3).unwrap();
    let standard: Partition = "2+1".parse().unwrap();
    let transposition = Partition::from_cycle_notation("(1 2)", 3).unwrap();
    let three_cycle = Partition::from_cycle_notation("(1 2 3)", 3).unwrap();
    assert_eq!(table.value(&standard, &table.identity_class()), Some(2));
    assert_eq!(table.value(&standard, &transposition), Some(0));
    assert_eq!(table.value(&standard, &three_cycle), Some(-1));
    assert_eq!(table.class_size(&three_cycle), Some(2));
    let p = Permutation::new(vec![2, 3, 1]).unwrap();
    assert_eq!(p.cycle_type(), three_cycle);
}

#[test]
fn externally_supplied_table() {
    let reference = CharacterTable::for_rank(4).unwrap();
    let rebuilt
        = CharacterTable::from_parts(
            4,
            reference.irreps().to_vec(),
            reference.classes().to_vec(),
            reference.class_sizes().to_vec(),
            reference.values().to_owned(),
        )
        .unwrap();
    assert_eq!(rebuilt, reference);

    let mut corrupted = reference.values().to_owned();
    corrupted[[1, 1]] += 1;
    assert!(
        CharacterTable::from_parts(
            4,
            reference.irreps().to_vec(),
            reference.classes().to_vec(),
            reference.class_sizes().to_vec(),
            corrupted,
        )
        .is_err()
    );
}
