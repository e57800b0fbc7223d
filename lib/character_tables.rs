//! Precomputed character tables of the symmetric groups *S*<sub>2</sub>
//! through *S*<sub>8</sub>.
//!
//! Both rows (irreducible representations) and columns (conjugacy classes) are
//! labeled by partitions of the rank and listed in the same order, with
//! partitions sorted lexicographically in ascending order, so the identity
//! class `1+...+1` always comes first and the trivial representation `n` last.
//!
//! Generated offline; do not edit by hand.

/// Raw, borrowed form of a single character table.
#[derive(Copy, Clone, Debug)]
pub(crate) struct RawTable {
    pub(crate) rank: usize,
    pub(crate) partitions: &'static [&'static [usize]],
    pub(crate) class_sizes: &'static [u64],
    pub(crate) values: &'static [&'static [i64]],
}

/// Largest rank with a distributed table.
pub(crate) const MAX_RANK: usize = 8;

/// Look up the distributed table for `rank`, if there is one.
pub(crate) fn lookup(rank: usize) -> Option<&'static RawTable> {
    TABLES.iter().copied().find(|table| table.rank == rank)
}

static S2: RawTable = RawTable {
    rank: 2,
    partitions: &[
        &[1, 1],
        &[2],
    ],
    class_sizes: &[
        1, 1,
    ],
    values: &[
        &[1, -1],
        &[1, 1],
    ],
};

static S3: RawTable = RawTable {
    rank: 3,
    partitions: &[
        &[1, 1, 1],
        &[2, 1],
        &[3],
    ],
    class_sizes: &[
        1, 3, 2,
    ],
    values: &[
        &[1, -1, 1],
        &[2, 0, -1],
        &[1, 1, 1],
    ],
};

static S4: RawTable = RawTable {
    rank: 4,
    partitions: &[
        &[1, 1, 1, 1],
        &[2, 1, 1],
        &[2, 2],
        &[3, 1],
        &[4],
    ],
    class_sizes: &[
        1, 6, 3, 8, 6,
    ],
    values: &[
        &[1, -1, 1, 1, -1],
        &[3, -1, -1, 0, 1],
        &[2, 0, 2, -1, 0],
        &[3, 1, -1, 0, -1],
        &[1, 1, 1, 1, 1],
    ],
};

static S5: RawTable = RawTable {
    rank: 5,
    partitions: &[
        &[1, 1, 1, 1, 1],
        &[2, 1, 1, 1],
        &[2, 2, 1],
        &[3, 1, 1],
        &[3, 2],
        &[4, 1],
        &[5],
    ],
    class_sizes: &[
        1, 10, 15, 20, 20, 30, 24,
    ],
    values: &[
        &[1, -1, 1, 1, -1, -1, 1],
        &[4, -2, 0, 1, 1, 0, -1],
        &[5, -1, 1, -1, -1, 1, 0],
        &[6, 0, -2, 0, 0, 0, 1],
        &[5, 1, 1, -1, 1, -1, 0],
        &[4, 2, 0, 1, -1, 0, -1],
        &[1, 1, 1, 1, 1, 1, 1],
    ],
};

static S6: RawTable = RawTable {
    rank: 6,
    partitions: &[
        &[1, 1, 1, 1, 1, 1],
        &[2, 1, 1, 1, 1],
        &[2, 2, 1, 1],
        &[2, 2, 2],
        &[3, 1, 1, 1],
        &[3, 2, 1],
        &[3, 3],
        &[4, 1, 1],
        &[4, 2],
        &[5, 1],
        &[6],
    ],
    class_sizes: &[
        1, 15, 45, 15, 40, 120, 40, 90, 90, 144, 120,
    ],
    values: &[
        &[1, -1, 1, -1, 1, -1, 1, -1, 1, 1, -1],
        &[5, -3, 1, 1, 2, 0, -1, -1, -1, 0, 1],
        &[9, -3, 1, -3, 0, 0, 0, 1, 1, -1, 0],
        &[5, -1, 1, 3, -1, -1, 2, 1, -1, 0, 0],
        &[10, -2, -2, 2, 1, 1, 1, 0, 0, 0, -1],
        &[16, 0, 0, 0, -2, 0, -2, 0, 0, 1, 0],
        &[5, 1, 1, -3, -1, 1, 2, -1, -1, 0, 0],
        &[10, 2, -2, -2, 1, -1, 1, 0, 0, 0, 1],
        &[9, 3, 1, 3, 0, 0, 0, -1, 1, -1, 0],
        &[5, 3, 1, -1, 2, 0, -1, 1, -1, 0, -1],
        &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    ],
};

static S7: RawTable = RawTable {
    rank: 7,
    partitions: &[
        &[1, 1, 1, 1, 1, 1, 1],
        &[2, 1, 1, 1, 1, 1],
        &[2, 2, 1, 1, 1],
        &[2, 2, 2, 1],
        &[3, 1, 1, 1, 1],
        &[3, 2, 1, 1],
        &[3, 2, 2],
        &[3, 3, 1],
        &[4, 1, 1, 1],
        &[4, 2, 1],
        &[4, 3],
        &[5, 1, 1],
        &[5, 2],
        &[6, 1],
        &[7],
    ],
    class_sizes: &[
        1, 21, 105, 105, 70, 420, 210, 280, 210, 630, 420, 504, 504, 840, 720,
    ],
    values: &[
        &[1, -1, 1, -1, 1, -1, 1, 1, -1, 1, -1, 1, -1, -1, 1],
        &[6, -4, 2, 0, 3, -1, -1, 0, -2, 0, 1, 1, 1, 0, -1],
        &[14, -6, 2, -2, 2, 0, 2, -1, 0, 0, 0, -1, -1, 1, 0],
        &[14, -4, 2, 0, -1, -1, -1, 2, 2, 0, -1, -1, 1, 0, 0],
        &[15, -5, -1, 3, 3, 1, -1, 0, -1, -1, -1, 0, 0, 0, 1],
        &[35, -5, -1, -1, -1, 1, -1, -1, 1, 1, 1, 0, 0, -1, 0],
        &[21, -1, 1, 3, -3, -1, 1, 0, 1, -1, 1, 1, -1, 0, 0],
        &[21, 1, 1, -3, -3, 1, 1, 0, -1, -1, -1, 1, 1, 0, 0],
        &[20, 0, -4, 0, 2, 0, 2, 2, 0, 0, 0, 0, 0, 0, -1],
        &[35, 5, -1, 1, -1, -1, -1, -1, -1, 1, -1, 0, 0, 1, 0],
        &[14, 4, 2, 0, -1, 1, -1, 2, -2, 0, 1, -1, -1, 0, 0],
        &[15, 5, -1, -3, 3, -1, -1, 0, 1, -1, 1, 0, 0, 0, 1],
        &[14, 6, 2, 2, 2, 0, 2, -1, 0, 0, 0, -1, 1, -1, 0],
        &[6, 4, 2, 0, 3, 1, -1, 0, 2, 0, -1, 1, -1, 0, -1],
        &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    ],
};

static S8: RawTable = RawTable {
    rank: 8,
    partitions: &[
        &[1, 1, 1, 1, 1, 1, 1, 1],
        &[2, 1, 1, 1, 1, 1, 1],
        &[2, 2, 1, 1, 1, 1],
        &[2, 2, 2, 1, 1],
        &[2, 2, 2, 2],
        &[3, 1, 1, 1, 1, 1],
        &[3, 2, 1, 1, 1],
        &[3, 2, 2, 1],
        &[3, 3, 1, 1],
        &[3, 3, 2],
        &[4, 1, 1, 1, 1],
        &[4, 2, 1, 1],
        &[4, 2, 2],
        &[4, 3, 1],
        &[4, 4],
        &[5, 1, 1, 1],
        &[5, 2, 1],
        &[5, 3],
        &[6, 1, 1],
        &[6, 2],
        &[7, 1],
        &[8],
    ],
    class_sizes: &[
        1, 28, 210, 420, 105, 112, 1120, 1680, 1120, 1120, 420, 2520, 1260,
        3360, 1260, 1344, 4032, 2688, 3360, 3360, 5760, 5040,
    ],
    values: &[
        &[
            1, -1, 1, -1, 1, 1, -1, 1, 1, -1, -1, 1, -1, -1, 1, 1, -1, 1, -1,
            1, 1, -1,
        ],
        &[
            7, -5, 3, -1, -1, 4, -2, 0, 1, 1, -3, 1, 1, 0, -1, 2, 0, -1, -1,
            -1, 0, 1,
        ],
        &[
            20, -10, 4, -2, 4, 5, -1, 1, -1, -1, -2, 0, -2, 1, 0, 0, 0, 0, 1,
            1, -1, 0,
        ],
        &[
            28, -10, 4, -2, -4, 1, -1, 1, 1, -1, 2, 0, 2, -1, 0, -2, 0, 1, 1,
            -1, 0, 0,
        ],
        &[
            14, -4, 2, 0, 6, -1, -1, -1, 2, 2, 2, 0, -2, -1, 2, -1, 1, -1, 0,
            0, 0, 0,
        ],
        &[
            21, -9, 1, 3, -3, 6, 0, -2, 0, 0, -3, -1, 1, 0, 1, 1, 1, 1, 0, 0,
            0, -1,
        ],
        &[
            64, -16, 0, 0, 0, 4, 2, 0, -2, 2, 0, 0, 0, 0, 0, -1, -1, -1, 0, 0,
            1, 0,
        ],
        &[
            70, -10, 2, 2, -2, -5, -1, -1, 1, -1, 4, 0, 0, 1, -2, 0, 0, 0, -1,
            1, 0, 0,
        ],
        &[
            56, -4, 0, -4, 8, -4, 2, 0, -1, -1, 0, 0, 0, 0, 0, 1, 1, 1, -1, -1,
            0, 0,
        ],
        &[
            42, 0, 2, 0, -6, -6, 0, 2, 0, 0, 0, -2, 0, 0, 2, 2, 0, -1, 0, 0, 0,
            0,
        ],
        &[
            35, -5, -5, 3, 3, 5, 1, 1, 2, -2, -1, -1, -1, -1, -1, 0, 0, 0, 0,
            0, 0, 1,
        ],
        &[
            90, 0, -6, 0, -6, 0, 0, 0, 0, 0, 0, 2, 0, 0, 2, 0, 0, 0, 0, 0, -1,
            0,
        ],
        &[
            56, 4, 0, 4, 8, -4, -2, 0, -1, 1, 0, 0, 0, 0, 0, 1, -1, 1, 1, -1,
            0, 0,
        ],
        &[
            70, 10, 2, -2, -2, -5, 1, -1, 1, 1, -4, 0, 0, -1, -2, 0, 0, 0, 1,
            1, 0, 0,
        ],
        &[
            14, 4, 2, 0, 6, -1, 1, -1, 2, -2, -2, 0, 2, 1, 2, -1, -1, -1, 0, 0,
            0, 0,
        ],
        &[
            35, 5, -5, -3, 3, 5, -1, 1, 2, 2, 1, -1, 1, 1, -1, 0, 0, 0, 0, 0,
            0, -1,
        ],
        &[
            64, 16, 0, 0, 0, 4, -2, 0, -2, -2, 0, 0, 0, 0, 0, -1, 1, -1, 0, 0,
            1, 0,
        ],
        &[
            28, 10, 4, 2, -4, 1, 1, 1, 1, 1, -2, 0, -2, 1, 0, -2, 0, 1, -1, -1,
            0, 0,
        ],
        &[
            21, 9, 1, -3, -3, 6, 0, -2, 0, 0, 3, -1, -1, 0, 1, 1, -1, 1, 0, 0,
            0, 1,
        ],
        &[
            20, 10, 4, 2, 4, 5, 1, 1, -1, 1, 2, 0, 2, -1, 0, 0, 0, 0, -1, 1,
            -1, 0,
        ],
        &[
            7, 5, 3, 1, -1, 4, 2, 0, 1, -1, 3, 1, -1, 0, -1, 2, 0, -1, 1, -1,
            0, -1,
        ],
        &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    ],
};

static TABLES: [&RawTable; 7] = [&S2, &S3, &S4, &S5, &S6, &S7, &S8];
