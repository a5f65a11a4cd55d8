//! Splat partitioner: given a def's arity shape and an effective argument
//! count, computes the before/at/after index ranges. A pure function over
//! `(n, splat_index, m)`, deliberately ignorant of defaults — the matcher's
//! own arity check already gates `m` before calling this.

use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub before_formal: Range<usize>,
    pub before_actual: Range<usize>,
    pub at_formal: Range<usize>,
    pub at_actual: Range<usize>,
    pub after_formal: Range<usize>,
    pub after_actual: Range<usize>,
}

/// Returns `None` when `m` is structurally impossible for the given shape
/// (fewer actuals than the def's non-splat formals require). The caller is
/// expected to have already range-checked `m` against arity; this is a
/// defensive backstop, not the primary arity diagnostic.
pub fn partition(n: usize, splat_index: Option<usize>, m: usize) -> Option<Partition> {
    match splat_index {
        Some(s) => {
            if s >= n || m + 1 < n {
                return None;
            }
            let at_count = m - (n - 1);
            Some(Partition {
                before_formal: 0..s,
                before_actual: 0..s,
                at_formal: s..s + 1,
                at_actual: s..s + at_count,
                after_formal: s + 1..n,
                after_actual: s + at_count..m,
            })
        }
        None => {
            if m > n {
                return None;
            }
            Some(Partition {
                before_formal: 0..m,
                before_actual: 0..m,
                at_formal: 0..0,
                at_actual: 0..0,
                after_formal: 0..0,
                after_actual: 0..0,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_s7_partitioner_unit() {
        // def foo(a1, a2, a3, a4) with splat_index = 2, 6 actuals.
        let p = partition(4, Some(2), 6).unwrap();

        assert_eq!(p.before_formal, 0..2);
        assert_eq!(p.before_actual, 0..2);
        assert_eq!(p.at_formal, 2..3);
        assert_eq!(p.at_actual, 2..5);
        assert_eq!(p.after_formal, 3..4);
        assert_eq!(p.after_actual, 5..6);
    }

    #[rstest]
    #[case(3, None, 3, true)]
    #[case(3, None, 2, true)]
    #[case(3, None, 4, false)]
    #[case(3, Some(1), 2, true)]
    #[case(3, Some(1), 1, false)]
    fn test_arity_bounds(#[case] n: usize, #[case] splat_index: Option<usize>, #[case] m: usize, #[case] expect_some: bool) {
        assert_eq!(partition(n, splat_index, m).is_some(), expect_some);
    }

    #[test]
    fn test_no_splat_covers_all_formals() {
        let p = partition(3, None, 3).unwrap();
        assert_eq!(p.before_formal, 0..3);
        assert_eq!(p.before_actual, 0..3);
        assert!(p.at_formal.is_empty());
        assert!(p.after_formal.is_empty());
    }

    #[test]
    fn test_splat_with_zero_absorbed() {
        // n=2, splat at index 1, only the one required leading arg given.
        let p = partition(2, Some(1), 1).unwrap();
        assert_eq!(p.before_formal, 0..1);
        assert_eq!(p.at_actual, 1..1);
        assert_eq!(p.after_formal, 2..2);
    }
}
