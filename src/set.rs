//! Set arithmetic on sequences of lines. Order comes from the left operand; the
//! right operand is only ever asked "do you contain this line?"
use fxhash::FxBuildHasher;
use indexmap::IndexSet;

use crate::{Line, Lines};

/// A `LineSet` is a set of slices borrowed from a sequence of lines, in the
/// order each line was first seen.
pub type LineSet<'data> = IndexSet<&'data [u8], FxBuildHasher>;

/// Returns the set of distinct lines in `lines`
#[must_use]
pub fn line_set(lines: &[Line]) -> LineSet<'_> {
    let mut set = LineSet::default();
    for line in lines {
        set.insert(line.as_slice());
    }
    set
}

/// Returns the lines of `a` that don't occur anywhere in `b`, in `a`'s order.
/// A line that occurs several times in `a` (and not in `b`) occurs that many
/// times in the result.
#[must_use]
pub fn difference(a: &[Line], b: &[Line]) -> Lines {
    let skip = line_set(b);
    a.iter().filter(|line| !skip.contains(line.as_slice())).cloned().collect()
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;

    fn lines(items: &[&str]) -> Lines {
        items.iter().map(|s| Line::from(*s)).collect()
    }

    #[test]
    fn line_set_keeps_first_occurrence_order() {
        let input = lines(&["xxx", "abc", "xxx", "yyy", "abc"]);
        let set = line_set(&input);
        let got: Vec<&[u8]> = set.iter().copied().collect();
        assert_eq!(got, [&b"xxx"[..], &b"abc"[..], &b"yyy"[..]]);
    }

    #[test]
    fn difference_removes_everything_in_the_right_operand() {
        let a = lines(&["x", "y", "z"]);
        let b = lines(&["y"]);
        assert_eq!(difference(&a, &b), lines(&["x", "z"]));
    }

    #[test]
    fn difference_is_not_symmetric() {
        let a = lines(&["hello", "world"]);
        let b = lines(&["hello"]);
        assert_eq!(difference(&a, &b), lines(&["world"]));
        assert!(difference(&b, &a).is_empty());
    }

    #[test]
    fn difference_keeps_duplicates_from_the_left() {
        let a = lines(&["a", "b", "a", "c", "a"]);
        let b = lines(&["c", "c"]);
        assert_eq!(difference(&a, &b), lines(&["a", "b", "a", "a"]));
    }

    #[test]
    fn comparison_is_exact() {
        let a = lines(&["a", "a ", "A"]);
        let b = lines(&["a"]);
        assert_eq!(difference(&a, &b), lines(&["a ", "A"]));
    }

    #[test]
    fn difference_with_empty_operands() {
        let a = lines(&["p", "q"]);
        assert_eq!(difference(&a, &[]), a);
        assert!(difference(&[], &a).is_empty());
    }

    // For every pair of short sequences over a small alphabet, the difference
    // has nothing from `b` and is exactly `a` with `b`'s lines filtered out.
    #[test]
    fn difference_properties_hold_for_small_inputs() {
        let alphabet = ["a", "b", "c"];
        let sequences: Vec<Lines> = (0..=3)
            .flat_map(|len| {
                std::iter::repeat(alphabet.iter()).take(len).multi_cartesian_product()
            })
            .map(|picked| picked.into_iter().map(|s| Line::from(*s)).collect())
            .chain(std::iter::once(Lines::new()))
            .collect();
        for (a, b) in sequences.iter().cartesian_product(sequences.iter()) {
            let diff = difference(a, b);
            assert!(diff.iter().all(|line| !b.contains(line)), "{a:?} - {b:?}");
            let expected: Lines = a.iter().filter(|line| !b.contains(line)).cloned().collect();
            assert_eq!(diff, expected, "{a:?} - {b:?}");
        }
    }
}
