//! Small standalone helpers.
//!
//! - [`guid`] random v4 UUID text
//! - [`random_int`] uniform integer in a range
//! - [`is_blank`] missing or whitespace-only text
//! - [`is_higher_version`], [`compare_versions`] dotted version comparison
//! - [`JsonCache`] per-URL cache of JSON documents

mod json_cache;

pub use json_cache::{JsonCache, JsonSource};

use std::cmp::Ordering;

use rand::Rng;
use uuid::Uuid;

/// Random RFC 4122 version-4 UUID, lowercase and hyphenated.
pub fn guid() -> String {
    Uuid::new_v4().to_string()
}

/// Uniform integer in `[min, max)`, or `[min, max]` when `max_inclusive`.
///
/// An empty range returns `min`.
pub fn random_int(min: i64, max: i64, max_inclusive: bool) -> i64 {
    let mut rng = rand::rng();
    match (max_inclusive, min.cmp(&max)) {
        (true, Ordering::Less | Ordering::Equal) => rng.random_range(min..=max),
        (false, Ordering::Less) => rng.random_range(min..max),
        _ => min,
    }
}

/// `true` for `None` and for strings that are empty after trimming.
pub fn is_blank(s: Option<&str>) -> bool {
    s.is_none_or(|s| s.trim().is_empty())
}

/// Compares two versions segment by segment.
///
/// Segments are separated by `.`, `-` or `_`; the shorter version is padded with
/// zeros. Each segment is read as its leading digits, `0` if there are none.
pub fn compare_versions(version: &str, other: &str) -> Ordering {
    let a = segments(version);
    let b = segments(other);
    let len = a.len().max(b.len());

    (0..len)
        .map(|i| {
            let x = a.get(i).copied().unwrap_or(0);
            let y = b.get(i).copied().unwrap_or(0);
            x.cmp(&y)
        })
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// `true` if `version` is strictly higher than `compare_to`.
///
/// ```
/// assert!(evoke::is_higher_version("2.1.4", "2.1"));
/// assert!(!evoke::is_higher_version("1.9", "1.10"));
/// ```
pub fn is_higher_version(version: &str, compare_to: &str) -> bool {
    compare_versions(version, compare_to) == Ordering::Greater
}

fn segments(version: &str) -> Vec<u64> {
    version
        .trim()
        .split(['.', '-', '_'])
        .filter(|s| !s.is_empty())
        .map(|s| {
            let digits = s.bytes().take_while(u8::is_ascii_digit).count();
            s[..digits].parse().unwrap_or(0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn guid_is_v4() {
        let g = guid();
        assert_eq!(g.len(), 36);
        assert_eq!(g.as_bytes()[14], b'4');
        assert_eq!(g, g.to_lowercase());
        assert_ne!(g, guid());
    }

    #[test]
    fn random_int_bounds() {
        for _ in 0..200 {
            let r = random_int(1, 11, false);
            assert!((1..11).contains(&r));
            let r = random_int(1, 10, true);
            assert!((1..=10).contains(&r));
        }
        assert_eq!(random_int(5, 5, true), 5);
        assert_eq!(random_int(5, 5, false), 5);
        assert_eq!(random_int(9, 3, false), 9);
    }

    #[test]
    fn blank_text() {
        assert!(is_blank(None));
        assert!(is_blank(Some("")));
        assert!(is_blank(Some(" \t\n")));
        assert!(!is_blank(Some(" x ")));
    }

    #[test]
    fn versions() {
        assert!(is_higher_version("2.1.4", "2.1.3"));
        assert!(is_higher_version("2.1.4", "2.1"));
        assert!(is_higher_version("1.10", "1.9"));
        assert!(is_higher_version("3.1-rc_2", "3.0.1"));
        assert!(!is_higher_version("2.1", "2.1.0"));
        assert!(!is_higher_version("1.2.3", "1.3"));
        assert_eq!(compare_versions("1.x.2", "1.0.2"), Ordering::Equal);
        assert_eq!(compare_versions("v2", "0"), Ordering::Equal);
        assert_eq!(compare_versions("10b", "9"), Ordering::Greater);
    }

    proptest! {
        #[test]
        fn version_order_is_antisymmetric(
            a in proptest::collection::vec(0u32..50, 1..5),
            b in proptest::collection::vec(0u32..50, 1..5),
        ) {
            let va = a.iter().map(u32::to_string).collect::<Vec<_>>().join(".");
            let vb = b.iter().map(u32::to_string).collect::<Vec<_>>().join(".");
            prop_assert_eq!(compare_versions(&va, &vb), compare_versions(&vb, &va).reverse());
            prop_assert!(!(is_higher_version(&va, &vb) && is_higher_version(&vb, &va)));
        }

        #[test]
        fn trailing_zeros_do_not_matter(a in proptest::collection::vec(0u32..50, 1..5), pad in 1usize..4) {
            let v = a.iter().map(u32::to_string).collect::<Vec<_>>().join(".");
            let padded = format!("{v}{}", ".0".repeat(pad));
            prop_assert_eq!(compare_versions(&v, &padded), Ordering::Equal);
        }
    }
}
