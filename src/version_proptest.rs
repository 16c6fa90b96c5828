//! Property-based tests for version ordering and tag extraction.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::rules::Registry;
    use crate::version::{in_range, sort_records, Version, VersionRecord};
    use proptest::prelude::*;

    fn version_strategy() -> impl Strategy<Value = Version> {
        prop::collection::vec(0u64..20, 1..5)
            .prop_map(|components| Version::from_components(&components).unwrap())
    }

    fn tag_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            ".*",
            "v?[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}(-rc[0-9])?",
            "OpenSSL_[0-9]_[0-9]_[0-9][a-z]?(-pre[0-9])?",
            "openssl-[0-9]\\.[0-9]\\.[0-9]{1,2}",
            "(mbedtls-|v|polarssl-)[0-9]\\.[0-9]{1,2}\\.[0-9]{1,2}(p1)?",
        ]
    }

    // ============================================================================
    // Version ordering properties
    // ============================================================================

    proptest! {
        /// Property: ordering matches component-wise comparison with zero padding
        #[test]
        fn ordering_matches_padded_components(a in version_strategy(), b in version_strategy()) {
            let len = a.components().len().max(b.components().len());
            let pad = |v: &Version| {
                let mut c = v.components().to_vec();
                c.resize(len, 0);
                c
            };
            prop_assert_eq!(a.cmp(&b), pad(&a).cmp(&pad(&b)));
        }

        /// Property: display output parses back to an equal version
        #[test]
        fn display_parses_back(v in version_strategy()) {
            let reparsed = Version::parse(&v.to_string()).unwrap();
            prop_assert_eq!(reparsed.components(), v.components());
        }

        /// Property: sorting is idempotent and leaves records ascending
        #[test]
        fn sort_is_idempotent(versions in prop::collection::vec(version_strategy(), 0..20)) {
            let mut records: Vec<_> = versions
                .into_iter()
                .enumerate()
                .map(|(i, v)| VersionRecord::new(format!("t{}", i), v))
                .collect();
            sort_records(&mut records);
            let once = records.clone();
            sort_records(&mut records);
            prop_assert_eq!(&once, &records);
            for pair in records.windows(2) {
                prop_assert!(pair[0].version <= pair[1].version);
            }
        }

        /// Property: equal versions keep their input order
        #[test]
        fn sort_is_stable(versions in prop::collection::vec(version_strategy(), 0..20)) {
            let mut records: Vec<_> = versions
                .into_iter()
                .enumerate()
                .map(|(i, v)| VersionRecord::new(format!("{:03}", i), v))
                .collect();
            sort_records(&mut records);
            for pair in records.windows(2) {
                if pair[0].version == pair[1].version {
                    prop_assert!(pair[0].tag < pair[1].tag);
                }
            }
        }

        /// Property: in_range agrees with direct comparisons for every bound shape
        #[test]
        fn in_range_equivalences(
            v in version_strategy(),
            l in version_strategy(),
            r in version_strategy(),
        ) {
            prop_assert_eq!(in_range(&v, None, Some(&r)), v <= r);
            prop_assert_eq!(in_range(&v, Some(&l), None), v >= l);
            prop_assert_eq!(in_range(&v, Some(&l), Some(&r)), l <= v && v <= r);
        }
    }

    // ============================================================================
    // Extraction properties
    // ============================================================================

    proptest! {
        /// Property: no rule set yields a version that fails to parse
        #[test]
        fn extracted_versions_always_parse(tags in prop::collection::vec(tag_strategy(), 0..30)) {
            let registry = Registry::builtin().unwrap();
            let ids: Vec<String> = registry.ids().map(str::to_string).collect();
            for id in ids {
                let rules = registry.get(&id).unwrap();
                for record in rules.extract(&tags) {
                    prop_assert!(Version::parse(record.version.as_str()).is_ok());
                    prop_assert!(tags.contains(&record.tag));
                }
            }
        }

        /// Property: a rule set never returns two records with the same version string
        #[test]
        fn extracted_versions_unique(tags in prop::collection::vec(tag_strategy(), 0..30)) {
            let registry = Registry::builtin().unwrap();
            let ids: Vec<String> = registry.ids().map(str::to_string).collect();
            for id in ids {
                let records = registry.get(&id).unwrap().extract(&tags);
                let mut seen = std::collections::HashSet::new();
                for record in &records {
                    prop_assert!(seen.insert(record.version.as_str().to_string()));
                }
            }
        }

        /// Property: extraction is a pure function of its input
        #[test]
        fn extraction_is_deterministic(tags in prop::collection::vec(tag_strategy(), 0..30)) {
            let registry = Registry::builtin().unwrap();
            let rules = registry.get("openssl").unwrap();
            prop_assert_eq!(rules.extract(&tags), rules.extract(&tags));
        }
    }
}
