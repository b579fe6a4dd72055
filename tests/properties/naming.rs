//! Property tests for resource names and content hashes.

use proptest::prelude::*;

use kubectl_marimo::domain::value_objects::{name, ContentHash};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: slugify always yields a valid DNS label body.
    #[test]
    fn property_slug_is_a_dns_label(s in "(?s).{0,200}") {
        let slug = name::slugify(&s);

        prop_assert!(slug.len() <= name::MAX_NAME_LEN);
        prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        prop_assert!(!slug.starts_with('-'));
        prop_assert!(!slug.ends_with('-'));
        prop_assert!(!slug.contains("--"));
    }

    /// PROPERTY: slugify is idempotent.
    #[test]
    fn property_slug_is_idempotent(s in "(?s).{0,200}") {
        let once = name::slugify(&s);
        prop_assert_eq!(name::slugify(&once), once);
    }

    /// PROPERTY: hashes are deterministic, `sha256:` plus 16 lowercase hex digits.
    #[test]
    fn property_hash_shape(content in "(?s).{0,256}") {
        let hash = ContentHash::from_content(&content);

        prop_assert!(hash.as_str().starts_with("sha256:"));
        prop_assert_eq!(hash.hex().len(), 16);
        prop_assert!(hash.hex().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        prop_assert_eq!(ContentHash::from_content(&content), hash);
    }
}
