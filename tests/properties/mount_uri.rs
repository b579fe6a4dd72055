//! Property tests for mount descriptor parsing and partitioning.

use proptest::prelude::*;

use kubectl_marimo::{MountPaths, MountResolver};

/// Path segment without separators, `@` or `:`.
fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9._-]{1,12}").unwrap()
}

fn relative_path() -> impl Strategy<Value = String> {
    proptest::collection::vec(segment(), 1..=3).prop_map(|s| s.join("/"))
}

/// `rsync://<relative path>` with no mount point.
fn local_descriptor() -> impl Strategy<Value = String> {
    relative_path().prop_map(|p| format!("rsync://{}", p))
}

/// `sshfs://user@host:/abs/path`
fn remote_descriptor() -> impl Strategy<Value = String> {
    (segment(), segment(), relative_path())
        .prop_map(|(user, host, path)| format!("sshfs://{}@{}:/{}", user, host, path))
}

#[derive(Debug, Clone)]
enum Entry {
    Local(String),
    Remote(String),
}

fn entry() -> impl Strategy<Value = Entry> {
    prop_oneof![
        local_descriptor().prop_map(Entry::Local),
        remote_descriptor().prop_map(Entry::Remote),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Parsing never panics on arbitrary input.
    #[test]
    fn property_parse_never_panics(s in "(?s).{0,128}") {
        let resolver = MountResolver::default();
        let _ = resolver.parse(&s);
        let _ = resolver.is_local(&s);
    }

    /// PROPERTY: Partitioning never panics and loses nothing.
    #[test]
    fn property_partition_is_total(mounts in proptest::collection::vec("(?s).{0,48}", 0..8)) {
        let plan = MountResolver::default().partition(&mounts);
        prop_assert_eq!(plan.remote.len() + plan.local.len(), mounts.len());
    }

    /// PROPERTY: `rsync://` without `@` is always local.
    #[test]
    fn property_rsync_without_host_is_local(remainder in "[^@]{0,64}") {
        let uri = format!("rsync://{}", remainder);
        prop_assert_eq!(MountResolver::default().is_local(&uri), Ok(true));
    }

    /// PROPERTY: Any `@` in the remainder makes a descriptor non-local.
    #[test]
    fn property_user_host_is_never_local(
        scheme in "(rsync|sshfs|cw|s3)",
        user in segment(),
        host in segment(),
        path in relative_path(),
    ) {
        let uri = format!("{}://{}@{}:/{}", scheme, user, host, path);
        let parsed = MountResolver::default().parse(&uri).unwrap();

        prop_assert!(!parsed.is_local());
        let user_host = format!("{}@{}", user, host);
        prop_assert_eq!(parsed.user_host.as_deref(), Some(user_host.as_str()));
        let expected_source = format!("/{}", path);
        prop_assert_eq!(parsed.source.as_str(), expected_source.as_str());
    }

    /// PROPERTY: Absolute mount points are kept verbatim, relative ones
    /// land under the notebook directory.
    #[test]
    fn property_local_mount_point_resolution(source in relative_path(), target in relative_path()) {
        let resolver = MountResolver::new(MountPaths::under("/work"));

        let absolute = resolver.parse(&format!("rsync://{}:/{}", source, target)).unwrap();
        prop_assert_eq!(absolute.source.as_str(), source.as_str());
        prop_assert_eq!(absolute.mount_point, Some(format!("/{}", target)));

        let relative = resolver.parse(&format!("rsync://{}:{}", source, target)).unwrap();
        prop_assert_eq!(relative.mount_point, Some(format!("/work/{}", target)));
    }

    /// PROPERTY: Partition keeps input order on both sides and numbers
    /// default mount points by position among local entries only.
    #[test]
    fn property_partition_preserves_order(entries in proptest::collection::vec(entry(), 0..10)) {
        let raw: Vec<String> = entries
            .iter()
            .map(|e| match e {
                Entry::Local(s) | Entry::Remote(s) => s.clone(),
            })
            .collect();

        let plan = MountResolver::default().partition(&raw);

        let expected_remote: Vec<String> = entries
            .iter()
            .filter_map(|e| match e {
                Entry::Remote(s) => Some(s.clone()),
                Entry::Local(_) => None,
            })
            .collect();
        let expected_sources: Vec<String> = entries
            .iter()
            .filter_map(|e| match e {
                Entry::Local(s) => Some(s.trim_start_matches("rsync://").to_string()),
                Entry::Remote(_) => None,
            })
            .collect();

        prop_assert_eq!(&plan.remote, &expected_remote);
        prop_assert_eq!(plan.local.len(), expected_sources.len());
        for (i, (mount, source)) in plan.local.iter().zip(&expected_sources).enumerate() {
            prop_assert_eq!(&mount.source, source);
            prop_assert_eq!(
                mount.mount_point.clone(),
                format!("/home/marimo/notebooks/mounts/local-{}", i)
            );
            prop_assert_eq!(mount.scheme.as_str(), "rsync");
        }
    }
}
