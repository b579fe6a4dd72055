//! Mount URI value objects
//!
//! A mount descriptor has the shape
//! `<scheme>://[<user>@<host>:]<source>[:<mount_point>]`.
//!
//! Descriptors using the local-capable scheme without a host component are
//! resolved by this tool (copied into the pod after deploy). Everything else
//! is forwarded to the in-cluster controller untouched.
//!
//! Paths never contain colons in this domain, so the last `:` always
//! separates an optional mount point override from the source path.

use thiserror::Error;

/// The only scheme eligible for the local/relative-path form.
pub const LOCAL_SCHEME: &str = "rsync";

/// Working directory of the notebook inside the pod.
pub const DEFAULT_NOTEBOOK_DIR: &str = "/home/marimo/notebooks";

const SCHEME_SEPARATOR: &str = "://";
const HOST_PATH_BOUNDARY: &str = ":/";

/// Mount descriptor errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MountUriError {
    #[error("malformed mount URI '{uri}': {reason}")]
    Malformed { uri: String, reason: &'static str },
}

impl MountUriError {
    fn malformed(uri: &str, reason: &'static str) -> Self {
        Self::Malformed {
            uri: uri.to_string(),
            reason,
        }
    }
}

/// In-pod base directories used when resolving mount points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPaths {
    notebook_dir: String,
    mounts_dir: String,
}

impl MountPaths {
    pub fn new(notebook_dir: impl Into<String>, mounts_dir: impl Into<String>) -> Self {
        Self {
            notebook_dir: notebook_dir.into(),
            mounts_dir: mounts_dir.into(),
        }
    }

    /// Paths with the local mounts directory at `<notebook_dir>/mounts`.
    pub fn under(notebook_dir: impl Into<String>) -> Self {
        let notebook_dir = notebook_dir.into();
        let mounts_dir = join(&notebook_dir, "mounts");
        Self {
            notebook_dir,
            mounts_dir,
        }
    }

    pub fn notebook_dir(&self) -> &str {
        &self.notebook_dir
    }

    pub fn mounts_dir(&self) -> &str {
        &self.mounts_dir
    }

    /// Rewrite a relative mount point under the notebook directory.
    pub fn relative_mount_point(&self, relative: &str) -> String {
        join(&self.notebook_dir, relative)
    }

    /// Default mount point for the `index`-th local mount of a batch.
    pub fn default_local_mount(&self, index: usize) -> String {
        join(&self.mounts_dir, &format!("local-{}", index))
    }
}

impl Default for MountPaths {
    fn default() -> Self {
        Self::under(DEFAULT_NOTEBOOK_DIR)
    }
}

fn join(base: &str, child: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), child)
}

/// Structural parts of a mount descriptor.
///
/// `user_host` is set if and only if the descriptor names a remote endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMount {
    pub scheme: String,
    pub source: String,
    pub user_host: Option<String>,
    pub mount_point: Option<String>,
}

impl ParsedMount {
    pub fn is_local(&self) -> bool {
        self.user_host.is_none()
    }
}

/// Which grammar applies to the text after `scheme://`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DescriptorForm {
    /// `[source][:mount_point]`, relative or absolute source
    Local,
    /// `user@host:/abs/path[:/mount_point]`
    Remote,
}

/// Parses and classifies mount descriptors.
///
/// Pure: no I/O, no shared state. Safe to share across threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountResolver {
    paths: MountPaths,
}

impl MountResolver {
    pub fn new(paths: MountPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &MountPaths {
        &self.paths
    }

    /// Parse a descriptor into its structural parts.
    ///
    /// Relative mount points of the local form are rewritten under the
    /// notebook directory. Fails when the `scheme://` separator is missing,
    /// or when a remote-form descriptor lacks a `:/`-delimited absolute path.
    pub fn parse(&self, uri: &str) -> Result<ParsedMount, MountUriError> {
        let (scheme, remainder) = split_scheme(uri)
            .ok_or_else(|| MountUriError::malformed(uri, "missing '://' separator"))?;

        match descriptor_form(scheme, remainder) {
            DescriptorForm::Local => Ok(self.parse_local_form(scheme, remainder)),
            DescriptorForm::Remote => parse_remote_form(scheme, remainder)
                .ok_or_else(|| MountUriError::malformed(uri, "remote mounts need a ':/' absolute path")),
        }
    }

    /// True when the descriptor is resolved by this tool rather than the cluster.
    pub fn is_local(&self, uri: &str) -> Result<bool, MountUriError> {
        self.parse(uri).map(|parsed| parsed.is_local())
    }

    fn parse_local_form(&self, scheme: &str, remainder: &str) -> ParsedMount {
        let (source, mount_point) = match split_last_colon(remainder) {
            Some((source, candidate)) if !source.is_empty() && !candidate.is_empty() => {
                let mount_point = if candidate.starts_with('/') {
                    candidate.to_string()
                } else {
                    self.paths.relative_mount_point(candidate)
                };
                (source, Some(mount_point))
            }
            _ => (remainder, None),
        };

        ParsedMount {
            scheme: scheme.to_string(),
            source: source.to_string(),
            user_host: None,
            mount_point,
        }
    }
}

fn parse_remote_form(scheme: &str, remainder: &str) -> Option<ParsedMount> {
    let boundary = host_path_boundary(remainder)?;
    let user_host = &remainder[..boundary];
    // Keep the slash: the path part is absolute.
    let path_part = &remainder[boundary + 1..];

    let (source, mount_point) = match split_last_colon(path_part) {
        Some((source, candidate)) if candidate.starts_with('/') => (source, Some(candidate)),
        _ => (path_part, None),
    };

    Some(ParsedMount {
        scheme: scheme.to_string(),
        source: source.to_string(),
        user_host: Some(user_host.to_string()),
        mount_point: mount_point.map(str::to_string),
    })
}

/// Split at the first `://`.
pub(crate) fn split_scheme(uri: &str) -> Option<(&str, &str)> {
    let idx = uri.find(SCHEME_SEPARATOR)?;
    Some((&uri[..idx], &uri[idx + SCHEME_SEPARATOR.len()..]))
}

pub(crate) fn descriptor_form(scheme: &str, remainder: &str) -> DescriptorForm {
    if scheme == LOCAL_SCHEME && !remainder.contains('@') {
        DescriptorForm::Local
    } else {
        DescriptorForm::Remote
    }
}

/// Split at the last `:`.
pub(crate) fn split_last_colon(s: &str) -> Option<(&str, &str)> {
    let idx = s.rfind(':')?;
    Some((&s[..idx], &s[idx + 1..]))
}

/// Byte offset of the colon in the first `:/` sequence.
pub(crate) fn host_path_boundary(remainder: &str) -> Option<usize> {
    remainder.find(HOST_PATH_BOUNDARY)
}
