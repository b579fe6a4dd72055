//! Resource builder
//!
//! Turns a parsed notebook plus deploy options into a `MarimoNotebook`
//! resource and the list of mounts that must be copied after apply.

use crate::domain::entities::{
    AuthSpec, EnvValue, EnvVar, Frontmatter, MarimoNotebook, MarimoNotebookSpec, NotebookDocument,
    StorageSpec,
};
use crate::domain::value_objects::{MountResolver, NotebookMode};

use super::mount_partitioner::{mount_batch, LocalMount};

/// PVC size used when neither metadata nor configuration set one.
pub const DEFAULT_STORAGE: &str = "1Gi";

/// Output of [`ResourceBuilder::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltResource {
    pub resource: MarimoNotebook,
    pub local_mounts: Vec<LocalMount>,
}

/// Builds `MarimoNotebook` resources.
#[derive(Debug, Clone)]
pub struct ResourceBuilder {
    resolver: MountResolver,
    default_storage: String,
    default_image: Option<String>,
}

impl ResourceBuilder {
    pub fn new(resolver: MountResolver) -> Self {
        Self {
            resolver,
            default_storage: DEFAULT_STORAGE.to_string(),
            default_image: None,
        }
    }

    pub fn with_default_storage(mut self, size: impl Into<String>) -> Self {
        self.default_storage = size.into();
        self
    }

    pub fn with_default_image(mut self, image: Option<String>) -> Self {
        self.default_image = image;
        self
    }

    /// Build the resource for `notebook`.
    ///
    /// `source` is the primary mount descriptor from the command line; it is
    /// placed ahead of mounts declared in metadata.
    pub fn build(
        &self,
        notebook: &NotebookDocument,
        namespace: &str,
        mode: NotebookMode,
        source: Option<&str>,
    ) -> BuiltResource {
        let frontmatter = notebook.frontmatter();
        let declared = frontmatter.map(|fm| fm.mounts.as_slice()).unwrap_or(&[]);
        let plan = self.resolver.partition(&mount_batch(source, declared));

        let spec = MarimoNotebookSpec {
            mode,
            content: notebook
                .content()
                .filter(|content| !content.is_empty())
                .map(str::to_string),
            storage: StorageSpec {
                size: frontmatter
                    .and_then(|fm| fm.storage.clone())
                    .unwrap_or_else(|| self.default_storage.clone()),
            },
            image: frontmatter
                .and_then(|fm| fm.image.clone())
                .or_else(|| self.default_image.clone()),
            port: frontmatter.and_then(|fm| fm.port),
            auth: frontmatter
                .filter(|fm| fm.auth_disabled())
                .map(|_| AuthSpec {}),
            env: frontmatter.map(env_vars).unwrap_or_default(),
            mounts: plan.remote,
        };

        BuiltResource {
            resource: MarimoNotebook::new(notebook.name(), namespace, spec),
            local_mounts: plan.local,
        }
    }
}

/// Convert metadata env entries to container env vars.
///
/// Secret references without a key use the lower-cased variable name.
pub fn env_vars(frontmatter: &Frontmatter) -> Vec<EnvVar> {
    frontmatter
        .env
        .iter()
        .map(|(name, value)| match value {
            EnvValue::Inline(v) => EnvVar::inline(name, v),
            EnvValue::Secret { secret, key } => EnvVar::from_secret(
                name,
                secret,
                key.clone().unwrap_or_else(|| name.to_lowercase()),
            ),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ContentType;
    use std::collections::BTreeMap;

    fn builder() -> ResourceBuilder {
        ResourceBuilder::new(MountResolver::default())
    }

    fn notebook(frontmatter: Option<Frontmatter>) -> NotebookDocument {
        NotebookDocument::file(
            "test-notebook.py",
            "# test content".to_string(),
            ContentType::Python,
            frontmatter,
        )
    }

    fn with_mounts(mounts: &[&str]) -> Frontmatter {
        Frontmatter {
            mounts: mounts.iter().map(|m| m.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn basic_resource() {
        let built = builder().build(&notebook(None), "default", NotebookMode::Edit, None);
        let resource = &built.resource;
        assert_eq!(resource.api_version, "marimo.io/v1alpha1");
        assert_eq!(resource.kind, "MarimoNotebook");
        assert_eq!(resource.name(), "test-notebook");
        assert_eq!(resource.namespace(), "default");
        assert_eq!(resource.spec.content.as_deref(), Some("# test content"));
        assert_eq!(resource.spec.mode, NotebookMode::Edit);
        assert_eq!(resource.spec.storage.size, "1Gi");
        assert!(built.local_mounts.is_empty());
    }

    #[test]
    fn frontmatter_settings() {
        let fm = Frontmatter {
            image: Some("custom:latest".to_string()),
            port: Some(8080),
            storage: Some("5Gi".to_string()),
            auth: Some("none".to_string()),
            ..Default::default()
        };
        let built = builder().build(&notebook(Some(fm)), "default", NotebookMode::Run, None);
        let spec = &built.resource.spec;
        assert_eq!(spec.image.as_deref(), Some("custom:latest"));
        assert_eq!(spec.port, Some(8080));
        assert_eq!(spec.storage.size, "5Gi");
        assert_eq!(spec.auth, Some(AuthSpec {}));
        assert_eq!(spec.mode, NotebookMode::Run);
    }

    #[test]
    fn configured_defaults_apply_when_metadata_is_silent() {
        let builder = builder()
            .with_default_storage("2Gi")
            .with_default_image(Some("ghcr.io/marimo-team/marimo:latest".to_string()));
        let spec = builder
            .build(&notebook(None), "default", NotebookMode::Edit, None)
            .resource
            .spec;
        assert_eq!(spec.storage.size, "2Gi");
        assert_eq!(spec.image.as_deref(), Some("ghcr.io/marimo-team/marimo:latest"));
    }

    #[test]
    fn source_adds_mount() {
        let built = builder().build(
            &notebook(None),
            "default",
            NotebookMode::Edit,
            Some("cw://bucket/data"),
        );
        assert_eq!(built.resource.spec.mounts, vec!["cw://bucket/data"]);
    }

    #[test]
    fn source_precedes_frontmatter_mounts() {
        let fm = with_mounts(&["cw://bucket1"]);
        let built = builder().build(
            &notebook(Some(fm)),
            "default",
            NotebookMode::Edit,
            Some("sshfs://user@host:/path"),
        );
        assert_eq!(
            built.resource.spec.mounts,
            vec!["sshfs://user@host:/path", "cw://bucket1"]
        );
    }

    #[test]
    fn local_mount_is_kept_out_of_resource() {
        let built = builder().build(
            &notebook(None),
            "default",
            NotebookMode::Edit,
            Some("rsync:///local/data:/mnt/data"),
        );
        assert!(built.resource.spec.mounts.is_empty());
        assert_eq!(
            built.local_mounts,
            vec![LocalMount::new("/local/data", "/mnt/data", "rsync")]
        );
        let yaml = built.resource.to_yaml().unwrap();
        assert!(!yaml.contains("mounts"));
    }

    #[test]
    fn mixed_local_and_remote_mounts() {
        let fm = with_mounts(&["rsync:///local/path", "rsync://user@host:/remote"]);
        let built = builder().build(&notebook(Some(fm)), "default", NotebookMode::Edit, None);
        assert_eq!(built.resource.spec.mounts, vec!["rsync://user@host:/remote"]);
        assert_eq!(
            built.local_mounts,
            vec![LocalMount::new(
                "/local/path",
                "/home/marimo/notebooks/mounts/local-0",
                "rsync"
            )]
        );
    }

    #[test]
    fn directory_has_no_content() {
        let doc = NotebookDocument::directory(".", "project");
        let built = builder().build(&doc, "default", NotebookMode::Edit, None);
        assert_eq!(built.resource.spec.content, None);
        assert_eq!(built.resource.spec.storage.size, "1Gi");

        let yaml = built.resource.to_yaml().unwrap();
        assert!(!yaml.contains("content"));
    }

    #[test]
    fn empty_file_has_no_content() {
        let doc = NotebookDocument::file("empty.py", String::new(), ContentType::Python, None);
        let built = builder().build(&doc, "default", NotebookMode::Edit, None);
        assert_eq!(built.resource.spec.content, None);
    }

    #[test]
    fn env_inline_and_secret() {
        let mut env = BTreeMap::new();
        env.insert("DEBUG".to_string(), EnvValue::Inline("true".to_string()));
        env.insert(
            "API_KEY".to_string(),
            EnvValue::Secret {
                secret: "my-secret".to_string(),
                key: None,
            },
        );
        let fm = Frontmatter {
            env,
            ..Default::default()
        };
        let vars = env_vars(&fm);
        assert_eq!(vars.len(), 2);
        let debug = vars.iter().find(|v| v.name == "DEBUG").unwrap();
        assert_eq!(debug.value.as_deref(), Some("true"));
        let api = vars.iter().find(|v| v.name == "API_KEY").unwrap();
        let selector = &api.value_from.as_ref().unwrap().secret_key_ref;
        assert_eq!(selector.name, "my-secret");
        assert_eq!(selector.key, "api_key");
    }
}
