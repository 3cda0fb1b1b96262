//! Retarget a [Document] to one environment
use crate::definition::{Definition, Resolution};
use crate::document::Document;
use crate::key_path::KeyPath;
use crate::url::{looks_like_url, UrlValue};
use crate::value::Value;
use crate::visit::{VisitLeavesMut, VisitMut};

/// What to do when a catalog field has no binding for the target environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EnvironmentPolicy {
    /// refuse to generate
    #[default]
    Strict,
    /// urls of such fields keep their scheme and host
    Lenient,
}

#[derive(Debug)]
pub struct Generator<'d> {
    definition: &'d Definition,
    environment: String,
}

impl<'d> Generator<'d> {
    /// Create a generator for `environment`, every field of the catalog must know it
    pub fn new(
        definition: &'d Definition,
        environment: impl Into<String>,
    ) -> Result<Self, GenerateError> {
        Self::with_policy(definition, environment, EnvironmentPolicy::Strict)
    }

    pub fn with_policy(
        definition: &'d Definition,
        environment: impl Into<String>,
        policy: EnvironmentPolicy,
    ) -> Result<Self, GenerateError> {
        let environment = environment.into();

        if policy == EnvironmentPolicy::Strict {
            check_environment(definition, &environment)?;
        }

        Ok(Self {
            definition,
            environment,
        })
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Rewrite urls, then apply overrides
    #[tracing::instrument(level = "debug", skip_all, fields(environment = %self.environment))]
    pub fn generate(&self, document: &mut Document) {
        self.rewrite_urls(document);
        self.apply_overrides(document);
    }

    /// Point every url-like string at the target environment, keeping its path
    pub fn rewrite_urls(&self, document: &mut Document) {
        document.visit_leaves_mut(&mut UrlRewriter::new(self));
    }

    /// Force the values of all overridden key paths
    pub fn apply_overrides(&self, document: &mut Document) {
        document.visit_leaves_mut(&mut OverrideApplier::new(self));
    }

    /// `raw` with scheme and host of the environment's url, or `None` if `raw` is not a url
    pub fn rewrite_string(&self, raw: &str) -> Option<String> {
        if raw.is_empty() || !looks_like_url(raw) {
            return None;
        }

        let current = UrlValue::parse(raw);
        let origin = match self.definition.fields.resolve(raw, &self.environment) {
            Resolution::Bound { field, url } => {
                tracing::trace!(field = %field.name, %url, "url matched");
                url
            }
            Resolution::Unbound { field } => {
                tracing::trace!(field = %field.name, "field has no binding, keeping host");
                current.clone()
            }
            Resolution::Unmatched => {
                tracing::trace!(url = raw, "no field matched, keeping host");
                current.clone()
            }
        };

        Some(current.rebase(&origin))
    }
}

/// Every field of the catalog has a binding for `environment`
pub fn check_environment(definition: &Definition, environment: &str) -> Result<(), GenerateError> {
    match definition
        .fields
        .iter()
        .find(|field| !field.has_environment(environment))
    {
        Some(field) => Err(GenerateError::UnknownEnvironment {
            field: field.name.clone(),
            environment: environment.to_string(),
        }),
        None => Ok(()),
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum GenerateError {
    #[error("environment `{environment}` is not defined for field `{field}`")]
    UnknownEnvironment { field: String, environment: String },
}

#[derive(derive_new::new)]
struct UrlRewriter<'g> {
    generator: &'g Generator<'g>,
}

impl<'g> VisitMut<Value> for UrlRewriter<'g> {
    fn visit_mut(&mut self, path: &KeyPath, value: &mut Value) {
        match value {
            Value::String(raw) => {
                if let Some(rewritten) = self.generator.rewrite_string(raw) {
                    if rewritten != *raw {
                        tracing::debug!(%path, from = %raw, to = %rewritten, "url rewritten");
                    }
                    *raw = rewritten;
                }
            }
            // lists are never looked into
            Value::List(_) | Value::Integer(_) | Value::Boolean(_) => {}
            // nested documents are walked by the visitor
            Value::Document(_) => {}
        }
    }
}

#[derive(derive_new::new)]
struct OverrideApplier<'g> {
    generator: &'g Generator<'g>,
}

impl<'g> VisitMut<Value> for OverrideApplier<'g> {
    fn visit_mut(&mut self, path: &KeyPath, value: &mut Value) {
        let Some(forced) = self
            .generator
            .definition
            .overrides
            .lookup(path, &self.generator.environment)
        else {
            return;
        };

        tracing::debug!(%path, from = value.kind(), to = forced.kind(), "override applied");
        *value = forced.clone();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::document;
    use pretty_assertions::assert_eq;

    fn definition() -> Definition {
        Definition::parse(
            r#"
fields:
  - name: api
    environments:
      prod: https://api.example.com
      staging: http://api-staging.example.com
  - name: auth
    environments:
      prod: { scheme: https, host: auth.example.com }
      staging: { scheme: https, host: auth.staging.example.com }
overrides:
  - key: service.endpoint
    environments:
      staging: fixed-value
  - key: service.replicas
    environments:
      staging: 1
  - key: debug
    environments:
      staging: true
"#,
        )
        .unwrap()
    }

    #[test]
    fn rewrites_host_and_keeps_path() {
        let definition = definition();
        let generator = Generator::new(&definition, "staging").unwrap();

        assert_eq!(
            generator.rewrite_string("https://api.example.com/v1/users?page=2").as_deref(),
            Some("http://api-staging.example.com/v1/users?page=2")
        );
        assert_eq!(
            generator.rewrite_string("https://auth.example.com").as_deref(),
            Some("https://auth.staging.example.com")
        );
    }

    #[test]
    fn url_of_other_environment_is_remapped() {
        let definition = definition();
        let generator = Generator::new(&definition, "prod").unwrap();

        assert_eq!(
            generator.rewrite_string("http://api-staging.example.com/health").as_deref(),
            Some("https://api.example.com/health")
        );
    }

    #[test]
    fn unmatched_url_keeps_scheme_and_host() {
        let definition = definition();
        let generator = Generator::new(&definition, "staging").unwrap();

        assert_eq!(
            generator.rewrite_string("https://elsewhere.example/a/b").as_deref(),
            Some("https://elsewhere.example/a/b")
        );
    }

    #[test]
    fn non_urls_are_left_alone() {
        let definition = definition();
        let generator = Generator::new(&definition, "staging").unwrap();

        assert_eq!(generator.rewrite_string(""), None);
        assert_eq!(generator.rewrite_string("hello world"), None);
        assert_eq!(generator.rewrite_string("api.example.com/v1"), None);
    }

    #[test]
    fn unknown_environment_is_fatal() {
        let definition = definition();
        let err = Generator::new(&definition, "dev").unwrap_err();

        assert_eq!(
            err,
            GenerateError::UnknownEnvironment {
                field: "api".to_string(),
                environment: "dev".to_string()
            }
        );
    }

    #[test]
    fn check_ignores_overrides() {
        let definition = Definition::parse("overrides: [{key: a, environments: {prod: 1}}]").unwrap();

        assert_eq!(check_environment(&definition, "staging"), Ok(()));
    }

    #[test]
    fn lenient_policy_keeps_unbound_hosts() {
        let definition = Definition::parse(
            r#"
fields:
  - name: api
    environments:
      prod: https://api.example.com
"#,
        )
        .unwrap();

        assert!(Generator::new(&definition, "staging").is_err());

        let generator =
            Generator::with_policy(&definition, "staging", EnvironmentPolicy::Lenient).unwrap();
        assert_eq!(
            generator.rewrite_string("https://api.example.com/x").as_deref(),
            Some("https://api.example.com/x")
        );
    }

    #[test]
    fn generate() {
        let definition = definition();
        let generator = Generator::new(&definition, "staging").unwrap();

        let mut doc = document!(
            r#"
service:
  endpoint: https://api.example.com/v1
  login: https://auth.example.com/login
  replicas: 3
  hosts: [https://api.example.com]
debug: false
greeting: hello world
"#
        );
        generator.generate(&mut doc);

        assert_eq!(
            doc,
            document!(
                r#"
service:
  endpoint: fixed-value
  login: https://auth.staging.example.com/login
  replicas: 1
  hosts: [https://api.example.com]
debug: true
greeting: hello world
"#
            )
        );
    }

    #[test]
    fn override_replaces_documents_only_at_leaves() {
        let definition = Definition::parse("overrides: [{key: service, environments: {prod: gone}}]").unwrap();
        let generator = Generator::new(&definition, "prod").unwrap();

        let mut doc = document!("service:\n  port: 80");
        generator.apply_overrides(&mut doc);

        assert_eq!(doc, document!("service:\n  port: 80"));
    }

    #[test]
    fn override_may_change_type() {
        let definition = Definition::parse("overrides: [{key: a.b, environments: {prod: {c: [1, 2]}}}]").unwrap();
        let generator = Generator::new(&definition, "prod").unwrap();

        let mut doc = document!("a:\n  b: text");
        generator.apply_overrides(&mut doc);

        assert_eq!(doc, document!("a:\n  b:\n    c: [1, 2]"));
    }

    #[test]
    fn rewrite_is_idempotent() {
        let definition = definition();
        let generator = Generator::new(&definition, "staging").unwrap();

        let mut doc = document!(
            "a: https://api.example.com/x?y=1\nb:\n  c: https://auth.example.com\n  d: http://other.example/p"
        );
        generator.rewrite_urls(&mut doc);
        let once = doc.clone();
        generator.rewrite_urls(&mut doc);

        assert_eq!(doc, once);
    }
}
