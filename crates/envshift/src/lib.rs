//! # envshift - retarget configuration documents
//!
//! `envshift` takes a configuration document written for one deployment environment and rewrites it for another.
//!
//! ## Introduction for developers
//!
//! Read this to understand how `envshift` works internally.
//!
//! ### Terms
//!
//! - a `document` ([document::Document]) is an order-preserving map of string keys to [value::Value]s
//! - a `field` ([definition::Field]) is a logical endpoint, such as "the api", with one url per environment
//! - an `override` ([definition::Override]) forces the value at one dotted key path, per environment
//! - the `target environment` is the one environment a run generates for
//!
//! Fields and overrides are loaded from a definition file ([definition::Definition]):
//!
//! ```yaml
//! fields:
//!   - name: api
//!     environments:
//!       prod: https://api.example.com
//!       staging: { scheme: http, host: api-staging.example.com }
//!
//! overrides:
//!   - key: service.replicas
//!     environments:
//!       prod: 3
//!       staging: 1
//! ```
//!
//! ### Loading
//!
//! Documents are parsed as YAML ([document::parse]). Each value is converted into the closed set of
//! [value::Value] types. Anything else (floats, `null`, tagged values, non-string keys) is rejected here with a
//! [value::ValueError], so later stages never see a value they can not handle.
//!
//! ### Pre-flight
//!
//! see [generator::Generator::new]
//!
//! Every field must have a binding for the target environment. A missing binding aborts before any document is
//! touched. [generator::EnvironmentPolicy::Lenient] turns this check off.
//!
//! ### Generation
//!
//! [generator::Generator::generate] walks the document twice. Only nested documents are
//! walked into, lists are leaves and stay untouched.
//!
//! 1. url rewrite: a string containing `http://` or `https://` is looked up in the catalog
//!    ([definition::EnvironmentCatalog::resolve]). A field matches when the string contains the url of any of its
//!    environments. Scheme and host are taken from the target environment's url, the path from the string itself
//!    ([url::UrlValue::rebase]).
//! 2. overrides: every leaf whose dotted path has an override for the target environment is replaced with that
//!    value.
//!
//! **Example** (target environment `staging`)
//!
//! | **path**           | **input**                        | **output**                                      |
//! |--------------------|----------------------------------|-------------------------------------------------|
//! | `api.url`          | `https://api.example.com/v1?x=1` | `http://api-staging.example.com/v1?x=1`         |
//! | `api.mirrors`      | `[https://api.example.com]`      | `[https://api.example.com]`                     |
//! | `service.replicas` | `3`                              | `1`                                             |
//!
//! The override pass runs last, so an override wins over a rewritten url.
//!
//! ### Output
//!
//! [value::Value] implements [serde::Serialize], the binary writes YAML or JSON.
//!
pub mod definition;
pub mod document;
pub mod generator;
pub mod key_path;
pub mod url;
pub mod value;
mod visit;
