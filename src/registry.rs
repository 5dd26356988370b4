//! Registry of API endpoints.
//!
//! Each endpoint is described by an [`EndpointDef`]: its name, path template
//! and payload shape. The process-wide [`registry`] holds every endpoint of
//! the crate in declaration order and lets clients call them by name.

use crate::endpoints::CATALOG;
use crate::options::CallOptions;
use crate::resource::Resource;
use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Static description of one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDef {
    /// Function name, e.g. `get_player_profile`.
    pub name: &'static str,
    /// Path template, e.g. `/player/{username}`.
    pub template: &'static str,
    /// Names of the path parameters, in template order.
    pub params: &'static [&'static str],
    /// Field the payload is nested under, if any.
    pub top_level_attribute: Option<&'static str>,
    /// The endpoint returns plain text.
    pub no_json: bool,
}

impl EndpointDef {
    /// Builds a resource from string path arguments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigurationError`] if the number of arguments does
    /// not match the template.
    pub fn build(&self, args: &[&str], options: CallOptions) -> Result<Resource> {
        if args.len() != self.params.len() {
            return Err(Error::ConfigurationError(format!(
                "{} expects {} argument(s) ({}), got {}",
                self.name,
                self.params.len(),
                self.params.join(", "),
                args.len()
            )));
        }

        Ok(self.resource(args, options))
    }

    pub(crate) fn resource<S: AsRef<str>>(&self, args: &[S], options: CallOptions) -> Resource {
        let mut resource = Resource::new(render(self.template, args))
            .with_no_json(self.no_json)
            .with_call_options(options);
        if let Some(attribute) = self.top_level_attribute {
            resource = resource.with_top_level_attribute(attribute);
        }
        resource
    }
}

/// Fills the `{...}` placeholders of `template` with `args`, in order.
fn render<S: AsRef<str>>(template: &str, args: &[S]) -> String {
    let mut uri = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        uri.push_str(&rest[..start]);
        let end = rest[start..].find('}').map_or(rest.len(), |i| start + i + 1);
        if let Some(arg) = args.next() {
            uri.push_str(arg.as_ref());
        }
        rest = &rest[end..];
    }

    uri.push_str(rest);
    uri
}

/// An ordered set of endpoints, unique by name.
#[derive(Debug, Default)]
pub struct Registry {
    endpoints: Vec<&'static EndpointDef>,
    by_name: HashMap<&'static str, usize>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an endpoint. Returns `false`, leaving the registry unchanged,
    /// if an endpoint with the same name is already registered.
    pub fn register(&mut self, endpoint: &'static EndpointDef) -> bool {
        if self.by_name.contains_key(endpoint.name) {
            tracing::debug!(endpoint = endpoint.name, "Endpoint already registered");
            return false;
        }

        self.by_name.insert(endpoint.name, self.endpoints.len());
        self.endpoints.push(endpoint);
        true
    }

    /// Looks up an endpoint by name.
    pub fn get(&self, name: &str) -> Option<&'static EndpointDef> {
        self.by_name.get(name).map(|&index| self.endpoints[index])
    }

    /// Endpoints in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &'static EndpointDef> + '_ {
        self.endpoints.iter().copied()
    }

    /// Endpoint names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.iter().map(|endpoint| endpoint.name)
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Builds a resource for the named endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownEndpoint`] for an unregistered name, or the
    /// errors of [`EndpointDef::build`].
    pub fn build(&self, name: &str, args: &[&str], options: CallOptions) -> Result<Resource> {
        self.get(name)
            .ok_or_else(|| Error::UnknownEndpoint(name.to_string()))?
            .build(args, options)
    }
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// The process-wide registry of every Chess.com endpoint.
pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(|| {
        let mut registry = Registry::new();
        for endpoint in CATALOG {
            registry.register(endpoint);
        }
        tracing::debug!(endpoints = registry.len(), "Endpoint registry initialized");
        registry
    })
}
