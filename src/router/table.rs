use tracing::debug;

use super::RouteError;
use super::template::{PathParams, PathTemplate};

/// A registered template together with its handler.
struct Route<H> {
    template: PathTemplate,
    handler: H,
}

/// The handler a path resolved to, plus the bound placeholder values.
pub struct RouteMatch<'a, H> {
    pub template: &'a str,
    pub handler: &'a H,
    pub params: PathParams,
}

/// A static table of path templates mapped to handlers.
///
/// Templates are validated on registration and may not overlap, so at most
/// one template matches any path and registration order never matters.
pub struct RouteTable<H> {
    routes: Vec<Route<H>>,
}

impl<H> RouteTable<H> {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Registers `handler` under `template`.
    pub fn route(mut self, template: &str, handler: H) -> Result<Self, RouteError> {
        let template = PathTemplate::parse(template)?;
        if let Some(existing) = self
            .routes
            .iter()
            .find(|route| route.template.overlaps(&template))
        {
            return Err(RouteError::Overlap {
                template: template.as_str().to_string(),
                existing: existing.template.as_str().to_string(),
            });
        }
        debug!("Registered route template {}", template.as_str());
        self.routes.push(Route { template, handler });
        Ok(self)
    }

    /// Finds the template matching `path`, if any.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch<'_, H>> {
        self.routes.iter().find_map(|route| {
            route.template.matches(path).map(|params| RouteMatch {
                template: route.template.as_str(),
                handler: &route.handler,
                params,
            })
        })
    }

    pub fn templates(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|route| route.template.as_str())
    }
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self::new()
    }
}
