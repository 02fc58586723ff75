//! Path-template routing.
//!
//! Templates are literal paths with `{placeholder}` segments. A request path
//! matches a template when it has the same number of segments and every
//! literal segment is equal; placeholder segments bind positionally by name.
//! Method checks are left to the handlers.

mod table;
mod template;

use thiserror::Error;

pub use table::{RouteMatch, RouteTable};
pub use template::{PathParams, PathTemplate};

/// Errors raised while registering path templates.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("template '{0}' must start with '/'")]
    MissingLeadingSlash(String),
    #[error("template '{template}' has a malformed segment '{segment}'")]
    MalformedSegment { template: String, segment: String },
    #[error("template '{template}' repeats placeholder '{name}'")]
    DuplicatePlaceholder { template: String, name: String },
    #[error("template '{template}' overlaps already registered '{existing}'")]
    Overlap { template: String, existing: String },
}
