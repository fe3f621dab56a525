//! Section visibility resolution.

pub mod resolver;

pub use resolver::{ResolvedVisibility, VisibilityResolver};
