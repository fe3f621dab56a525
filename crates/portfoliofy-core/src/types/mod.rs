//! Core type definitions used across the Portfoliofy workspace.

pub mod pagination;

pub use pagination::PageRequest;
