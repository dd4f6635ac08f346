#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod asset;
pub mod config;
pub mod filter;
pub mod graph;
pub mod imports;
pub mod models;
pub mod probe;

pub use asset::{AssetFactory, FileAsset, FileAssetFactory};
pub use config::{ConfigError, ResolverConfig};
pub use filter::{FilterId, LoadPaths, SasscFilter};
pub use graph::collect_dependency_graph;
pub use imports::{ImportExtractor, ResolveContext, SearchPath};
pub use models::{DependencyEdge, DependencyGraph, ResolvedDependency};
pub use probe::{DiskProbe, FileProbe};
