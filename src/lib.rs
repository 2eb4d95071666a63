//! OpenAPI generation from JSON:API resource descriptors.
//!
//! This library recovers an API model from a directory of `*_resource.rb`
//! files and a `config/routes.rb` routing file, then builds an OpenAPI 3.0
//! document from it. Nothing is parsed with a grammar: each declaration idiom
//! is recognised line by line, and every collection is bounded, silently
//! dropping entries past its capacity.
//!
//! # Architecture
//!
//! 1. [`text`] - Trimming and quoted-string extraction
//! 2. [`bounded`] - Capacity-checked lists
//! 3. [`model`] - Resources, routes, filters and relations
//! 4. [`extractor`] - Declaration-line parsers, resource and routes parsers
//! 5. [`scanner`] - Finds and parses resource descriptors in a directory
//! 6. [`schema_generator`] - Component schemas for resources
//! 7. [`openapi_builder`] - Paths, operations and the final document
//! 8. [`serializer`] - JSON/YAML output
//!
//! # Example Usage
//!
//! ```no_run
//! use openapi_from_resources::{
//!     extractor::routes::RoutesParser,
//!     model::ApiModel,
//!     openapi_builder::OpenApiBuilder,
//!     scanner::ResourceScanner,
//!     serializer::serialize_json,
//! };
//! use std::path::{Path, PathBuf};
//!
//! let mut model = ApiModel::new();
//! model.resources = ResourceScanner::new(PathBuf::from("app/resources")).scan().resources;
//! RoutesParser::parse_file(Path::new("config/routes.rb"), &mut model.routes).unwrap();
//!
//! let document = OpenApiBuilder::new().synthesize(&model);
//! println!("{}", serialize_json(&document).unwrap());
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module.

pub mod bounded;
pub mod cli;
pub mod error;
pub mod extractor;
pub mod model;
pub mod openapi_builder;
pub mod scanner;
pub mod schema_generator;
pub mod serializer;
pub mod text;
