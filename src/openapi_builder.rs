use crate::model::{ApiModel, ResourceRecord, RouteRecord};
use crate::schema_generator::{Schema, SchemaGenerator};
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

pub const OPENAPI_VERSION: &str = "3.0.0";
pub const DEFAULT_TITLE: &str = "Rails JSON:API Specification";
pub const DEFAULT_VERSION: &str = "1.0.0";
/// Root used for resources that match no declared route.
pub const DEFAULT_PATH_ROOT: &str = "/api/v1";
/// Last path segment for unmatched resources without a model name.
pub const FALLBACK_RESOURCE_SEGMENT: &str = "resource";

/// OpenAPI document builder
pub struct OpenApiBuilder {
    /// OpenAPI info section
    info: Info,
    /// Paths collection (URL path -> PathItem), in resource order
    paths: IndexMap<String, PathItem>,
}

/// OpenAPI Info object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,
    pub version: String,
}

/// OpenAPI PathItem object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    /// List operation, always present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    /// Create operation, present when the resource has creatable fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
}

/// OpenAPI Operation object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub summary: String,
    /// Query parameters, one per filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<Parameter>>,
}

/// OpenAPI Parameter object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    /// Parameter location, always `query` for filters
    #[serde(rename = "in")]
    pub location: String,
    pub required: bool,
    pub schema: Schema,
}

/// OpenAPI Components object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Components {
    pub schemas: IndexMap<String, Schema>,
}

/// Complete OpenAPI document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApiDocument {
    pub openapi: String,
    pub info: Info,
    pub paths: IndexMap<String, PathItem>,
    pub components: Components,
}

impl OpenApiBuilder {
    /// Create a new OpenApiBuilder with default info
    pub fn new() -> Self {
        debug!("Initializing OpenApiBuilder");
        Self {
            info: Info {
                title: DEFAULT_TITLE.to_string(),
                version: DEFAULT_VERSION.to_string(),
            },
            paths: IndexMap::new(),
        }
    }

    /// Set custom info for the API
    pub fn with_info(mut self, title: String, version: String) -> Self {
        self.info = Info { title, version };
        self
    }

    /// Builds a complete document from a scanned model.
    pub fn synthesize(mut self, model: &ApiModel) -> OpenApiDocument {
        let mut schema_gen = SchemaGenerator::new();
        for resource in &model.resources {
            self.add_resource(resource, &model.routes, &mut schema_gen);
        }
        self.build(schema_gen)
    }

    /// Add a resource's path item and schema to the document
    pub fn add_resource(
        &mut self,
        resource: &ResourceRecord,
        routes: &[RouteRecord],
        schema_gen: &mut SchemaGenerator,
    ) {
        let path = match Self::find_route(resource, routes) {
            Some(route) => {
                debug!("Resource {} mounted at {}", resource.class_name, route.path);
                route.path.clone()
            }
            None => {
                let path = Self::default_path(resource);
                debug!("Resource {} matches no route, using {}", resource.class_name, path);
                path
            }
        };

        self.paths.insert(path, Self::path_item(resource));
        schema_gen.add_resource(resource);
    }

    /// First route, in declaration order, whose name relates to the resource.
    ///
    /// A route matches when its name is contained in the class name, the class
    /// name is contained in the route name, or the (non-empty) model name is
    /// contained in the route name. `widgets` therefore matches a resource
    /// with model name `widget`.
    pub fn find_route<'a>(resource: &ResourceRecord, routes: &'a [RouteRecord]) -> Option<&'a RouteRecord> {
        routes.iter().find(|route| {
            let name = route.resource_name.as_str();
            resource.class_name.contains(name)
                || name.contains(resource.class_name.as_str())
                || resource.model_name().is_some_and(|model| name.contains(model))
        })
    }

    /// `/api/v1/<model_name>`, or `/api/v1/resource` without a model name.
    pub fn default_path(resource: &ResourceRecord) -> String {
        let segment = resource.model_name().unwrap_or(FALLBACK_RESOURCE_SEGMENT);
        format!("{}/{}", DEFAULT_PATH_ROOT, segment)
    }

    fn path_item(resource: &ResourceRecord) -> PathItem {
        let parameters = if resource.filters.is_empty() {
            None
        } else {
            Some(
                resource
                    .filters
                    .iter()
                    .map(|filter| Parameter {
                        name: filter.name.clone(),
                        location: "query".to_string(),
                        required: false,
                        schema: Schema::typed(filter.value_type()),
                    })
                    .collect(),
            )
        };

        let list = Operation {
            summary: "List resources".to_string(),
            parameters,
        };

        let create = (!resource.creatable_fields.is_empty()).then(|| Operation {
            summary: "Create resource".to_string(),
            parameters: None,
        });

        PathItem {
            get: Some(list),
            post: create,
        }
    }

    /// Build the final OpenAPI document
    pub fn build(self, schema_gen: SchemaGenerator) -> OpenApiDocument {
        debug!("Building final OpenAPI document with {} paths", self.paths.len());

        OpenApiDocument {
            openapi: OPENAPI_VERSION.to_string(),
            info: self.info,
            paths: self.paths,
            components: Components {
                schemas: schema_gen.into_schemas(),
            },
        }
    }
}

impl Default for OpenApiBuilder {
    fn default() -> Self {
        Self::new()
    }
}
