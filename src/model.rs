//! In-memory model recovered from the descriptor files.
//!
//! Every list here is a [`BoundedVec`]; once a list is full further matches
//! are dropped without error.

use crate::bounded::BoundedVec;

pub const MAX_ATTRIBUTES: usize = 100;
pub const MAX_FILTERS: usize = 50;
pub const MAX_RELATIONS: usize = 20;
/// Applies to creatable and updatable fields alike.
pub const MAX_FIELDS: usize = 100;
pub const MAX_RESOURCES: usize = 50;
pub const MAX_ROUTES: usize = 100;

/// A queryable parameter declared on a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub name: String,
    /// Empty when a `type:` marker was present but carried no quoted value
    pub filter_type: String,
    pub collection: Option<String>,
}

impl Filter {
    /// The type to advertise for this filter, falling back to `string`.
    pub fn value_type(&self) -> &str {
        if self.filter_type.is_empty() {
            "string"
        } else {
            &self.filter_type
        }
    }
}

/// Association kinds recognised in resource descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    HasOne,
    HasMany,
}

impl RelationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::HasOne => "has_one",
            RelationKind::HasMany => "has_many",
        }
    }
}

/// A declared association from one resource to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub name: String,
    pub relation_name: Option<String>,
    pub foreign_key_on: Option<String>,
    pub kind: RelationKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Everything recovered from one resource descriptor file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    /// File base name without the `.rb` extension
    pub class_name: String,
    pub model_name: Option<String>,
    pub create_form: Option<String>,
    pub attributes: BoundedVec<String>,
    pub filters: BoundedVec<Filter>,
    pub relations: BoundedVec<Relation>,
    pub creatable_fields: BoundedVec<String>,
    pub updatable_fields: BoundedVec<String>,
    pub paginator: Option<String>,
    pub default_sort_field: Option<String>,
    pub default_sort_direction: Option<SortDirection>,
}

impl ResourceRecord {
    /// Create an empty record for the given class name
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            model_name: None,
            create_form: None,
            attributes: BoundedVec::new(MAX_ATTRIBUTES),
            filters: BoundedVec::new(MAX_FILTERS),
            relations: BoundedVec::new(MAX_RELATIONS),
            creatable_fields: BoundedVec::new(MAX_FIELDS),
            updatable_fields: BoundedVec::new(MAX_FIELDS),
            paginator: None,
            default_sort_field: None,
            default_sort_direction: None,
        }
    }

    /// The declared model name, treating an empty declaration as absent.
    pub fn model_name(&self) -> Option<&str> {
        self.model_name.as_deref().filter(|name| !name.is_empty())
    }

    /// Key under which this resource's schema is published.
    pub fn schema_name(&self) -> &str {
        self.model_name().unwrap_or(&self.class_name)
    }
}

/// HTTP methods a route can advertise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// A resource collection mounted in the routing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecord {
    pub path: String,
    pub resource_name: String,
    pub http_methods: Vec<HttpMethod>,
}

impl RouteRecord {
    /// Every declared collection gets the default `GET`/`POST` pair.
    pub fn new(path: String, resource_name: String) -> Self {
        Self {
            path,
            resource_name,
            http_methods: vec![HttpMethod::Get, HttpMethod::Post],
        }
    }

    /// Methods joined the way they are shown in logs, e.g. `GET|POST`
    pub fn methods_label(&self) -> String {
        self.http_methods
            .iter()
            .map(HttpMethod::as_str)
            .collect::<Vec<_>>()
            .join("|")
    }
}

/// The complete model: resources and routes in insertion order.
#[derive(Debug, Clone)]
pub struct ApiModel {
    pub resources: BoundedVec<ResourceRecord>,
    pub routes: BoundedVec<RouteRecord>,
}

impl ApiModel {
    pub fn new() -> Self {
        Self {
            resources: BoundedVec::new(MAX_RESOURCES),
            routes: BoundedVec::new(MAX_ROUTES),
        }
    }
}

impl Default for ApiModel {
    fn default() -> Self {
        Self::new()
    }
}
