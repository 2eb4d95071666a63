use crate::model::ResourceRecord;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

/// Schema generator - converts resource records to OpenAPI component schemas
pub struct SchemaGenerator {
    /// Generated schemas keyed by model name (or class name)
    schemas: IndexMap<String, Schema>,
}

/// OpenAPI Schema definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// The type of the schema (string, object, uuid, ...)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    /// Properties for object types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Schema>>,
}

impl Schema {
    /// A schema that carries only a type name
    pub fn typed(schema_type: &str) -> Self {
        Self {
            schema_type: Some(schema_type.to_string()),
            properties: None,
        }
    }

    pub fn object(properties: IndexMap<String, Schema>) -> Self {
        Self {
            schema_type: Some("object".to_string()),
            properties: Some(properties),
        }
    }
}

impl SchemaGenerator {
    pub fn new() -> Self {
        debug!("Initializing SchemaGenerator");
        Self {
            schemas: IndexMap::new(),
        }
    }

    /// Generate the object schema for a resource and register it.
    ///
    /// Attributes become `string` properties and relations `object`
    /// properties; a relation sharing an attribute's name replaces it.
    /// Registering a second resource under an existing key keeps the key's
    /// original position and replaces its schema.
    pub fn add_resource(&mut self, resource: &ResourceRecord) -> &Schema {
        let schema = Self::resource_schema(resource);
        let name = resource.schema_name().to_string();
        debug!("Generating schema {} for {}", name, resource.class_name);

        if self.schemas.contains_key(&name) {
            debug!("Schema {} already exists, replacing it", name);
        }
        let index = self.schemas.insert_full(name, schema).0;
        &self.schemas[index]
    }

    fn resource_schema(resource: &ResourceRecord) -> Schema {
        let mut properties = IndexMap::new();

        for attribute in resource.attributes.iter().filter(|a| !a.is_empty()) {
            properties.insert(attribute.clone(), Schema::typed("string"));
        }
        for relation in resource.relations.iter().filter(|r| !r.name.is_empty()) {
            properties.insert(relation.name.clone(), Schema::typed("object"));
        }

        Schema::object(properties)
    }

    /// Get all generated schemas
    pub fn get_schemas(&self) -> &IndexMap<String, Schema> {
        &self.schemas
    }

    pub fn into_schemas(self) -> IndexMap<String, Schema> {
        self.schemas
    }
}

impl Default for SchemaGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Relation, RelationKind};
    use pretty_assertions::assert_eq;

    fn relation(name: &str) -> Relation {
        Relation {
            name: name.to_string(),
            relation_name: None,
            foreign_key_on: None,
            kind: RelationKind::HasMany,
        }
    }

    #[test]
    fn test_resource_schema_properties() {
        let mut resource = ResourceRecord::new("widget_resource");
        resource.model_name = Some("widget".to_string());
        resource.attributes.push("name".to_string());
        resource.attributes.push("price".to_string());
        resource.relations.push(relation("parts"));

        let mut schema_gen = SchemaGenerator::new();
        let schema = schema_gen.add_resource(&resource).clone();

        assert_eq!(schema.schema_type.as_deref(), Some("object"));
        let properties = schema.properties.unwrap();
        assert_eq!(
            properties.keys().collect::<Vec<_>>(),
            vec!["name", "price", "parts"]
        );
        assert_eq!(properties["name"], Schema::typed("string"));
        assert_eq!(properties["parts"], Schema::typed("object"));
        assert!(schema_gen.get_schemas().contains_key("widget"));
    }

    #[test]
    fn test_schema_named_after_class_without_model_name() {
        let mut schema_gen = SchemaGenerator::new();
        schema_gen.add_resource(&ResourceRecord::new("gadget_resource"));
        assert!(schema_gen.get_schemas().contains_key("gadget_resource"));
    }

    #[test]
    fn test_empty_names_are_skipped() {
        let mut resource = ResourceRecord::new("a");
        resource.relations.push(relation(""));
        resource.attributes.push("id".to_string());

        let schema = SchemaGenerator::resource_schema(&resource);
        assert_eq!(schema.properties.unwrap().len(), 1);
    }

    #[test]
    fn test_relation_replaces_attribute_with_same_name() {
        let mut resource = ResourceRecord::new("a");
        resource.attributes.push("owner".to_string());
        resource.relations.push(relation("owner"));

        let schema = SchemaGenerator::resource_schema(&resource);
        assert_eq!(schema.properties.unwrap()["owner"], Schema::typed("object"));
    }

    #[test]
    fn test_duplicate_schema_key_last_write_wins_in_first_position() {
        let mut first = ResourceRecord::new("a_resource");
        first.model_name = Some("shared".to_string());
        first.attributes.push("first".to_string());
        let mut second = ResourceRecord::new("b_resource");
        second.model_name = Some("shared".to_string());
        second.attributes.push("second".to_string());

        let mut schema_gen = SchemaGenerator::new();
        schema_gen.add_resource(&first);
        schema_gen.add_resource(&ResourceRecord::new("c_resource"));
        schema_gen.add_resource(&second);

        let schemas = schema_gen.into_schemas();
        assert_eq!(schemas.keys().collect::<Vec<_>>(), vec!["shared", "c_resource"]);
        assert!(schemas["shared"].properties.as_ref().unwrap().contains_key("second"));
    }
}
