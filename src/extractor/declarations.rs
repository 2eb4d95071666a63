use crate::extractor::DeclarationParser;
use crate::model::{Filter, Relation, RelationKind, ResourceRecord};
use crate::text::{extract_quoted, has_word, looks_like_definition, symbol_after_colon};
use log::debug;

const RANSACK_FILTER: &str = "ransack_filter";
const ASSOCIATION_UUID_FILTER: &str = "association_uuid_filter";

/// `attributes :name, :price, ...`
pub struct AttributesParser;

impl DeclarationParser for AttributesParser {
    fn matches(&self, line: &str) -> bool {
        match line.find("attributes") {
            Some(pos) => line[pos..].contains(':') && !looks_like_definition(line),
            None => false,
        }
    }

    fn apply(&self, line: &str, record: &mut ResourceRecord) {
        let mut found_attributes = false;

        for token in line.split(|c: char| c.is_ascii_whitespace() || c == ':' || c == ',') {
            if token.is_empty() {
                continue;
            }
            if token == "attributes" {
                found_attributes = true;
                continue;
            }
            if found_attributes && !record.attributes.push(token.to_string()) {
                debug!("{}: attribute limit reached, dropping {}", record.class_name, token);
                break;
            }
        }
    }
}

/// `filter :name`, `ransack_filter :name`, `association_uuid_filter :owner`
pub struct FilterParser;

impl DeclarationParser for FilterParser {
    fn matches(&self, line: &str) -> bool {
        line.contains(RANSACK_FILTER)
            || line.contains(ASSOCIATION_UUID_FILTER)
            || (has_word(line, "filter") && !looks_like_definition(line))
    }

    fn apply(&self, line: &str, record: &mut ResourceRecord) {
        if record.filters.is_full() {
            debug!("{}: filter limit reached, ignoring '{}'", record.class_name, line);
            return;
        }

        let filter_type = if line.contains("type:") {
            extract_quoted(line, "type:").unwrap_or_default().to_string()
        } else if line.contains(ASSOCIATION_UUID_FILTER) {
            "uuid".to_string()
        } else {
            "string".to_string()
        };

        let filter = Filter {
            name: symbol_after_colon(line).to_string(),
            filter_type,
            collection: extract_quoted(line, "collection:").map(str::to_string),
        };
        debug!("{}: filter {} ({})", record.class_name, filter.name, filter.value_type());
        record.filters.push(filter);
    }
}

/// `has_one :author` / `has_many :comments, relation_name: 'notes'`
pub struct RelationParser;

impl DeclarationParser for RelationParser {
    fn matches(&self, line: &str) -> bool {
        line.contains("has_one") || line.contains("has_many")
    }

    fn apply(&self, line: &str, record: &mut ResourceRecord) {
        if record.relations.is_full() {
            debug!("{}: relation limit reached, ignoring '{}'", record.class_name, line);
            return;
        }

        let kind = if line.contains("has_one") {
            RelationKind::HasOne
        } else {
            RelationKind::HasMany
        };

        let relation = Relation {
            name: symbol_after_colon(line).to_string(),
            relation_name: extract_quoted(line, "relation_name:").map(str::to_string),
            foreign_key_on: extract_quoted(line, "foreign_key_on:").map(str::to_string),
            kind,
        };
        debug!("{}: {} {}", record.class_name, kind.as_str(), relation.name);
        record.relations.push(relation);
    }
}
