use crate::error::{Error, Result};
use crate::extractor::declarations::{AttributesParser, FilterParser, RelationParser};
use crate::extractor::DeclarationParser;
use crate::model::{ResourceRecord, SortDirection};
use crate::text::{extract_quoted, has_word, trim_whitespace};
use log::debug;
use std::fs;
use std::path::Path;

/// Extension stripped from resource descriptor file names.
pub const DESCRIPTOR_EXTENSION: &str = ".rb";

const CREATABLE_HEADER: &str = "def self.creatable_fields";
const UPDATABLE_HEADER: &str = "def self.updatable_fields";
const SYMBOL_LIST_OPEN: &str = "%i[";

/// Which field-exposure block the scanner is currently inside.
///
/// ```text
/// Outside --def self.creatable_fields--> Creatable --end--> Outside
/// Outside --def self.updatable_fields--> Updatable --end--> Outside
/// ```
///
/// A header line always switches state, even from inside the other block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldBlock {
    #[default]
    Outside,
    Creatable,
    Updatable,
}

impl FieldBlock {
    /// Feeds one trimmed line through the state machine, recording any
    /// `%i[...]` symbols into the list for the current block.
    pub fn step(self, line: &str, record: &mut ResourceRecord) -> FieldBlock {
        if line.contains(CREATABLE_HEADER) {
            return FieldBlock::Creatable;
        }
        if line.contains(UPDATABLE_HEADER) {
            return FieldBlock::Updatable;
        }
        let fields = match self {
            FieldBlock::Outside => return self,
            FieldBlock::Creatable => &mut record.creatable_fields,
            FieldBlock::Updatable => &mut record.updatable_fields,
        };
        if has_word(line, "end") {
            return FieldBlock::Outside;
        }

        if let Some(symbols) = symbol_list(line) {
            for symbol in symbols.split_ascii_whitespace() {
                if !fields.push(symbol.to_string()) {
                    break;
                }
            }
        }
        self
    }
}

/// Contents of a `%i[ ... ]` literal closed on the same line.
fn symbol_list(line: &str) -> Option<&str> {
    let start = line.find(SYMBOL_LIST_OPEN)? + SYMBOL_LIST_OPEN.len();
    let len = line[start..].find(']')?;
    Some(&line[start..start + len])
}

/// Derives a resource's class name from its descriptor path.
///
/// The base name is used regardless of directory depth, with a trailing
/// `.rb` removed.
pub fn class_name_from_path(path: &Path) -> String {
    let base = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());
    match base.strip_suffix(DESCRIPTOR_EXTENSION) {
        Some(stem) => stem.to_string(),
        None => base,
    }
}

/// Parser for JSON:API resource descriptor files.
///
/// # Example
///
/// ```no_run
/// use openapi_from_resources::extractor::resource::ResourceParser;
/// use std::path::Path;
///
/// let record = ResourceParser::parse_file(Path::new("app/resources/widget_resource.rb")).unwrap();
/// println!("{} exposes {} attributes", record.class_name, record.attributes.len());
/// ```
pub struct ResourceParser;

impl ResourceParser {
    /// Reads and scans one resource descriptor file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read. Callers treat this as
    /// "nothing recovered" and keep going.
    pub fn parse_file(path: &Path) -> Result<ResourceRecord> {
        debug!("Parsing resource file: {}", path.display());
        let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
        let content = String::from_utf8_lossy(&bytes);
        Ok(Self::parse_str(class_name_from_path(path), &content))
    }

    /// Scans descriptor text for a resource with the given class name.
    pub fn parse_str(class_name: impl Into<String>, content: &str) -> ResourceRecord {
        let mut record = ResourceRecord::new(class_name);
        let mut block = FieldBlock::default();

        for raw in content.lines() {
            let line = trim_whitespace(raw);
            Self::parse_settings(line, &mut record);

            AttributesParser.parse_line(line, &mut record);
            FilterParser.parse_line(line, &mut record);
            RelationParser.parse_line(line, &mut record);

            block = block.step(line, &mut record);
        }

        debug!(
            "Resource {}: {} attributes, {} filters, {} relations, {} creatable, {} updatable",
            record.class_name,
            record.attributes.len(),
            record.filters.len(),
            record.relations.len(),
            record.creatable_fields.len(),
            record.updatable_fields.len()
        );
        record
    }

    /// Single-value settings: model name, create form, paginator, default sort.
    fn parse_settings(line: &str, record: &mut ResourceRecord) {
        if line.contains("model_name") {
            if let Some(name) = extract_quoted(line, "model_name") {
                record.model_name = Some(name.to_string());
            }
        }

        if line.contains("create_form") {
            if let Some(form) = extract_quoted(line, "create_form") {
                record.create_form = Some(form.to_string());
            }
        }

        if line.contains("paginator") {
            if let Some(paginator) = extract_quoted(line, "paginator") {
                record.paginator = Some(paginator.to_string());
            } else if line.contains(":paged") {
                record.paginator = Some("paged".to_string());
            }
        }

        if line.contains("default_sort") && line.contains("field") {
            if let Some(field) = extract_quoted(line, "field:") {
                record.default_sort_field = Some(field.to_string());
            }
            if let Some(pos) = line.find("direction:") {
                let direction = &line[pos..];
                if has_word(direction, "desc") {
                    record.default_sort_direction = Some(SortDirection::Desc);
                } else if has_word(direction, "asc") {
                    record.default_sort_direction = Some(SortDirection::Asc);
                }
            }
        }
    }
}
