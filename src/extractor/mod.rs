//! Line-oriented extraction of resource and route declarations.
//!
//! Nothing here parses the descriptor language. Each recognizer looks at a
//! single trimmed line, decides whether it is interested, and copies what it
//! can into the record being built. Multi-line context is limited to the
//! field-block state machine in [`resource`] and the namespace stack in
//! [`routes`].
//!
//! # Example
//!
//! ```
//! use openapi_from_resources::extractor::resource::ResourceParser;
//!
//! let record = ResourceParser::parse_str(
//!     "widget_resource",
//!     "model_name 'widget'\nattributes :name, :price\n",
//! );
//! assert_eq!(record.model_name(), Some("widget"));
//! assert_eq!(&record.attributes[..], &["name", "price"]);
//! ```

pub mod declarations;
pub mod resource;
pub mod routes;

use crate::model::ResourceRecord;

/// A recognizer for one declaration idiom.
///
/// Implementations never remove entries from the record and are free to
/// ignore a line they matched if the relevant list is already full.
pub trait DeclarationParser {
    /// Whether this line carries the idiom this parser handles.
    fn matches(&self, line: &str) -> bool;

    /// Records whatever the line declares.
    fn apply(&self, line: &str, record: &mut ResourceRecord);

    /// Runs [`apply`](Self::apply) when the line matches.
    fn parse_line(&self, line: &str, record: &mut ResourceRecord) -> bool {
        if self.matches(line) {
            self.apply(line, record);
            true
        } else {
            false
        }
    }
}
