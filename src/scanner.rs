use crate::bounded::BoundedVec;
use crate::extractor::resource::{class_name_from_path, ResourceParser};
use crate::model::{ResourceRecord, MAX_RESOURCES};
use log::{debug, info, warn};
use std::path::PathBuf;
use walkdir::WalkDir;

/// File name suffix that marks a resource descriptor.
pub const RESOURCE_SUFFIX: &str = "_resource.rb";

/// Scanner for a directory of resource descriptor files.
///
/// Only the directory's own entries are considered (no recursion). Entries
/// are visited in file-name order so repeated runs produce the same model.
///
/// # Example
///
/// ```no_run
/// use openapi_from_resources::scanner::ResourceScanner;
/// use std::path::PathBuf;
///
/// let scanner = ResourceScanner::new(PathBuf::from("app/resources"));
/// let result = scanner.scan();
/// println!("Found {} resources", result.resources.len());
/// ```
pub struct ResourceScanner {
    root_path: PathBuf,
}

/// Result of a directory scan.
///
/// Contains the parsed resources and any warnings encountered along the way.
pub struct ScanResult {
    /// One record per descriptor file, capped at [`MAX_RESOURCES`]
    pub resources: BoundedVec<ResourceRecord>,
    /// Unreadable directories or files
    pub warnings: Vec<String>,
}

impl ResourceScanner {
    /// Creates a new `ResourceScanner` for the specified directory.
    ///
    /// # Arguments
    ///
    /// * `root_path` - Directory holding the resource descriptor files
    pub fn new(root_path: PathBuf) -> Self {
        Self { root_path }
    }

    /// Parses every `*_resource.rb` entry directly inside the root directory.
    ///
    /// Entries are visited in file-name order and symbolic links are
    /// followed. Scanning stops once [`MAX_RESOURCES`] records are collected.
    ///
    /// # Returns
    ///
    /// Returns a `ScanResult` with one record per descriptor and any warnings.
    ///
    /// # Errors
    ///
    /// This method does not fail. An unreadable directory yields zero
    /// resources and a warning, and an unreadable file yields a warning plus a
    /// record holding only its class name.
    pub fn scan(&self) -> ScanResult {
        let mut resources = BoundedVec::new(MAX_RESOURCES);
        let mut warnings = Vec::new();

        let walker = WalkDir::new(&self.root_path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            if resources.is_full() {
                debug!("Resource limit of {} reached, stopping scan", MAX_RESOURCES);
                break;
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let warning = format!("Cannot open directory {}: {}", self.root_path.display(), e);
                    warn!("{}", warning);
                    warnings.push(warning);
                    continue;
                }
            };

            // Symlinks are resolved so a linked descriptor is parsed like a file
            let is_descriptor = entry.file_name().to_string_lossy().ends_with(RESOURCE_SUFFIX);
            if !is_descriptor || entry.path().is_dir() {
                continue;
            }

            let record = match ResourceParser::parse_file(entry.path()) {
                Ok(record) => record,
                Err(e) => {
                    let warning = e.to_string();
                    warn!("{}", warning);
                    warnings.push(warning);
                    ResourceRecord::new(class_name_from_path(entry.path()))
                }
            };
            info!("Parsed resource: {}", record.class_name);
            resources.push(record);
        }

        ScanResult {
            resources,
            warnings,
        }
    }
}
