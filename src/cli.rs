use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

/// Generate an OpenAPI document from JSON:API resource classes and a routes file
#[derive(Parser, Debug)]
#[command(name = "openapi-from-resources")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Directory containing *_resource.rb files
    #[arg(value_name = "RESOURCE_DIR")]
    pub resource_dir: PathBuf,

    /// Routing file declaring namespaces and resources
    #[arg(value_name = "ROUTES_FILE", default_value = "config/routes.rb")]
    pub routes_file: PathBuf,

    /// File the document is written to (it is always printed to stdout as well)
    #[arg(short = 'o', long = "output", value_name = "FILE", default_value = "api_spec.json")]
    pub output_path: PathBuf,

    /// Output format (json or yaml)
    #[arg(short = 'f', long = "format", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Title for the info section
    #[arg(long = "title")]
    pub title: Option<String>,

    /// Version for the info section
    #[arg(long = "api-version")]
    pub api_version: Option<String>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.resource_dir.is_dir() {
        anyhow::bail!(
            "Resource directory does not exist or is not a directory: {}",
            args.resource_dir.display()
        );
    }

    info!("Resource directory: {}", args.resource_dir.display());
    info!("Routes file: {}", args.routes_file.display());
    info!("Output file: {}", args.output_path.display());
    info!("Output format: {:?}", args.output_format);

    Ok(args)
}

/// Run the main workflow
///
/// Unreadable inputs and a failed file write are logged and do not fail the
/// run; only serialization errors are returned.
pub fn run(args: CliArgs) -> Result<()> {
    use crate::extractor::routes::RoutesParser;
    use crate::model::ApiModel;
    use crate::openapi_builder::{OpenApiBuilder, DEFAULT_TITLE, DEFAULT_VERSION};
    use crate::scanner::ResourceScanner;
    use crate::serializer::{serialize_json, serialize_yaml};

    let mut model = ApiModel::new();

    // Step 1: Scan resource descriptors
    info!("Scanning resource files in: {}", args.resource_dir.display());
    let scan_result = ResourceScanner::new(args.resource_dir.clone()).scan();
    model.resources = scan_result.resources;

    // Step 2: Parse the routing file
    info!("Parsing routes file: {}", args.routes_file.display());
    if let Err(e) = RoutesParser::parse_file(&args.routes_file, &mut model.routes) {
        warn!("{}", e);
    }

    // Step 3: Build the document
    info!("Generating OpenAPI specification...");
    let document = OpenApiBuilder::new()
        .with_info(
            args.title.clone().unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            args.api_version.clone().unwrap_or_else(|| DEFAULT_VERSION.to_string()),
        )
        .synthesize(&model);

    // Step 4: Serialize
    let content = match args.output_format {
        OutputFormat::Json => {
            serialize_json(&document).context("Failed to serialize OpenAPI document to JSON")?
        }
        OutputFormat::Yaml => {
            serialize_yaml(&document).context("Failed to serialize OpenAPI document to YAML")?
        }
    };

    // Step 5: Emit to stdout, then to the output file
    println!("{}", content);
    match write_output(&content, &args.output_path) {
        Ok(()) => info!("API specification written to {}", args.output_path.display()),
        Err(e) => error!("{:#}", e),
    }

    info!(
        "Parsed {} resources and {} routes",
        model.resources.len(),
        model.routes.len()
    );
    if !scan_result.warnings.is_empty() {
        info!("  - Warnings: {}", scan_result.warnings.len());
    }

    Ok(())
}

/// Write the rendered document to its output file
fn write_output(content: &str, path: &Path) -> Result<()> {
    crate::serializer::write_to_file(content, path)
        .with_context(|| format!("Failed to write output file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let args = CliArgs::parse_from(["openapi-from-resources", "app/resources"]);
        assert_eq!(args.resource_dir, PathBuf::from("app/resources"));
        assert_eq!(args.routes_file, PathBuf::from("config/routes.rb"));
        assert_eq!(args.output_path, PathBuf::from("api_spec.json"));
        assert_eq!(args.output_format, OutputFormat::Json);
        assert!(!args.verbose);
    }

    #[test]
    fn test_all_options() {
        let args = CliArgs::parse_from([
            "openapi-from-resources",
            "res",
            "routes.rb",
            "-o",
            "out.yaml",
            "-f",
            "yaml",
            "--title",
            "Shop",
            "--api-version",
            "2.1.0",
            "-v",
        ]);
        assert_eq!(args.routes_file, PathBuf::from("routes.rb"));
        assert_eq!(args.output_path, PathBuf::from("out.yaml"));
        assert_eq!(args.output_format, OutputFormat::Yaml);
        assert_eq!(args.title.as_deref(), Some("Shop"));
        assert_eq!(args.api_version.as_deref(), Some("2.1.0"));
        assert!(args.verbose);
    }

    #[test]
    fn test_missing_resource_dir_is_usage_error() {
        assert!(CliArgs::try_parse_from(["openapi-from-resources"]).is_err());
    }

    #[test]
    fn test_validation_rejects_missing_directory() {
        let args = CliArgs::parse_from(["openapi-from-resources", "/nonexistent/resources"]);
        let err = parse_args_from_parsed(args).unwrap_err();
        assert!(err.to_string().starts_with("Resource directory does not exist"));
        assert!(err.to_string().contains("/nonexistent/resources"));
    }

    #[test]
    fn test_write_output_failure_names_output_and_cause() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let output = blocker.join("api_spec.json");

        let err = write_output("{}", &output).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.starts_with("Failed to write output file: "));
        assert!(message.contains("Cannot open"));
    }

    #[test]
    fn test_run_writes_output_file() {
        let temp_dir = TempDir::new().unwrap();
        let resources = temp_dir.path().join("resources");
        fs::create_dir(&resources).unwrap();
        fs::write(resources.join("widget_resource.rb"), "model_name 'widget'\n").unwrap();
        let routes = temp_dir.path().join("routes.rb");
        fs::write(&routes, "namespace :v1 do\nresources :widgets\nend\n").unwrap();
        let output = temp_dir.path().join("api_spec.json");

        let args = CliArgs::parse_from([
            "openapi-from-resources",
            resources.to_str().unwrap(),
            routes.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--title",
            "Shop",
        ]);
        run(args).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(json["info"]["title"], "Shop");
        assert_eq!(json["info"]["version"], "1.0.0");
        assert!(json["paths"].get("/api/v1/widgets").is_some());
    }

    #[test]
    fn test_run_survives_missing_routes_and_unwritable_output() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let routes = temp_dir.path().join("missing_routes.rb");
        let output = blocker.join("api_spec.json");

        let args = CliArgs::parse_from([
            "openapi-from-resources",
            temp_dir.path().to_str().unwrap(),
            routes.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ]);
        assert!(run(args).is_ok());
    }
}
