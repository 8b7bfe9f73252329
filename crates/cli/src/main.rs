//! CLI tool for turning saved model responses into presentation documents.
//!
//! Each input is an outline file. If a saved content response sits next to
//! it as `<stem>.content.json`, `<stem>.content.md`, or `<stem>.content.txt`,
//! it is replayed through the engine; otherwise slides come from the outline.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use deckgen_core::{
    ContentGenerator, DocumentRenderer, Error as CoreError, GenerationConfig, GenerationRequest,
    GenerationTask, HeadingPolicy, JsonRenderer, OutlineParser, OutlineRequest, PlainTextRenderer,
    PresentationDocument, SynthesisEngine, TemplateRegistry,
};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Suffixes checked, in order, for a saved content response.
const CONTENT_SUFFIXES: &[&str] = &["content.json", "content.md", "content.txt"];

/// Build slide deck documents from saved outline and content responses.
#[derive(Parser, Debug)]
#[command(name = "deckgen")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Outline file(s) (markdown headings and bullets)
    #[arg(required_unless_present = "list_templates")]
    input: Vec<PathBuf>,

    /// Template name (unknown names use the default template)
    #[arg(short, long, default_value = deckgen_core::template::DEFAULT_TEMPLATE_NAME)]
    template: String,

    /// JSON template source replacing the built-in templates
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Output directory (default: same as input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print output to stdout instead of writing to file
    #[arg(short, long)]
    print: bool,

    /// Only parse the outline and print its tree as JSON
    #[arg(long)]
    outline_only: bool,

    /// Nest `##` headings under the `#` title instead of folding them
    #[arg(long)]
    nested_headings: bool,

    /// List available templates and exit
    #[arg(long)]
    list_templates: bool,

    /// Provider recorded in generation requests
    #[arg(long, default_value = "DeepSeek")]
    provider: String,

    /// Model recorded in generation requests
    #[arg(long, default_value = "deepseek-chat")]
    model: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

/// Answers generation requests from text saved on disk.
struct ReplayGenerator {
    outline: String,
    content: Option<String>,
}

impl ContentGenerator for ReplayGenerator {
    fn generate(&self, request: &GenerationRequest) -> deckgen_core::Result<String> {
        log::debug!("Replaying {:?} response for model {}", request.task, request.model);
        match request.task {
            GenerationTask::Outline => Ok(self.outline.clone()),
            GenerationTask::Content => self
                .content
                .clone()
                .ok_or_else(|| CoreError::GenerationFailed("no saved content response".to_string())),
            GenerationTask::Expand => Err(CoreError::GenerationFailed(
                "section expansion needs a live model".to_string(),
            )),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let registry = load_registry(args.templates.as_deref())?;

    if args.list_templates {
        print_templates(&registry);
        return Ok(());
    }

    let config = GenerationConfig::new()
        .with_provider(&args.provider)
        .with_model(&args.model);

    for input_path in &args.input {
        if args.verbose {
            eprintln!("Processing: {}", input_path.display());
        }

        match process_file(input_path, &args, &registry, &config) {
            Ok(Some((extension, bytes))) => {
                if args.print {
                    std::io::stdout().write_all(&bytes)?;
                } else {
                    let output_path = get_output_path(input_path, args.output.as_ref(), &extension)?;
                    write_output(&output_path, &bytes)?;
                    if args.verbose {
                        eprintln!("Written to: {}", output_path.display());
                    }
                }
            }
            Ok(None) => {}
            Err(e) => {
                eprintln!("Error processing {}: {:#}", input_path.display(), e);
            }
        }
    }

    Ok(())
}

fn load_registry(path: Option<&Path>) -> Result<TemplateRegistry> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read templates from {}", path.display()))?;
            TemplateRegistry::from_json(&json)
                .with_context(|| format!("Invalid template source {}", path.display()))
        }
        None => Ok(TemplateRegistry::default()),
    }
}

fn print_templates(registry: &TemplateRegistry) {
    let default_name = &registry.default_profile().name;
    for profile in registry.profiles() {
        let variants: Vec<&str> = profile.layout_variants().iter().map(|v| v.as_str()).collect();
        let marker = if &profile.name == default_name { " (default)" } else { "" };
        println!(
            "{}{} [{}] primary {}: {}",
            profile.name,
            marker,
            profile.category,
            profile.palette.primary,
            variants.join(", ")
        );
    }
}

/// Process a single outline file.
///
/// Returns the output file extension and bytes, or `None` when there is nothing to write.
fn process_file(
    input_path: &Path,
    args: &Args,
    registry: &TemplateRegistry,
    config: &GenerationConfig,
) -> Result<Option<(String, Vec<u8>)>> {
    let outline = std::fs::read_to_string(input_path)
        .with_context(|| format!("Failed to open {}", input_path.display()))?;
    let content = read_content_response(input_path)?;

    let policy = if args.nested_headings {
        HeadingPolicy::Nested
    } else {
        HeadingPolicy::Folded
    };
    let has_content = content.is_some();
    let outline_text = outline.clone();

    let engine = SynthesisEngine::new(ReplayGenerator { outline, content })
        .with_registry(registry.clone())
        .with_outline_parser(OutlineParser::new().with_heading_policy(policy));

    if args.outline_only {
        let request = OutlineRequest::new(file_stem(input_path));
        let result = engine.synthesize_outline(&request, config);
        if !result.is_success() {
            anyhow::bail!("{}", result.message);
        }
        let mut bytes = serde_json::to_vec_pretty(&result.outline_tree)?;
        bytes.push(b'\n');
        return Ok(Some(("outline.json".to_string(), bytes)));
    }

    let document = if has_content {
        let result = engine.synthesize_presentation(&outline_text, &args.template, config);
        match result.document {
            Some(document) if result.is_success() => document,
            _ => anyhow::bail!("{}", result.message),
        }
    } else {
        log::debug!("No saved content response; building slides from the outline");
        let profile = engine.registry().resolve(&args.template);
        engine.assemble(&outline_text, Vec::new(), profile)
    };

    if args.verbose {
        eprintln!(
            "  Built {} slides with template {}",
            document.slide_count, document.profile.name
        );
    }

    let (extension, bytes) = render(&document, args.format)?;
    Ok(Some((extension, bytes)))
}

/// Render a document, returning the renderer's file extension and the bytes.
fn render(document: &PresentationDocument, format: OutputFormat) -> Result<(String, Vec<u8>)> {
    let (extension, deck) = match format {
        OutputFormat::Json => (JsonRenderer.extension(), JsonRenderer.render(document)?),
        OutputFormat::Text => {
            let renderer = PlainTextRenderer::new();
            (renderer.extension(), renderer.render(document)?)
        }
    };
    let meta = deck.metadata();
    log::info!(
        "Rendered {} ({} bytes, {} slides)",
        meta.filename,
        meta.byte_size,
        meta.slide_count
    );
    Ok((extension.to_string(), deck.bytes))
}

/// Find a saved content response next to the outline.
fn read_content_response(input_path: &Path) -> Result<Option<String>> {
    let stem = file_stem(input_path);
    let dir = input_path.parent().unwrap_or_else(|| Path::new(""));

    for suffix in CONTENT_SUFFIXES {
        let candidate = dir.join(format!("{}.{}", stem, suffix));
        if candidate.is_file() {
            log::debug!("Using content response {}", candidate.display());
            let text = std::fs::read_to_string(&candidate)
                .with_context(|| format!("Failed to read {}", candidate.display()))?;
            return Ok(Some(text));
        }
    }

    Ok(None)
}

fn file_stem(path: &Path) -> &str {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
}

/// Determine the output path for a processed file: the input's stem with `extension`.
fn get_output_path(input_path: &Path, output_dir: Option<&PathBuf>, extension: &str) -> Result<PathBuf> {
    let filename = format!("{}.{}", file_stem(input_path), extension);

    let output_path = match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.join(filename)
        }
        None => {
            if let Some(parent) = input_path.parent() {
                parent.join(filename)
            } else {
                PathBuf::from(filename)
            }
        }
    };

    Ok(output_path)
}

/// Write output to a file.
fn write_output(path: &Path, content: &[u8]) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content)
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}
