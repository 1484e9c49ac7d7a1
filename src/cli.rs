//! CLI: load constrained-model documents → (inspect | java report)
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;
use serde_json::Value;

use crate::model::raw::{LoadError, RawDocument, RawModel};
use crate::model::{intern_document, InternedDocument};
use crate::options::{CollectionType, GeneratorOptions};
use crate::report::TargetReport;
use crate::resolve::Resolver;
use crate::targets::java::JavaTypeMapping;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// resolve constrained model trees into Java type expressions and imports
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// load + intern the model documents and print an arena summary
    Inspect(InspectOut),
    /// resolve against the Java table and emit the render-stage JSON report
    Java(JavaOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON Pointer to select a subnode in each document (e.g. /data/models)
    #[arg(long)]
    json_pointer: Option<String>,

    /// jq pre-process filter for each document
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs: literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct InspectOut {
    #[command(flatten)]
    input_settings: InputSettings,
}

#[derive(clap::Parser, Debug)]
struct JavaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// collection rendering for arrays and tuples
    #[arg(long, value_enum, default_value_t = CollectionType::Array)]
    collection_type: CollectionType,

    /// only resolve root models whose name matches this regex
    #[arg(long)]
    only: Option<String>,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    /// Load every input file (in parallel), apply pointer/jq selection, and
    /// concatenate the documents' models in input order.
    fn load_models(&self) -> Result<Vec<RawModel>> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;

        let loaded: Vec<Result<Vec<RawModel>, LoadError>> = source_paths
            .par_iter()
            .map(|source_path| self.load_file(source_path))
            .collect();

        let mut models = Vec::new();
        for result in loaded {
            models.extend(result?);
        }
        Ok(models)
    }

    fn load_file(&self, source_path: &Path) -> Result<Vec<RawModel>, LoadError> {
        let path = source_path.display().to_string();

        let source = std::fs::read_to_string(source_path).map_err(|source| LoadError::Read {
            path: path.clone(),
            source,
        })?;
        let value: Value = serde_json::from_str(&source).map_err(|error| LoadError::Json {
            path: path.clone(),
            message: error.to_string(),
        })?;

        let value = match self.json_pointer.as_ref() {
            None => value,
            Some(pointer) => {
                value
                    .pointer(pointer)
                    .cloned()
                    .ok_or_else(|| LoadError::Pointer {
                        path: path.clone(),
                        pointer: pointer.clone(),
                    })?
            }
        };

        let selected = match self.jq_expr.as_ref() {
            None => vec![value],
            Some(jq_expr) => crate::jq_filter::apply_filter(jq_expr, &value).map_err(|error| {
                LoadError::Document {
                    path: path.clone(),
                    message: format!("{error:#}"),
                }
            })?,
        };

        let mut models = Vec::new();
        for value in selected {
            let doc: RawDocument = crate::path_de::from_value_with_path(value).map_err(
                |message| LoadError::Document {
                    path: path.clone(),
                    message,
                },
            )?;
            models.extend(doc.into_models());
        }
        Ok(models)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Inspect(target) => {
                let doc = intern_with_warnings(target.input_settings.load_models()?);
                println!(
                    "{} root model(s), {} node(s)",
                    doc.arena.roots().len(),
                    doc.arena.len()
                );
                for &root in doc.arena.roots() {
                    let node = &doc.arena[root];
                    println!("  {} ({})", node.name, node.kind.label());
                }
                Ok(())
            }
            Command::Java(target) => {
                let mut models = target.input_settings.load_models()?;
                if let Some(pattern) = target.only.as_ref() {
                    let re = regex::Regex::new(pattern).context("invalid --only pattern")?;
                    models.retain(|model| re.is_match(&model.name));
                }
                let doc = intern_with_warnings(models);

                let options = GeneratorOptions::with_collection_type(target.collection_type);
                let mut resolver = Resolver::new(&doc.arena, &JavaTypeMapping, &options);
                let resolved = resolver.resolve_all();
                let deps = resolver.into_deps();

                let report = TargetReport::build(
                    chrono::Utc::now().to_rfc3339(),
                    options.collection_type,
                    &doc.arena,
                    &resolved,
                    deps,
                );
                let report_src = serde_json::to_string_pretty(&report)
                    .context("failed to serialize report")?;

                match target.out.as_ref() {
                    Some(out) => {
                        if let Some(parent) = out.parent() {
                            std::fs::create_dir_all(parent)
                                .with_context(|| format!("creating {}", parent.display()))?;
                        }
                        std::fs::write(out, &report_src)
                            .with_context(|| format!("writing {}", out.display()))?;
                    }
                    None => println!("{report_src}"),
                }
                Ok(())
            }
        }
    }
}

fn intern_with_warnings(models: Vec<RawModel>) -> InternedDocument {
    let doc = intern_document(models);
    for warning in &doc.warnings {
        eprintln!("{} {warning}", "warning:".yellow().bold());
    }
    doc
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // explicitly a glob but matched nothing -> surface as an error
                anyhow::bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
