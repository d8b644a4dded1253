//! Walks the source tree and reproduces it under the target directory,
//! rendering templates and copying every other file byte for byte.

use log::debug;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::{
    config::TemplatesConfig,
    context::{ContextBuilder, EnvSnapshot},
    error::{Error, Result},
    filter::PathFilter,
    renderer::TemplateRenderer,
    request::GenerationRequest,
};

/// Counts of what a successful run did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub rendered: usize,
    pub copied: usize,
    /// Files rejected by the path filter.
    pub skipped: usize,
}

/// What happened to a single source file.
#[derive(Debug, PartialEq, Eq)]
pub enum FileOperation {
    Render { target: PathBuf },
    Copy { target: PathBuf, bytes: u64 },
}

/// Drives one generation run.
pub struct Processor<'a> {
    renderer: &'a dyn TemplateRenderer,
    request: &'a GenerationRequest,
    filter: PathFilter,
    env: EnvSnapshot,
}

impl<'a> Processor<'a> {
    /// Compiles the path filter and captures the process environment.
    ///
    /// # Errors
    /// * `Error::PatternError` if a filter pattern is invalid
    pub fn new(renderer: &'a dyn TemplateRenderer, request: &'a GenerationRequest) -> Result<Self> {
        let filter = PathFilter::from_config(&request.config.templates)?;
        Ok(Self { renderer, request, filter, env: EnvSnapshot::capture() })
    }

    /// Replaces the captured environment.
    pub fn with_env(mut self, env: EnvSnapshot) -> Self {
        self.env = env;
        self
    }

    /// Performs the full generation pass. Stops at the first error; files
    /// written before it are left in place.
    pub fn generate(&self) -> Result<Summary> {
        let source_root = &self.request.source_dir;
        let target_root = &self.request.target_dir;
        debug!("Generating {} into {}", source_root.display(), target_root.display());

        create_dir_all(target_root)?;

        let builder =
            ContextBuilder::new(&self.request.config, self.request.config_dir(), self.env.clone());
        // Built on the first file that needs it and reused for the rest of the run.
        let mut context: Option<serde_json::Value> = None;
        let mut summary = Summary::default();

        for entry in WalkDir::new(source_root).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();
            let relative_path = path.strip_prefix(source_root).map_err(|e| {
                Error::ConfigError(format!("{} is outside of the source: {}", path.display(), e))
            })?;

            debug!("Processing source entry: {}", relative_path.display());

            if !self.filter.is_selected(&relative_path.to_string_lossy()) {
                if !entry.file_type().is_dir() {
                    summary.skipped += 1;
                }
                continue;
            }

            if entry.file_type().is_dir() {
                continue;
            }

            if context.is_none() {
                context = Some(builder.build()?.into_value());
            }
            if let Some(context) = &context {
                let operation = self
                    .process_file(path, relative_path, context)
                    .map_err(|e| Error::ProcessError {
                        path: path.display().to_string(),
                        source: Box::new(e),
                    })?;
                match operation {
                    FileOperation::Render { .. } => summary.rendered += 1,
                    FileOperation::Copy { .. } => summary.copied += 1,
                }
            }
        }

        Ok(summary)
    }

    /// Resolves the destination of one file and renders or copies it there.
    pub fn process_file(
        &self,
        source: &Path,
        relative_path: &Path,
        context: &serde_json::Value,
    ) -> Result<FileOperation> {
        let templates = &self.request.config.templates;
        let candidate = self.request.target_dir.join(relative_path);
        let target = resolve_target_path(self.renderer, templates, context, &candidate)?;

        if let Some(parent) = target.parent() {
            create_dir_all(parent)?;
        }

        let file_name = source.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        if is_template(&file_name, &templates.suffix) {
            render_file(self.renderer, source, &target, context)?;
            Ok(FileOperation::Render { target })
        } else {
            debug!("Copying file: {}", target.display());
            let bytes = copy_file(source, &target)?;
            Ok(FileOperation::Copy { target, bytes })
        }
    }
}

/// Renders `request` with the default MiniJinja engine.
pub fn generate(request: &GenerationRequest) -> Result<Summary> {
    let renderer = crate::renderer::MiniJinjaRenderer::new();
    let processor = Processor::new(&renderer, request)?;
    processor.generate()
}

/// Returns `true` if a file with this name is rendered as a template.
pub fn is_template(file_name: &str, suffix: &str) -> bool {
    file_name.ends_with(suffix)
}

/// Removes one trailing template suffix, if present.
pub fn strip_template_suffix<'p>(path: &'p str, suffix: &str) -> &'p str {
    path.strip_suffix(suffix).unwrap_or(path)
}

/// Computes the real destination of a file from its mirrored target path.
///
/// With `processFilename` enabled the whole path is rendered as a template
/// first. The suffix is stripped either way, whether or not the source is
/// itself a template.
pub fn resolve_target_path(
    renderer: &dyn TemplateRenderer,
    templates: &TemplatesConfig,
    context: &serde_json::Value,
    candidate: &Path,
) -> Result<PathBuf> {
    if templates.process_filename {
        let candidate = candidate.to_string_lossy();
        let resolved = renderer.render(&candidate, &candidate, context)?;
        Ok(PathBuf::from(strip_template_suffix(&resolved, &templates.suffix)))
    } else {
        Ok(strip_path_suffix(candidate, &templates.suffix))
    }
}

/// Like [`strip_template_suffix`], but keeps non-UTF-8 paths byte for byte.
fn strip_path_suffix(path: &Path, suffix: &str) -> PathBuf {
    if let Some(path) = path.to_str() {
        return PathBuf::from(strip_template_suffix(path, suffix));
    }
    #[cfg(unix)]
    {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        if let Some(stripped) = path.as_os_str().as_bytes().strip_suffix(suffix.as_bytes()) {
            return PathBuf::from(OsStr::from_bytes(stripped));
        }
    }
    path.to_path_buf()
}

/// Renders the template at `source` and writes the result to `target`,
/// replacing any existing file.
pub fn render_file(
    renderer: &dyn TemplateRenderer,
    source: &Path,
    target: &Path,
    context: &serde_json::Value,
) -> Result<()> {
    println!("{} --> {}", source.display(), target.display());
    let template = fs::read_to_string(source)?;
    let content = renderer.render(&source.display().to_string(), &template, context)?;
    fs::write(target, content)?;
    Ok(())
}

/// Copies a regular file byte for byte, replacing any existing target.
/// Symlinks are followed.
///
/// # Returns
/// * `Result<u64>` - Number of bytes copied
///
/// # Errors
/// * `Error::NotRegularFileError` for directories, sockets, devices and the like
pub fn copy_file(source: &Path, target: &Path) -> Result<u64> {
    if !fs::metadata(source)?.is_file() {
        return Err(Error::NotRegularFileError { path: source.display().to_string() });
    }
    let mut reader = File::open(source)?;
    let mut writer = File::create(target)?;
    Ok(io::copy(&mut reader, &mut writer)?)
}

fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .map_err(|source| Error::CreateDirError { path: path.display().to_string(), source })
}
