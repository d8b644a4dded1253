//! tymlate's command-line entry point.

use tymlate::{
    cli::{get_args, Args},
    error::{default_error_handler, Result},
    processor::Processor,
    renderer::MiniJinjaRenderer,
    request::GenerationRequest,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Off
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// # Flow
/// 1. Validates the inputs and loads the configuration
/// 2. Compiles the path filters
/// 3. Walks the source tree, rendering templates and copying plain files
fn run(args: Args) -> Result<()> {
    let request = GenerationRequest::new(
        args.source_dir,
        args.target_dir,
        args.config,
        args.stop_if_not_empty,
    )?;

    let engine = MiniJinjaRenderer::new();
    let summary = Processor::new(&engine, &request)?.generate()?;

    log::info!(
        "Rendered {} template(s), copied {} file(s), skipped {}",
        summary.rendered,
        summary.copied,
        summary.skipped
    );
    println!("Generation completed successfully in {}.", request.target_dir.display());
    Ok(())
}
