//! scaffoldify's entry point.
//! Resolves the configuration, then hands it to the scaffold run.

use scaffoldify::{
    cli::{get_args, Args},
    config::{discover_config, load_config},
    error::{default_error_handler, Result},
    logger::init_logger,
    parser::load_answers_from_stdin,
    prompt::DialoguerCollector,
    renderer::MiniJinjaRenderer,
    scaffold::Scaffolder,
};
use std::path::PathBuf;

fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => {
            let home = std::env::var_os("HOME").map(PathBuf::from);
            discover_config(std::env::current_dir()?, home.as_deref())?
        }
    };
    if let Some(templates) = args.templates {
        config.templates = Some(templates);
    }
    if let Some(cwd) = args.cwd {
        config.cwd = Some(cwd);
    }

    let preloaded = if args.stdin { load_answers_from_stdin()? } else { Default::default() };
    let collector = DialoguerCollector::with_preloaded(preloaded);
    let renderer = MiniJinjaRenderer::new()?;

    Scaffolder::new(&renderer, &collector).run(config)?;
    println!("Scaffolding completed successfully.");
    Ok(())
}
