//! CLI command implementations

use std::path::Path;

use super::args::{Cli, Command};
use super::errors::CliResult;
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::{Event, Logger};
use crate::render;
use crate::store::{version_hash, Document};

/// Dispatch a parsed CLI invocation.
pub fn run_command(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Serve { config } => serve(&config),
        Command::Render { file, plain } => render_document(&file, plain),
        Command::Hash { file } => hash_file(&file),
    }
}

/// Load configuration and serve the HTTP API until the process exits.
pub fn serve(config_path: &Path) -> CliResult<()> {
    let config = HttpServerConfig::load_or_default(config_path)?;
    Logger::info(
        Event::ConfigLoaded.name(),
        &[("path", &config_path.display().to_string()), ("addr", &config.socket_addr())],
    );

    let server = HttpServer::with_config(config);
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.start())?;
    Ok(())
}

/// One-shot: render the attributed view of a fetched document file.
pub fn render_document(file: &Path, plain: bool) -> CliResult<()> {
    let raw = std::fs::read_to_string(file)?;
    let document: Document = serde_json::from_str(&raw)?;

    let view = render::render(document.content(), document.change_history());
    if view.malformed_blocks() > 0 {
        let skipped = view.malformed_blocks().to_string();
        let id = document.id().to_string();
        Logger::warn(
            Event::RenderRecovered.name(),
            &[("document_id", &id), ("skipped_blocks", &skipped)],
        );
    }

    if plain {
        println!("{}", render::strip_markup(view.markup()));
    } else {
        println!("{}", view.markup());
    }
    Ok(())
}

/// One-shot: print the version hash a commit of this content would check
/// against.
pub fn hash_file(file: &Path) -> CliResult<()> {
    let content = std::fs::read_to_string(file)?;
    println!("{}", version_hash(&content));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_hash_file_reads_content() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "hello").unwrap();

        assert!(hash_file(file.path()).is_ok());
    }

    #[test]
    fn test_render_rejects_non_document_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"not\": \"a document\"}}").unwrap();

        let result = render_document(file.path(), false);
        assert!(matches!(result, Err(super::super::errors::CliError::InvalidDocument(_))));
    }

    #[test]
    fn test_render_missing_file_is_io_error() {
        let result = render_document(Path::new("/nonexistent/doc.json"), true);
        assert!(matches!(result, Err(super::super::errors::CliError::Io(_))));
    }
}
