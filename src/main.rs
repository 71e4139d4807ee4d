use std::{
    fs::OpenOptions,
    io::{BufRead, BufReader, Write},
    path::PathBuf,
};

use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Target};
use notebook_edit_mcp::state::NotebookTools;
use notebook_edit_mcp::types::McpMessage;

const INSTRUCTIONS: &str = "Jupyter notebook editing and conversion. Every tool takes a notebook \
as ipynb JSON and returns the transformed document; nothing is kept between calls. Use \
set_context first if you want to pass relative file paths.";

/// MCP server exposing Jupyter notebook CRUD and conversion tools.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Where to persist per-session state between runs
    #[arg(long, env = "MCP_SESSION_STORAGE_PATH")]
    session_storage_path: Option<String>,

    /// Append trace logs to this file instead of logging to stderr
    #[arg(long, env = "LOG_LOCATION")]
    log_location: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(log_location) = &args.log_location {
        let path = PathBuf::from(&*shellexpand::tilde(log_location));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Builder::from_default_env()
            .target(Target::Pipe(Box::new(
                OpenOptions::new().create(true).append(true).open(path)?,
            )))
            .init();
    }

    let storage_path = args.session_storage_path.or_else(|| {
        dirs::data_local_dir().map(|dir| {
            dir.join("notebook-edit-mcp")
                .join("sessions.json")
                .to_string_lossy()
                .into_owned()
        })
    });
    let mut state = NotebookTools::new(storage_path.as_deref())?;

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut reader = BufReader::new(stdin);
    let mut line = String::new();

    loop {
        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Ok(_) => {
                log::trace!("<- {line}");
                if let Ok(McpMessage::Request(request)) = serde_json::from_str(&line) {
                    let response = request.execute(&mut state, Some(INSTRUCTIONS));
                    let response_str = serde_json::to_string(&response)?;
                    log::trace!("-> {response_str}");
                    stdout.write_all(response_str.as_bytes())?;
                    stdout.write_all(b"\n")?;
                    stdout.flush()?;
                }
            }
            Err(e) => {
                log::error!("Error reading line: {e}");
                break;
            }
        }
    }

    Ok(())
}
