use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::export::{DocumentExporter, NbconvertExporter};
use crate::session::SessionStore;
use serde::{Deserialize, Serialize};

/// Per-session ambient data. Notebook documents never live in server
/// state; every tool call carries its own serialized document.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NotebookSessionData {
    /// Directory that relative file paths resolve against.
    pub context_path: Option<PathBuf>,
}

/// Shared server state handed to each tool invocation.
#[derive(fieldwork::Fieldwork)]
pub struct NotebookTools {
    #[fieldwork(get, get_mut)]
    session_store: SessionStore<NotebookSessionData>,
    exporter: Box<dyn DocumentExporter>,
    default_session_id: &'static str,
}

impl NotebookTools {
    /// Create server state, optionally persisting sessions at
    /// `storage_path`. Rendering goes through `jupyter-nbconvert` unless an
    /// exporter is swapped in with `with_exporter`.
    pub fn new(storage_path: Option<&str>) -> Result<Self> {
        let storage_path = storage_path.map(|s| PathBuf::from(&*shellexpand::tilde(s)));
        Ok(Self {
            session_store: SessionStore::new(storage_path)?,
            exporter: Box::new(NbconvertExporter),
            default_session_id: "default",
        })
    }

    pub fn exporter(&self) -> &dyn DocumentExporter {
        self.exporter.as_ref()
    }

    /// Swap the rendering engine; tests use this to avoid spawning
    /// nbconvert.
    pub fn with_exporter(mut self, exporter: Box<dyn DocumentExporter>) -> Self {
        self.exporter = exporter;
        self
    }

    /// The working context directory for a session, if one has been set.
    pub fn get_context(&mut self, session_id: Option<&str>) -> Result<Option<PathBuf>> {
        let session_id = session_id.unwrap_or(self.default_session_id);
        Ok(self.session_store.get_or_create(session_id)?.context_path)
    }

    /// Set the working context directory for a session.
    pub fn set_context(&mut self, session_id: Option<&str>, path: PathBuf) -> Result<()> {
        let session_id = session_id.unwrap_or(self.default_session_id);
        self.session_store
            .update(session_id, |data| data.context_path = Some(path))
    }

    /// Resolve a user-supplied path: tilde-expanded, and joined onto the
    /// session context when relative.
    pub fn resolve_path(&mut self, path_str: &str, session_id: Option<&str>) -> Result<PathBuf> {
        let path = PathBuf::from(&*shellexpand::tilde(path_str));
        if path.is_absolute() {
            return Ok(path);
        }

        match self.get_context(session_id)? {
            Some(context) => Ok(context.join(path)),
            None => Err(anyhow!(
                "no working context set; call set_context first or use an absolute path"
            )),
        }
    }
}
