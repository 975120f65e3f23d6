//! Session storage - JSON lines, one event per line
//!
//! Events may be buffered on disk between live capture and batched reduction.
//! The first line of a file is session metadata; every following line is one
//! `ElementEvent`. A malformed event line is skipped with a warning rather
//! than failing the load: one bad record must not void a recorded session.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

use pagetrace_core::{ElementEvent, RecordedSession};

#[derive(Serialize, Deserialize)]
struct SessionMeta {
    name: String,
    events: usize,
}

pub struct SessionStorage {
    dir: PathBuf,
}

impl SessionStorage {
    pub fn new() -> Result<Self> {
        let home = std::env::var("HOME").context("HOME not set")?;
        Self::with_dir(PathBuf::from(home).join(".pagetrace"))
    }

    pub fn with_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Saves a session, returning the path written.
    pub fn save(&self, session: &RecordedSession) -> Result<PathBuf> {
        let ts = chrono::Utc::now().format("%Y%m%d_%H%M%S");
        let filename = format!("{}_{}.jsonl", sanitize(&session.name), ts);
        let path = self.dir.join(&filename);

        let file = File::create(&path)?;
        let mut w = BufWriter::new(file);

        let meta = SessionMeta {
            name: session.name.clone(),
            events: session.events.len(),
        };
        serde_json::to_writer(&mut w, &meta)?;
        writeln!(w)?;

        for event in &session.events {
            serde_json::to_writer(&mut w, event)?;
            writeln!(w)?;
        }

        w.flush()?;
        Ok(path)
    }

    /// Loads a session by filename, skipping malformed event lines.
    pub fn load(&self, filename: &str) -> Result<RecordedSession> {
        let path = self.dir.join(filename);
        let file = File::open(&path).with_context(|| format!("open {}", path.display()))?;
        let reader = BufReader::new(file);
        let mut lines = reader.lines();

        let meta_line = lines.next().context("empty session file")??;
        let meta: SessionMeta =
            serde_json::from_str(&meta_line).context("session metadata line")?;

        let mut events = Vec::with_capacity(meta.events);
        for (number, line) in lines.enumerate() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<ElementEvent>(&line) {
                Ok(event) => events.push(event),
                Err(err) => {
                    // taxonomy: malformed record, skip and keep the session
                    warn!(file = filename, line = number + 2, %err, "skipping malformed event record");
                }
            }
        }

        Ok(RecordedSession {
            name: meta.name,
            events,
        })
    }

    /// Lists stored session filenames, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                if name.ends_with(".jsonl") {
                    files.push(name.to_string());
                }
            }
        }
        files.sort();
        Ok(files)
    }

    pub fn delete(&self, filename: &str) -> Result<()> {
        fs::remove_file(self.dir.join(filename))?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }
}

fn sanitize(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
