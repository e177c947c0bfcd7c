use crate::error::{Error, Result};
use crate::models::source::{SourceDocument, SourceKind};
use crate::utils::upload::TempDir;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::process::Command;

/// Turns typed text and uploaded documents into plain text. PDF and Word
/// extraction is delegated to `pdftotext` and `libreoffice`.
#[derive(Clone)]
pub struct DocumentService {
    scratch_dir: PathBuf,
}

impl DocumentService {
    pub fn new(scratch_dir: PathBuf) -> Self {
        Self { scratch_dir }
    }

    pub fn typed(&self, text: &str) -> SourceDocument {
        SourceDocument::new(text, SourceKind::Typed)
    }

    pub async fn load(&self, path: &Path, request_id: &str) -> Result<SourceDocument> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        let text = match ext.as_str() {
            "txt" => fs::read_to_string(path).await?,
            "pdf" => self.pdf_to_text(path).await?,
            "docx" => self.docx_to_text(path, request_id).await?,
            _ => {
                return Err(Error::UnsupportedFormat(
                    "Unsupported file format. Use PDF, Word (.docx), or plain text files.".to_string(),
                ))
            }
        };

        Ok(SourceDocument::new(text, SourceKind::File))
    }

    async fn pdf_to_text(&self, path: &Path) -> Result<String> {
        let output = Command::new("pdftotext")
            .arg("-layout")
            .arg(path)
            .arg("-")
            .output()
            .await
            .map_err(|e| Error::Extraction(format!("Failed to run pdftotext: {}", e)))?;

        if !output.status.success() {
            tracing::error!("pdftotext failed: {}", String::from_utf8_lossy(&output.stderr));
            return Err(Error::Extraction("PDF text extraction failed".to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn docx_to_text(&self, path: &Path, request_id: &str) -> Result<String> {
        let out_dir = TempDir::create(&self.scratch_dir, &format!("{}-docx", request_id)).await?;

        let output = Command::new("libreoffice")
            .arg("--headless")
            .arg("--norestore")
            .arg("--convert-to")
            .arg("txt:Text")
            .arg("--outdir")
            .arg(out_dir.path())
            .arg(path)
            .output()
            .await
            .map_err(|e| Error::Extraction(format!("Failed to run libreoffice: {}", e)))?;

        if !output.status.success() {
            return Err(Error::Extraction(format!(
                "LibreOffice text conversion failed: {}",
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        let mut entries = fs::read_dir(out_dir.path()).await?;
        while let Some(entry) = entries.next_entry().await? {
            let p = entry.path();
            if p.extension().and_then(|e| e.to_str()) == Some("txt") {
                return Ok(fs::read_to_string(&p).await?);
            }
        }

        Err(Error::Extraction("LibreOffice produced no text output".to_string()))
    }
}
