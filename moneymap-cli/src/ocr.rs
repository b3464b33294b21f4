//! Tesseract-subprocess implementation of the OCR collaborator.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use anyhow::{bail, Context, Result};
use moneymap_extract::TextRecognizer;

use crate::config::OcrSection;

pub struct TesseractCli {
    command: String,
    languages: String,
    tessdata_dir: Option<PathBuf>,
}

impl TesseractCli {
    pub fn from_config(ocr: &OcrSection) -> Self {
        Self {
            command: ocr.command.clone(),
            languages: ocr.languages.clone(),
            tessdata_dir: ocr.tessdata_dir.clone(),
        }
    }
}

impl TextRecognizer for TesseractCli {
    fn recognize(&self, image: &[u8]) -> Result<String> {
        // tesseract wants a file path, so stage the bytes in a temp file
        let path = std::env::temp_dir().join(format!("moneymap-ocr-{}.png", std::process::id()));
        fs::write(&path, image).with_context(|| format!("write {}", path.display()))?;

        let mut cmd = Command::new(&self.command);
        cmd.arg(&path).arg("stdout").args(["-l", &self.languages]);
        if let Some(dir) = &self.tessdata_dir {
            cmd.arg("--tessdata-dir").arg(dir);
        }

        let out = cmd.output().with_context(|| format!("run {}", self.command));
        let _ = fs::remove_file(&path);
        let out = out?;

        if !out.status.success() {
            bail!(
                "{} failed: {}",
                self.command,
                String::from_utf8_lossy(&out.stderr).trim()
            );
        }
        Ok(String::from_utf8_lossy(&out.stdout).trim().to_string())
    }
}
