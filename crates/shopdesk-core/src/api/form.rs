//! Multipart form construction for catalog writes.
//!
//! The backend reads booleans as `"1"`/`"0"` and ids as decimal strings.
//! Updates travel as `POST` with a `_method=PUT` field because multipart
//! bodies are not accepted on `PUT`.

use std::path::Path;

use reqwest::multipart::{Form, Part};

use super::ApiError;

/// A file to upload (category/sub-category image, product thumbnail).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = mime_guess::from_path(&file_name).first_raw().map(str::to_string);
        Self {
            file_name,
            mime,
            bytes,
        }
    }

    /// Read a file from disk
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, bytes))
    }

    fn into_part(self) -> Result<Part, ApiError> {
        let part = Part::bytes(self.bytes).file_name(self.file_name);
        match self.mime {
            Some(mime) => Ok(part.mime_str(&mime)?),
            None => Ok(part),
        }
    }
}

/// Ordered text fields and files, converted to a reqwest `Form` on send.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormFields {
    fields: Vec<(&'static str, String)>,
    files: Vec<(&'static str, Upload)>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.fields.push((name, value.into()));
        self
    }

    pub fn opt_text(self, name: &'static str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.text(name, v),
            None => self,
        }
    }

    pub fn id(self, name: &'static str, value: i64) -> Self {
        self.text(name, value.to_string())
    }

    pub fn opt_id(self, name: &'static str, value: Option<i64>) -> Self {
        match value {
            Some(v) => self.id(name, v),
            None => self,
        }
    }

    pub fn flag(self, name: &'static str, value: bool) -> Self {
        self.text(name, if value { "1" } else { "0" })
    }

    pub fn opt_flag(self, name: &'static str, value: Option<bool>) -> Self {
        match value {
            Some(v) => self.flag(name, v),
            None => self,
        }
    }

    pub fn file(mut self, name: &'static str, upload: Option<Upload>) -> Self {
        if let Some(upload) = upload {
            self.files.push((name, upload));
        }
        self
    }

    /// Mark the form as an update (`_method=PUT`)
    pub fn put(self) -> Self {
        self.text("_method", "PUT")
    }

    /// Value of the first text field named `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    pub fn files(&self) -> &[(&'static str, Upload)] {
        &self.files
    }

    pub fn into_form(self) -> Result<Form, ApiError> {
        let mut form = Form::new();
        for (name, value) in self.fields {
            form = form.text(name, value);
        }
        for (name, upload) in self.files {
            form = form.part(name, upload.into_part()?);
        }
        Ok(form)
    }
}
