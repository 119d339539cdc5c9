use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml serialization failed: {0}")]
    Yaml(String),

    #[error("writing output failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn render<T: Serialize>(&self, value: &T) -> Result<String, OutputError> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => {
                serde_saphyr::to_string(value).map_err(|e| OutputError::Yaml(e.to_string()))
            }
        }
    }

    pub fn write<T, W>(&self, value: &T, out: &mut W) -> Result<(), OutputError>
    where
        T: Serialize,
        W: Write,
    {
        let rendered = self.render(value)?;
        writeln!(out, "{}", rendered.trim_end())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_uses_two_space_indent() {
        let rendered = OutputFormat::Json.render(&json!([{ "title": "A" }])).unwrap();
        assert_eq!(rendered, "[\n  {\n    \"title\": \"A\"\n  }\n]");
    }

    #[test]
    fn yaml_renders_mappings() {
        let rendered = OutputFormat::Yaml.render(&json!({ "title": "A" })).unwrap();
        assert!(rendered.contains("title:"));
        assert!(rendered.contains('A'));
    }

    #[test]
    fn write_appends_single_newline() {
        let mut out = Vec::new();
        OutputFormat::Json.write(&json!([]), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
    }
}
