use serde::{Deserialize, Serialize};

/// Options for reading a GPX document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadOptions {
    /// Attach the `<ele>` child as the z dimension when present (default: true)
    #[serde(default = "default_true")]
    pub with_elevation: bool,

    /// Attach the `<time>` child, unparsed, as the m dimension when present
    /// (default: true)
    #[serde(default = "default_true")]
    pub with_timestamp: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            with_elevation: true,
            with_timestamp: true,
        }
    }
}

/// Options for serializing a GPX document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriterConfig {
    /// Attributes placed verbatim on the root `<gpx>` element.
    pub root_attributes: Vec<(String, String)>,

    /// Spaces of indentation per nesting level; `None` writes a single line.
    pub indent: Option<usize>,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            root_attributes: vec![
                (
                    "xmlns".to_string(),
                    "http://www.topografix.com/GPX/1/1".to_string(),
                ),
                ("version".to_string(), "1.1".to_string()),
                ("creator".to_string(), "gpx2geo".to_string()),
            ],
            indent: Some(2),
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = ReadOptions::default();
        assert!(opts.with_elevation);
        assert!(opts.with_timestamp);
    }

    #[test]
    fn test_omitted_fields_default_to_true() {
        let opts: ReadOptions = serde_json::from_str("{}").unwrap();
        assert!(opts.with_elevation);
        assert!(opts.with_timestamp);

        let opts: ReadOptions =
            serde_json::from_str(r#"{"withElevation": false}"#).unwrap();
        assert!(!opts.with_elevation);
        assert!(opts.with_timestamp);
    }

    #[test]
    fn test_writer_config_default_attributes() {
        let config = WriterConfig::default();
        assert!(config
            .root_attributes
            .iter()
            .any(|(k, v)| k == "version" && v == "1.1"));
        assert_eq!(config.indent, Some(2));
    }
}
