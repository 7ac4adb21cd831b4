// src/error.rs

use std::fmt;
use std::io;
use std::path::PathBuf;

use quick_xml::Error as XmlError;
use quick_xml::encoding::EncodingError;
use quick_xml::escape::EscapeError;
use quick_xml::events::attributes::AttrError;

/// Errors that can occur while loading or querying a configuration document.
///
/// The variants up to and including `Malformed` are construction-time
/// failures (the file could not be read or is not well-formed XML); the rest
/// are lookup failures raised by the typed accessors.
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    Io {
        path: PathBuf,
        source: io::Error,
    },

    /// An error from the underlying `quick-xml` reader (syntax, encoding).
    Xml(XmlError),

    /// An attribute was malformed (e.g., unquoted or duplicated).
    Attr(AttrError),

    /// An escape sequence or character reference could not be decoded.
    Escape(EscapeError),

    /// Text content could not be decoded to UTF-8.
    Encoding(EncodingError),

    /// A structural defect the XML reader does not itself reject
    /// (e.g., no top-level element, or more than one).
    Malformed(&'static str),

    /// A required named element does not exist in the current scope.
    ElementNotFound { element: String },

    /// An element's text does not convert to the requested scalar type.
    ParseValue {
        element: String,
        value: String,
        target: &'static str,
    },

    /// A structural failure while assembling a list or map
    /// (e.g., a keyed attribute is missing and skipping is not allowed).
    Read(String),
}

impl From<XmlError> for ConfigError {
    fn from(e: XmlError) -> Self {
        ConfigError::Xml(e)
    }
}

impl From<AttrError> for ConfigError {
    fn from(e: AttrError) -> Self {
        ConfigError::Attr(e)
    }
}

impl From<EscapeError> for ConfigError {
    fn from(e: EscapeError) -> Self {
        ConfigError::Escape(e)
    }
}

impl From<EncodingError> for ConfigError {
    fn from(e: EncodingError) -> Self {
        ConfigError::Encoding(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(
                    f,
                    "failed to read configuration file {}: {}",
                    path.display(),
                    source
                )
            }
            ConfigError::Xml(e) => write!(f, "XML parsing error: {}", e),
            ConfigError::Attr(e) => write!(f, "XML attribute error: {}", e),
            ConfigError::Escape(e) => write!(f, "XML escape error: {}", e),
            ConfigError::Encoding(e) => write!(f, "XML encoding error: {}", e),
            ConfigError::Malformed(msg) => {
                write!(f, "malformed configuration document: {}", msg)
            }
            ConfigError::ElementNotFound { element } => {
                write!(f, "element '{}' does not exist", element)
            }
            ConfigError::ParseValue {
                element,
                value,
                target,
            } => write!(
                f,
                "element '{}' has value '{}' which is not a valid {}",
                element, value, target
            ),
            ConfigError::Read(msg) => write!(f, "error reading configuration values: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Xml(e) => Some(e),
            ConfigError::Attr(e) => Some(e),
            ConfigError::Escape(e) => Some(e),
            ConfigError::Encoding(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ConfigError;
    use quick_xml::Reader;
    use quick_xml::events::Event;

    /// Produces a real reader-level error by parsing mismatched tags.
    fn make_xml_error() -> quick_xml::Error {
        let mut reader = Reader::from_str("<a></b>");
        loop {
            match reader.read_event() {
                Err(e) => return e,
                Ok(Event::Eof) => panic!("expected the reader to fail"),
                Ok(_) => {}
            }
        }
    }

    #[test]
    fn test_from_xml_error() {
        let err: ConfigError = make_xml_error().into();
        assert!(matches!(err, ConfigError::Xml(_)));
    }

    #[test]
    fn test_display_element_not_found() {
        let err = ConfigError::ElementNotFound {
            element: "port".to_string(),
        };
        assert_eq!(err.to_string(), "element 'port' does not exist");
    }

    #[test]
    fn test_display_parse_value() {
        let err = ConfigError::ParseValue {
            element: "age".to_string(),
            value: "notanumber".to_string(),
            target: "32-bit integer",
        };
        assert_eq!(
            err.to_string(),
            "element 'age' has value 'notanumber' which is not a valid 32-bit integer"
        );
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error;
        let err: ConfigError = make_xml_error().into();
        assert!(err.source().is_some());

        let err = ConfigError::Read("boom".to_string());
        assert!(err.source().is_none());
    }
}
