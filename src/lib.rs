// src/lib.rs

//! Section-scoped typed accessors over XML configuration files.
//!
//! This crate parses an XML configuration file once into an in-memory tree
//! and answers typed lookups (`i32`, `i64`, `bool`, `String`, lists and
//! attribute-keyed maps) against one named section of it. It is a
//! convenience layer over `quick-xml`: no schema validation, no write-back,
//! no XPath, no namespace awareness.
//!
//! Config files follow the simple sectioned form:
//!
//! ```xml
//! <config>
//!   <server>
//!     <host>example.net</host>
//!     <port>8080</port>
//!     <tls>true</tls>
//!   </server>
//! </config>
//! ```
//!
//! ```
//! use xml_config_reader::ConfigReader;
//!
//! let xml = r#"
//! <config>
//!   <server>
//!     <host>example.net</host>
//!     <port>8080</port>
//!     <tls>true</tls>
//!   </server>
//! </config>"#;
//!
//! let reader = ConfigReader::from_str(xml, "server")?;
//! assert_eq!(reader.get_string("host")?, "example.net");
//! assert_eq!(reader.get_i32("port")?, 8080);
//! assert!(reader.get_bool_or(false, "tls"));
//! assert_eq!(reader.get_i32_or(30, "timeout"), 30);
//! # Ok::<(), xml_config_reader::ConfigError>(())
//! ```
//!
//! Repeated child elements are visited with a value [`Cursor`] obtained
//! from [`ConfigReader::step_into`]; see the method docs for the walking
//! pattern.
//!
//! A [`ConfigReader`] is single-threaded mutable state and is not designed
//! for concurrent use from multiple threads.

// --- Crate Modules ---

mod error;
mod model;
mod parser;
mod reader;

// --- Public API Re-exports ---

pub use error::ConfigError;
pub use model::{Document, ElementId};
pub use reader::{ConfigReader, Cursor};
