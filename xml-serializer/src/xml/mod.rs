//! XML parsing and output.
//!
//! The parser builds a [`Document`](crate::Document) tree from text with
//! quick-xml's streaming reader; the printer writes a tree back out, either
//! compact on one line or indented.

mod parser;
mod printer;

pub use parser::{parse_file, parse_str, XmlParser};
pub use printer::{print_to_string, print_to_string_pretty, XmlPrinter, XmlPrinterOptions};
