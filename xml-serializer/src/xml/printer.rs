//! XML printer that outputs node trees.
//!
//! Compact output puts the whole tree on one line. Pretty output indents
//! element-only content by two spaces per level; an element that holds text
//! is always printed inline so its text survives a round trip untouched.

use std::io::Write;

use crate::node::{NodeRef, XmlContent, XmlElement};

/// Options for XML printing.
#[derive(Debug, Clone, Default)]
pub struct XmlPrinterOptions {
    /// Whether to pretty-print with indentation.
    pub pretty_print: bool,
}

/// XML printer that outputs node trees.
pub struct XmlPrinter<W: Write> {
    writer: W,
    options: XmlPrinterOptions,
    indent: usize,
}

impl<W: Write> XmlPrinter<W> {
    /// Creates a new compact XML printer.
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, XmlPrinterOptions::default())
    }

    /// Creates a new XML printer with the given options.
    pub fn with_options(writer: W, options: XmlPrinterOptions) -> Self {
        XmlPrinter {
            writer,
            options,
            indent: 0,
        }
    }

    /// Prints a node tree preceded by an XML declaration.
    pub fn print(&mut self, root: &NodeRef) -> std::io::Result<()> {
        write!(self.writer, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
        if self.options.pretty_print {
            writeln!(self.writer)?;
        }
        self.print_node(root, self.options.pretty_print)?;
        if !self.options.pretty_print {
            writeln!(self.writer)?;
        }
        self.writer.flush()
    }

    /// Prints a node tree as a fragment (no XML declaration).
    pub fn print_fragment(&mut self, root: &NodeRef) -> std::io::Result<()> {
        self.print_node(root, self.options.pretty_print)?;
        self.writer.flush()
    }

    fn print_node(&mut self, node: &NodeRef, block: bool) -> std::io::Result<()> {
        let borrowed = node.borrow();

        match borrowed.content() {
            XmlContent::Document => {
                for child in borrowed.children() {
                    self.print_node(child, block)?;
                }
            }
            XmlContent::Text(text) => {
                self.start_line(block)?;
                write!(self.writer, "{}", to_entities(text.text()))?;
                self.end_line(block)?;
            }
            XmlContent::Comment(comment) => {
                self.start_line(block)?;
                write!(self.writer, "<!--{}-->", comment.text())?;
                self.end_line(block)?;
            }
            XmlContent::Element(element) => {
                self.start_line(block)?;
                self.start_tag(element)?;

                let children = borrowed.children();
                if children.is_empty() {
                    write!(self.writer, " />")?;
                    return self.end_line(block);
                }
                write!(self.writer, ">")?;

                // Indent only when no text would pick up the whitespace
                let nested_block = block && children.iter().all(|c| !c.borrow().content().is_text());
                if nested_block {
                    writeln!(self.writer)?;
                    self.indent += 1;
                    for child in children {
                        self.print_node(child, true)?;
                    }
                    self.indent -= 1;
                    self.start_line(true)?;
                } else {
                    for child in children {
                        self.print_node(child, false)?;
                    }
                }

                write!(self.writer, "</{}>", element.qname())?;
                self.end_line(block)?;
            }
        }

        Ok(())
    }

    fn start_tag(&mut self, element: &XmlElement) -> std::io::Result<()> {
        write!(self.writer, "<{}", element.qname())?;
        // Sorted for deterministic output
        for name in element.sorted_attribute_names() {
            let value = &element.attributes()[name];
            write!(self.writer, " {}=\"{}\"", name, to_attribute_entities(value))?;
        }
        Ok(())
    }

    fn start_line(&mut self, block: bool) -> std::io::Result<()> {
        if block {
            write!(self.writer, "{}", "  ".repeat(self.indent))?;
        }
        Ok(())
    }

    fn end_line(&mut self, block: bool) -> std::io::Result<()> {
        if block {
            writeln!(self.writer)?;
        }
        Ok(())
    }
}

/// Converts special characters in text content to XML entities.
///
/// `\r` is escaped so parsers do not fold `\r\n` into `\n`.
fn to_entities(s: &str) -> String {
    escape(s, false)
}

/// Converts special characters in an attribute value to XML entities.
///
/// Newlines, carriage returns and tabs are written as character references;
/// parsers replace them with spaces when they appear raw.
fn to_attribute_entities(s: &str) -> String {
    escape(s, true)
}

fn escape(s: &str, attribute: bool) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '\'' => result.push_str("&apos;"),
            '"' => result.push_str("&quot;"),
            '\r' => result.push_str("&#13;"),
            '\n' if attribute => result.push_str("&#10;"),
            '\t' if attribute => result.push_str("&#9;"),
            _ => result.push(c),
        }
    }
    result
}

/// Prints a node tree to a string.
pub fn print_to_string(root: &NodeRef) -> std::io::Result<String> {
    let mut output = Vec::new();
    {
        let mut printer = XmlPrinter::new(&mut output);
        printer.print(root)?;
    }
    Ok(String::from_utf8_lossy(&output).to_string())
}

/// Prints a node tree to a string with pretty printing.
pub fn print_to_string_pretty(root: &NodeRef) -> std::io::Result<String> {
    let mut output = Vec::new();
    {
        let options = XmlPrinterOptions { pretty_print: true };
        let mut printer = XmlPrinter::with_options(&mut output, options);
        printer.print(root)?;
    }
    Ok(String::from_utf8_lossy(&output).to_string())
}
