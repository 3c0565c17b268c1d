//! Example: Load, edit and save an application settings file
//!
//! One `serialize` method describes the file layout; the same code loads the
//! file when given a reading session and saves it when given a writing one.
//!
//! Usage: cargo run --example settings [settings.xml]

use std::env;
use std::path::Path;

use xml_serializer::{
    Cursor, Document, NodeHandle, Result, Serializable, Session, XmlPrinterOptions,
};

#[derive(Debug, Default)]
struct Server {
    host: String,
    port: u32,
    tls: bool,
}

impl Serializable for Server {
    fn serialize<N: NodeHandle>(&mut self, cursor: &Cursor<'_, N>) -> Result<()> {
        cursor.attribute("host", &mut self.host)?;
        cursor.attribute_or("port", &mut self.port, 80)?;
        cursor.attribute_or("tls", &mut self.tls, false)
    }
}

#[derive(Debug)]
struct Settings {
    name: String,
    timeout: f64,
    retries: i32,
    servers: Vec<Server>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            name: "untitled".into(),
            timeout: 30.0,
            retries: 3,
            servers: Vec::new(),
        }
    }
}

impl Serializable for Settings {
    fn serialize<N: NodeHandle>(&mut self, cursor: &Cursor<'_, N>) -> Result<()> {
        cursor.child("name")?.scalar(&mut self.name)?;
        cursor.field_or("timeout", &mut self.timeout, 30.0)?;
        cursor.field_or("retries", &mut self.retries, 3)?;
        cursor.sequence("server", &mut self.servers)
    }
}

fn load(path: &Path) -> Result<Settings> {
    let mut settings = Settings::default();
    if path.exists() {
        eprintln!("Loading: {}", path.display());
        let doc = Document::parse_file(path)?;
        Session::read_document(&doc).serialize(&mut settings)?;
    }
    Ok(settings)
}

fn save(settings: &mut Settings, path: &Path) -> Result<()> {
    let doc = Document::new();
    Session::write_document(&doc, "settings").serialize(settings)?;
    doc.save_file(path, XmlPrinterOptions { pretty_print: true })?;
    eprintln!("Saved: {}", path.display());
    Ok(())
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    let path = env::args().nth(1).unwrap_or_else(|| "settings.xml".to_string());
    let path = Path::new(&path);

    let mut settings = load(path)?;
    println!("{:#?}", settings);

    settings.retries += 1;
    if settings.servers.is_empty() {
        settings.servers.push(Server {
            host: "localhost".into(),
            port: 8080,
            tls: false,
        });
    }

    save(&mut settings, path)?;
    Ok(())
}
