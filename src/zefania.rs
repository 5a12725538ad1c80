//! Zefania XML serialization.
//!
//! Layout of the generated document:
//!
//! ```text
//! XMLBIBLE (xsi:noNamespaceSchemaLocation, biblename, status, version, type, revision)
//! ├── INFORMATION (title, description, publisher, date, format, language)
//! └── BIBLEBOOK (bnumber, bname, bsname)
//!     └── CHAPTER (cnumber)
//!         └── VERS (vnumber) text
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::bible::{Bible, BibleInfo, Book, Chapter};
use crate::error::Result;

const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str = "zef2005.xsd";

/// Output formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Spaces per nesting level, or `None` to write everything on one line.
    pub indent: Option<usize>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self { indent: Some(2) }
    }
}

impl WriteOptions {
    pub fn compact() -> Self {
        Self { indent: None }
    }
}

/// Write a [`Bible`] to a file, replacing it if it exists.
pub fn write_zefania<P: AsRef<Path>>(bible: &Bible, path: P, options: WriteOptions) -> Result<()> {
    let file = File::create(path)?;
    write_zefania_to_writer(bible, BufWriter::new(file), options)
}

/// Serialize a [`Bible`] into a `String`.
pub fn to_xml_string(bible: &Bible, options: WriteOptions) -> Result<String> {
    let mut buf = Vec::new();
    write_zefania_to_writer(bible, &mut buf, options)?;
    Ok(String::from_utf8(buf)?)
}

/// Write a [`Bible`] to any [`Write`] destination.
pub fn write_zefania_to_writer<W: Write>(
    bible: &Bible,
    writer: W,
    options: WriteOptions,
) -> Result<()> {
    let mut xml = match options.indent {
        Some(width) => Writer::new_with_indent(writer, b' ', width),
        None => Writer::new(writer),
    };

    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let info = &bible.info;
    let mut root = BytesStart::new("XMLBIBLE");
    root.push_attribute(("xmlns:xsi", XSI_NAMESPACE));
    root.push_attribute(("xsi:noNamespaceSchemaLocation", SCHEMA_LOCATION));
    root.push_attribute(("biblename", info.bible_name.as_str()));
    root.push_attribute(("status", info.status.as_str()));
    root.push_attribute(("version", info.version.as_str()));
    root.push_attribute(("type", info.kind.as_str()));
    root.push_attribute(("revision", info.revision.as_str()));
    xml.write_event(Event::Start(root))?;

    write_information(&mut xml, info)?;
    for book in &bible.books {
        write_book(&mut xml, book)?;
    }

    xml.write_event(Event::End(BytesEnd::new("XMLBIBLE")))?;

    let mut writer = xml.into_inner();
    if options.indent.is_some() {
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

fn write_information<W: Write>(xml: &mut Writer<W>, info: &BibleInfo) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new("INFORMATION")))?;
    write_text_element(xml, BytesStart::new("title"), &info.title)?;
    write_text_element(xml, BytesStart::new("description"), &info.description)?;
    write_text_element(xml, BytesStart::new("publisher"), &info.publisher)?;
    write_text_element(xml, BytesStart::new("date"), &info.date)?;
    write_text_element(xml, BytesStart::new("format"), &info.format)?;
    write_text_element(xml, BytesStart::new("language"), &info.language)?;
    xml.write_event(Event::End(BytesEnd::new("INFORMATION")))?;
    Ok(())
}

fn write_book<W: Write>(xml: &mut Writer<W>, book: &Book) -> Result<()> {
    let number = book.number.to_string();
    let mut elem = BytesStart::new("BIBLEBOOK");
    elem.push_attribute(("bnumber", number.as_str()));
    elem.push_attribute(("bname", book.title.as_str()));
    elem.push_attribute(("bsname", book.short_name.as_str()));
    xml.write_event(Event::Start(elem))?;

    for chapter in &book.chapters {
        write_chapter(xml, chapter)?;
    }

    xml.write_event(Event::End(BytesEnd::new("BIBLEBOOK")))?;
    Ok(())
}

fn write_chapter<W: Write>(xml: &mut Writer<W>, chapter: &Chapter) -> Result<()> {
    let number = chapter.number.to_string();
    let mut elem = BytesStart::new("CHAPTER");
    elem.push_attribute(("cnumber", number.as_str()));

    if chapter.verses.is_empty() {
        xml.write_event(Event::Empty(elem))?;
        return Ok(());
    }

    xml.write_event(Event::Start(elem))?;
    for verse in &chapter.verses {
        let mut vers = BytesStart::new("VERS");
        vers.push_attribute(("vnumber", verse.id.as_str()));
        write_text_element(xml, vers, &verse.text)?;
    }
    xml.write_event(Event::End(BytesEnd::new("CHAPTER")))?;
    Ok(())
}

/// Write `<name attrs>text</name>` on one line.
///
/// Only `<`, `>` and `&` are escaped in text; quotes stay literal.
fn write_text_element<W: Write>(
    xml: &mut Writer<W>,
    start: BytesStart<'_>,
    text: &str,
) -> Result<()> {
    let end = start.to_end().into_owned();
    xml.write_event(Event::Start(start))?;
    xml.write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
    xml.write_event(Event::End(end))?;
    Ok(())
}
