//! DFXML writer for serializing objects to XML.
//!
//! Every namespace registered on the document is declared on the root
//! element; foreign (HFS) elements are written with the prefix registered for
//! their namespace.
//!
//! # Example
//!
//! ```rust
//! use hfs2dfxml::objects::{DFXMLObject, FileObject, ForeignElement, VolumeObject, XMLNS_HFS};
//! use hfs2dfxml::writer::DFXMLWriter;
//!
//! let mut doc = DFXMLObject::new();
//! doc.add_namespace("hfs", XMLNS_HFS);
//!
//! let mut volume = VolumeObject::with_ftype("HFS");
//! let mut file = FileObject::with_filename(":Docs:Hello.txt");
//! file.filesize = Some(42);
//! file.externals
//!     .try_push(ForeignElement::hfs("HFStype_creator", "TEXT/ttxt"))
//!     .unwrap();
//! volume.append_file(file);
//! doc.append_volume(volume);
//!
//! let xml = DFXMLWriter::new().write_to_string(&doc).unwrap();
//! assert!(xml.contains("<hfs:HFStype_creator>TEXT/ttxt</hfs:HFStype_creator>"));
//! ```

use crate::error::Result;
use crate::objects::{
    DFXMLObject, FileObject, ForeignElement, Hashes, LibraryObject, Timestamp, VolumeObject,
    XMLNS_DC,
};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

/// Configuration options for the DFXML writer.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Whether to indent the output for readability
    pub indent: bool,
    /// Indentation string (default: two spaces)
    pub indent_string: String,
    /// Whether to include the XML declaration
    pub xml_declaration: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            indent: true,
            indent_string: "  ".to_string(),
            xml_declaration: true,
        }
    }
}

impl WriterConfig {
    /// Creates a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a compact configuration (no indentation).
    pub fn compact() -> Self {
        Self {
            indent: false,
            indent_string: String::new(),
            xml_declaration: true,
        }
    }

    /// Sets whether to indent the output.
    pub fn with_indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }

    /// Sets whether to emit the XML declaration.
    pub fn with_xml_declaration(mut self, declaration: bool) -> Self {
        self.xml_declaration = declaration;
        self
    }
}

/// DFXML XML writer.
pub struct DFXMLWriter {
    config: WriterConfig,
}

impl DFXMLWriter {
    /// Creates a new writer with default configuration.
    pub fn new() -> Self {
        Self {
            config: WriterConfig::default(),
        }
    }

    /// Creates a new writer with the specified configuration.
    pub fn with_config(config: WriterConfig) -> Self {
        Self { config }
    }

    /// Writes a DFXMLObject to a string.
    pub fn write_to_string(&self, doc: &DFXMLObject) -> Result<String> {
        let mut buffer = Vec::new();
        self.write(doc, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| e.utf8_error().into())
    }

    /// Writes a DFXMLObject to any Write implementation.
    pub fn write<W: Write>(&self, doc: &DFXMLObject, writer: W) -> Result<()> {
        let mut xml_writer = if self.config.indent {
            Writer::new_with_indent(writer, b' ', self.config.indent_string.len())
        } else {
            Writer::new(writer)
        };

        if self.config.xml_declaration {
            xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
            if self.config.indent {
                xml_writer.get_mut().write_all(b"\n")?;
            }
        }

        let mut dfxml_start = BytesStart::new("dfxml");
        dfxml_start.push_attribute(("version", doc.version.as_str()));
        for (prefix, uri) in doc.namespaces() {
            let attr = if prefix.is_empty() {
                "xmlns".to_string()
            } else {
                format!("xmlns:{}", prefix)
            };
            dfxml_start.push_attribute((attr.as_str(), uri));
        }
        xml_writer.write_event(Event::Start(dfxml_start))?;

        self.write_metadata(&mut xml_writer, doc)?;
        self.write_creator(&mut xml_writer, doc)?;

        if !doc.sources.is_empty() {
            xml_writer.write_event(Event::Start(BytesStart::new("source")))?;
            for source in &doc.sources {
                self.write_simple_element(&mut xml_writer, "image_filename", source)?;
            }
            xml_writer.write_event(Event::End(BytesEnd::new("source")))?;
        }

        for vol in doc.volumes() {
            self.write_volume(&mut xml_writer, doc, vol)?;
        }

        xml_writer.write_event(Event::End(BytesEnd::new("dfxml")))?;

        Ok(())
    }

    /// Writes the Dublin Core metadata section.
    fn write_metadata<W: Write>(&self, writer: &mut Writer<W>, doc: &DFXMLObject) -> Result<()> {
        if doc.dc.is_empty() {
            return Ok(());
        }

        let prefix = doc.prefix_for(XMLNS_DC).unwrap_or("dc");
        writer.write_event(Event::Start(BytesStart::new("metadata")))?;
        for (name, value) in &doc.dc {
            self.write_simple_element(writer, &format!("{}:{}", prefix, name), value)?;
        }
        writer.write_event(Event::End(BytesEnd::new("metadata")))?;
        Ok(())
    }

    /// Writes the creator section.
    fn write_creator<W: Write>(&self, writer: &mut Writer<W>, doc: &DFXMLObject) -> Result<()> {
        if doc.program.is_none()
            && doc.program_version.is_none()
            && doc.command_line.is_none()
            && doc.creator_libraries().count() == 0
        {
            return Ok(());
        }

        writer.write_event(Event::Start(BytesStart::new("creator")))?;

        if let Some(ref program) = doc.program {
            self.write_simple_element(writer, "program", program)?;
        }
        if let Some(ref version) = doc.program_version {
            self.write_simple_element(writer, "version", version)?;
        }
        if let Some(ref cmd) = doc.command_line {
            self.write_simple_element(writer, "command_line", cmd)?;
        }

        let libraries: Vec<_> = doc.creator_libraries().collect();
        if !libraries.is_empty() {
            writer.write_event(Event::Start(BytesStart::new("execution_environment")))?;
            for lib in libraries {
                self.write_library(writer, lib)?;
            }
            writer.write_event(Event::End(BytesEnd::new("execution_environment")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("creator")))?;
        Ok(())
    }

    /// Writes a library element.
    fn write_library<W: Write>(&self, writer: &mut Writer<W>, lib: &LibraryObject) -> Result<()> {
        let mut elem = BytesStart::new("library");
        elem.push_attribute(("name", lib.name.as_str()));
        elem.push_attribute(("version", lib.version.as_str()));
        writer.write_event(Event::Empty(elem))?;
        Ok(())
    }

    /// Writes a volume object.
    fn write_volume<W: Write>(
        &self,
        writer: &mut Writer<W>,
        doc: &DFXMLObject,
        vol: &VolumeObject,
    ) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("volume")))?;

        if let Some(block_size) = vol.block_size {
            self.write_simple_element(writer, "block_size", &block_size.to_string())?;
        }
        if let Some(ref ftype_str) = vol.ftype_str {
            self.write_simple_element(writer, "ftype_str", ftype_str)?;
        }
        if let Some(block_count) = vol.block_count {
            self.write_simple_element(writer, "block_count", &block_count.to_string())?;
        }

        for file in vol.files() {
            self.write_file(writer, doc, file)?;
        }

        if let Some(ref error) = vol.error {
            self.write_simple_element(writer, "error", error)?;
        }

        writer.write_event(Event::End(BytesEnd::new("volume")))?;
        Ok(())
    }

    /// Writes a file object.
    fn write_file<W: Write>(
        &self,
        writer: &mut Writer<W>,
        doc: &DFXMLObject,
        file: &FileObject,
    ) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("fileobject")))?;

        if let Some(parent) = file.parent_object {
            writer.write_event(Event::Start(BytesStart::new("parent_object")))?;
            self.write_simple_element(writer, "inode", &parent.to_string())?;
            writer.write_event(Event::End(BytesEnd::new("parent_object")))?;
        }
        if let Some(ref filename) = file.filename {
            self.write_simple_element(writer, "filename", filename)?;
        }
        if let Some(ref error) = file.error {
            self.write_simple_element(writer, "error", error)?;
        }
        if let Some(ref name_type) = file.name_type {
            self.write_simple_element(writer, "name_type", name_type.as_str())?;
        }
        if let Some(filesize) = file.filesize {
            self.write_simple_element(writer, "filesize", &filesize.to_string())?;
        }
        if let Some(alloc) = file.alloc {
            self.write_simple_element(writer, "alloc", if alloc { "1" } else { "0" })?;
        }
        if let Some(inode) = file.inode {
            self.write_simple_element(writer, "inode", &inode.to_string())?;
        }

        for ts in [&file.mtime, &file.crtime].into_iter().flatten() {
            self.write_timestamp(writer, ts)?;
        }

        if let Some(ref libmagic) = file.libmagic {
            self.write_simple_element(writer, "libmagic", libmagic)?;
        }

        self.write_hashes(writer, &file.hashes)?;

        for element in &file.externals {
            self.write_foreign(writer, doc, element)?;
        }

        writer.write_event(Event::End(BytesEnd::new("fileobject")))?;
        Ok(())
    }

    /// Writes a timestamp element.
    fn write_timestamp<W: Write>(&self, writer: &mut Writer<W>, ts: &Timestamp) -> Result<()> {
        let name = ts.name.as_str();
        let mut elem = BytesStart::new(name);
        if let Some(ref prec) = ts.prec {
            elem.push_attribute(("prec", prec.to_string().as_str()));
        }
        writer.write_event(Event::Start(elem))?;
        writer.write_event(Event::Text(BytesText::new(&ts.to_iso8601())))?;
        writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// Writes hash elements.
    fn write_hashes<W: Write>(&self, writer: &mut Writer<W>, hashes: &Hashes) -> Result<()> {
        for (hash_type, value) in hashes.iter() {
            let mut elem = BytesStart::new("hashdigest");
            elem.push_attribute(("type", hash_type.as_str()));
            writer.write_event(Event::Start(elem))?;
            writer.write_event(Event::Text(BytesText::new(value)))?;
            writer.write_event(Event::End(BytesEnd::new("hashdigest")))?;
        }
        Ok(())
    }

    /// Writes an element from a non-DFXML namespace.
    fn write_foreign<W: Write>(
        &self,
        writer: &mut Writer<W>,
        doc: &DFXMLObject,
        element: &ForeignElement,
    ) -> Result<()> {
        match doc.prefix_for(&element.namespace) {
            Some(prefix) if !prefix.is_empty() => {
                let name = format!("{}:{}", prefix, element.tag_name);
                self.write_simple_element(writer, &name, &element.text)
            }
            _ => {
                // Unregistered namespace: declare it inline.
                let mut start = BytesStart::new(element.tag_name.as_str());
                start.push_attribute(("xmlns", element.namespace.as_str()));
                writer.write_event(Event::Start(start))?;
                writer.write_event(Event::Text(BytesText::new(&element.text)))?;
                writer.write_event(Event::End(BytesEnd::new(element.tag_name.as_str())))?;
                Ok(())
            }
        }
    }

    /// Writes a simple text element.
    fn write_simple_element<W: Write>(
        &self,
        writer: &mut Writer<W>,
        name: &str,
        value: &str,
    ) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new(name)))?;
        writer.write_event(Event::Text(BytesText::new(value)))?;
        writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }
}

impl Default for DFXMLWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to write a DFXMLObject to a string.
pub fn to_string(doc: &DFXMLObject) -> Result<String> {
    DFXMLWriter::new().write_to_string(doc)
}

/// Convenience function to write a DFXMLObject to a string without indentation.
pub fn to_string_compact(doc: &DFXMLObject) -> Result<String> {
    DFXMLWriter::with_config(WriterConfig::compact()).write_to_string(doc)
}
