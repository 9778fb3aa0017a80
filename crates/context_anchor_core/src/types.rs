use anyhow::Result;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use std::io::{self, Write};

/// Files of one directory and the import lines of its scanned files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DirectoryRecord {
    /// Immediate child file names, in listing order
    pub files: Vec<String>,
    /// Import lines per scanned file; every key also appears in `files`
    pub dependencies: IndexMap<String, Vec<String>>,
}

/// Flat mapping from relative directory path to its record, in visitation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContextAnchor {
    records: IndexMap<String, DirectoryRecord>,
}

impl ContextAnchor {
    pub fn get(&self, dir: &str) -> Option<&DirectoryRecord> {
        self.records.get(dir)
    }

    pub fn contains(&self, dir: &str) -> bool {
        self.records.contains_key(dir)
    }

    pub fn dirs(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DirectoryRecord)> {
        self.records.iter().map(|(dir, record)| (dir.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn files_seen(&self) -> usize {
        self.records.values().map(|r| r.files.len()).sum()
    }

    pub fn files_scanned(&self) -> usize {
        self.records.values().map(|r| r.dependencies.len()).sum()
    }

    /// Registers a visited directory. Visiting it again keeps its position.
    pub(crate) fn visit(&mut self, dir: String) {
        self.records.entry(dir).or_default();
    }

    pub(crate) fn record_mut(&mut self, dir: String) -> &mut DirectoryRecord {
        self.records.entry(dir).or_default()
    }

    /// Pretty JSON with a two-space indent, keys in insertion order.
    ///
    /// The output is pure ASCII: other characters are written as `\uXXXX` escapes.
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_json(&mut buf)?;
        Ok(String::from_utf8(buf)?)
    }

    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        let mut ser = serde_json::Serializer::with_formatter(writer, AsciiPrettyFormatter::new());
        self.serialize(&mut ser)?;
        Ok(())
    }
}

/// [`PrettyFormatter`] that escapes every non-ASCII character, UTF-16 surrogates included.
struct AsciiPrettyFormatter {
    inner: PrettyFormatter<'static>,
}

impl AsciiPrettyFormatter {
    fn new() -> Self {
        Self { inner: PrettyFormatter::with_indent(b"  ") }
    }
}

impl Formatter for AsciiPrettyFormatter {
    fn write_string_fragment<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut units = [0u16; 2];
        for (start, c) in fragment.char_indices() {
            if c.is_ascii() {
                writer.write_all(&fragment.as_bytes()[start..start + 1])?;
                continue;
            }
            for unit in c.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
        }
        Ok(())
    }

    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }
}
