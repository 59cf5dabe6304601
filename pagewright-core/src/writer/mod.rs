//! Forward-only PDF byte sink.
//!
//! [`PdfWriter`] counts every byte it pushes so object offsets can be read
//! off the cursor at the moment an object is written. It never seeks.

mod value;

pub use value::{
    encode, encode_dictionary, encode_text, encode_winansi_literal, escape_string, format_number,
    format_pdf_date,
};

use crate::encryption::ObjectCipher;
use crate::error::Result;
use crate::objects::{Dictionary, ObjectId};
use crate::version::PdfVersion;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::trace;

pub struct PdfWriter<W: Write> {
    writer: W,
    current_position: u64,
}

impl<W: Write> PdfWriter<W> {
    pub fn new_with_writer(writer: W) -> Self {
        Self {
            writer,
            current_position: 0,
        }
    }

    /// Bytes written so far.
    pub fn position(&self) -> u64 {
        self.current_position
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// `%PDF-x.y` followed by the binary marker comment.
    pub fn write_header(&mut self, version: PdfVersion) -> Result<()> {
        self.write_bytes(format!("%PDF-{}\n", version.header()).as_bytes())?;
        self.write_bytes(b"%\xFF\xFF\xFF\xFF\n")
    }

    /// Writes one indirect object and returns the offset it starts at.
    pub fn write_object(
        &mut self,
        id: ObjectId,
        dict: &Dictionary,
        stream: Option<&[u8]>,
        cipher: Option<&ObjectCipher>,
    ) -> Result<u64> {
        let offset = self.current_position;
        let body = value::encode_dictionary(dict, cipher)?;

        self.write_bytes(format!("{} {} obj\n", id.number(), id.generation()).as_bytes())?;
        self.write_bytes(&body)?;
        self.write_bytes(b"\n")?;
        if let Some(data) = stream {
            self.write_bytes(b"stream\n")?;
            self.write_bytes(data)?;
            self.write_bytes(b"\nendstream\n")?;
        }
        self.write_bytes(b"endobj\n")?;

        trace!(object = id.number(), offset, "object written");
        Ok(offset)
    }

    /// Cross-reference section for objects `1..=offsets.len()`. Returns the
    /// offset of the `xref` keyword.
    pub fn write_xref(&mut self, offsets: &[u64]) -> Result<u64> {
        let xref_position = self.current_position;
        self.write_bytes(b"xref\n")?;
        self.write_bytes(format!("0 {}\n", offsets.len() + 1).as_bytes())?;
        self.write_bytes(b"0000000000 65535 f \n")?;
        for offset in offsets {
            self.write_bytes(format!("{offset:010} 00000 n \n").as_bytes())?;
        }
        Ok(xref_position)
    }

    pub fn write_trailer(&mut self, trailer: &Dictionary, xref_position: u64) -> Result<()> {
        self.write_bytes(b"trailer\n")?;
        let body = value::encode_dictionary(trailer, None)?;
        self.write_bytes(&body)?;
        self.write_bytes(b"\nstartxref\n")?;
        self.write_bytes(xref_position.to_string().as_bytes())?;
        self.write_bytes(b"\n%%EOF\n")
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.current_position += data.len() as u64;
        Ok(())
    }
}

impl PdfWriter<BufWriter<std::fs::File>> {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::create(path)?;
        Ok(Self::new_with_writer(BufWriter::new(file)))
    }
}
