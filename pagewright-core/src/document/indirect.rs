//! Indirect objects and the arena that owns them.

use crate::error::{PdfError, Result};
use crate::objects::{Dictionary, Object, ObjectId};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

static NEXT_DOCUMENT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Handle to an indirect object of one particular document.
///
/// Handles are plain ids; the object itself stays in the document's table.
/// Using a handle with a different document is a protocol violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ref {
    id: ObjectId,
    document: u64,
}

impl Ref {
    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn number(&self) -> u32 {
        self.id.number()
    }
}

impl From<Ref> for Object {
    fn from(r: Ref) -> Self {
        Object::Reference(r.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ObjectState {
    Open,
    Finalized,
}

#[derive(Debug)]
pub(crate) struct IndirectObject {
    id: ObjectId,
    data: Dictionary,
    chunks: Vec<Vec<u8>>,
    uncompressed_length: usize,
    compress: bool,
    encrypt: bool,
    state: ObjectState,
}

impl IndirectObject {
    fn new(id: ObjectId, data: Dictionary, compress: bool) -> Self {
        let compress = compress && !data.contains_key("Filter");
        Self {
            id,
            data,
            chunks: Vec::new(),
            uncompressed_length: 0,
            compress,
            encrypt: true,
            state: ObjectState::Open,
        }
    }

    pub(crate) fn id(&self) -> ObjectId {
        self.id
    }

    pub(crate) fn is_open(&self) -> bool {
        self.state == ObjectState::Open
    }

    pub(crate) fn compress(&self) -> bool {
        self.compress
    }

    pub(crate) fn encrypt(&self) -> bool {
        self.encrypt
    }

    pub(crate) fn set_encrypt(&mut self, encrypt: bool) {
        self.encrypt = encrypt;
    }

    pub(crate) fn data(&self) -> &Dictionary {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> Result<&mut Dictionary> {
        self.ensure_open("modify")?;
        Ok(&mut self.data)
    }

    /// Appends a stream chunk. `/Length` tracks the uncompressed total until
    /// the object is finalized.
    pub(crate) fn write(&mut self, chunk: &[u8]) -> Result<()> {
        self.ensure_open("write to")?;
        self.uncompressed_length += chunk.len();
        self.chunks.push(chunk.to_vec());
        self.data.set("Length", self.uncompressed_length);
        if self.compress {
            self.data.set("Filter", Object::name("FlateDecode"));
        }
        trace!(object = self.id.number(), bytes = chunk.len(), "chunk buffered");
        Ok(())
    }

    /// Concatenated stream bytes, or `None` when nothing was written.
    pub(crate) fn take_stream(&mut self) -> Option<Vec<u8>> {
        if self.chunks.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.chunks).concat())
    }

    /// Marks the object written and drops its buffers.
    pub(crate) fn release(&mut self) {
        self.state = ObjectState::Finalized;
        self.data = Dictionary::new();
        self.chunks = Vec::new();
    }

    fn ensure_open(&self, action: &str) -> Result<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(PdfError::ProtocolViolation(format!(
                "cannot {action} object {} after it was finalized",
                self.id
            )))
        }
    }
}

/// Objects indexed by `id - 1`, plus the byte offset each one was written at.
#[derive(Debug)]
pub(crate) struct ObjectTable {
    token: u64,
    compress: bool,
    objects: Vec<IndirectObject>,
    offsets: Vec<u64>,
}

impl ObjectTable {
    pub(crate) fn new(compress: bool) -> Self {
        Self {
            token: NEXT_DOCUMENT_TOKEN.fetch_add(1, Ordering::Relaxed),
            compress,
            objects: Vec::new(),
            offsets: Vec::new(),
        }
    }

    pub(crate) fn allocate(&mut self, data: Dictionary) -> Ref {
        let id = ObjectId::new(self.objects.len() as u32 + 1, 0);
        self.objects.push(IndirectObject::new(id, data, self.compress));
        self.offsets.push(0);
        Ref {
            id,
            document: self.token,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.objects.len()
    }

    pub(crate) fn get(&self, r: Ref) -> Result<&IndirectObject> {
        let index = self.index_of(r)?;
        Ok(&self.objects[index])
    }

    pub(crate) fn get_mut(&mut self, r: Ref) -> Result<&mut IndirectObject> {
        let index = self.index_of(r)?;
        Ok(&mut self.objects[index])
    }

    pub(crate) fn record_offset(&mut self, id: ObjectId, offset: u64) {
        if let Some(slot) = self.offsets.get_mut(id.number() as usize - 1) {
            *slot = offset;
        }
    }

    pub(crate) fn offsets(&self) -> &[u64] {
        &self.offsets
    }

    fn index_of(&self, r: Ref) -> Result<usize> {
        if r.document != self.token {
            return Err(PdfError::ProtocolViolation(format!(
                "object {} belongs to another document",
                r.id
            )));
        }
        let index = (r.id.number() as usize)
            .checked_sub(1)
            .filter(|index| *index < self.objects.len())
            .ok_or(PdfError::InvalidObjectReference(
                r.id.number(),
                r.id.generation(),
            ))?;
        Ok(index)
    }
}
