//! The streaming document engine.
//!
//! A [`Document`] owns the output sink, the object table and the page
//! buffer. Objects are allocated with [`Document::reference`], may reference
//! each other freely (including cycles, since references are only ids), and
//! are written to the sink the moment they are finalized. Once `end()` has
//! been called and every allocated object has been finalized, the
//! cross-reference table and trailer are appended exactly once.
//!
//! ```rust
//! use pagewright::{Document, DocumentOptions};
//!
//! # fn main() -> pagewright::Result<()> {
//! let mut doc = Document::new(Vec::new(), DocumentOptions::default())?;
//! doc.add_content("BT /F1 12 Tf 72 720 Td (Hello) Tj ET")?;
//! doc.end()?;
//! let bytes = doc.into_inner()?;
//! assert!(bytes.starts_with(b"%PDF-1.3\n"));
//! assert!(bytes.ends_with(b"%%EOF\n"));
//! # Ok(())
//! # }
//! ```

mod indirect;
mod info;
mod options;
mod state;

pub use indirect::Ref;
pub use info::{Info, InfoValue};
pub use options::DocumentOptions;
pub use state::DocumentState;

use crate::compression;
use crate::encryption::StandardSecurityHandler;
use crate::error::{PdfError, Result};
use crate::objects::{Dictionary, Object};
use crate::page::{Page, PageOptions, ResourceKind};
use crate::structure::{Destination, NameTree};
use crate::version::PdfVersion;
use crate::writer::PdfWriter;
use chrono::Utc;
use indirect::ObjectTable;
use state::Transition;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, trace};

/// Work registered with [`Document::defer`], run by `end()` before the
/// catalog is written.
pub type Finalizer<W> = Box<dyn FnOnce(&mut Document<W>) -> Result<()> + Send>;

pub struct Document<W: Write> {
    writer: PdfWriter<W>,
    table: ObjectTable,
    state: DocumentState,
    version: PdfVersion,
    buffer_pages: bool,
    default_page: PageOptions,
    root: Ref,
    pages: Ref,
    names: Ref,
    viewer_preferences: Option<Ref>,
    encrypt: Option<Ref>,
    info: Info,
    info_ref: Option<Ref>,
    file_id: [u8; 16],
    security: Option<StandardSecurityHandler>,
    page_buffer: Vec<Page>,
    page_buffer_start: usize,
    current_page: Option<usize>,
    deferred: Vec<Finalizer<W>>,
}

impl Document<BufWriter<File>> {
    /// Creates `path` and streams the document into it.
    pub fn create(path: impl AsRef<Path>, options: DocumentOptions) -> Result<Self> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file), options)
    }
}

impl<W: Write> Document<W> {
    pub fn new(sink: W, options: DocumentOptions) -> Result<Self> {
        let info = Info::with_defaults(Utc::now(), &options.info);
        let file_id = info.file_id()?;
        let security = StandardSecurityHandler::create(
            options.owner_password.as_deref(),
            options.user_password.as_deref(),
            &options.permissions,
            options.version,
            &file_id,
        )?;

        let mut table = ObjectTable::new(options.compress && compression::is_available());

        let mut pages = Dictionary::new();
        pages.set("Type", Object::name("Pages"));
        pages.set("Count", 0);
        pages.set("Kids", Vec::<Object>::new());
        let pages = table.allocate(pages);

        let mut names = Dictionary::new();
        names.set("Dests", NameTree::new());
        let names = table.allocate(names);

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::name("Catalog"));
        catalog.set("Pages", pages);
        catalog.set("Names", names);
        if let Some(lang) = &options.lang {
            catalog.set("Lang", lang.as_str());
        }
        let root = table.allocate(catalog);

        let viewer_preferences = if options.display_title {
            let mut prefs = Dictionary::new();
            prefs.set("DisplayDocTitle", true);
            let prefs = table.allocate(prefs);
            if let Ok(catalog) = table.get_mut(root).and_then(|o| o.data_mut()) {
                catalog.set("ViewerPreferences", prefs);
            }
            Some(prefs)
        } else {
            None
        };

        let encrypt = security.as_ref().map(|handler| {
            let r = table.allocate(handler.to_dict());
            if let Ok(object) = table.get_mut(r) {
                object.set_encrypt(false);
            }
            r
        });

        let mut writer = PdfWriter::new_with_writer(sink);
        writer.write_header(options.version)?;

        debug!(
            version = %options.version,
            encrypted = security.is_some(),
            compress = options.compress,
            "document started"
        );

        let mut document = Self {
            writer,
            state: DocumentState::Open {
                outstanding: table.len(),
            },
            table,
            version: options.version,
            buffer_pages: options.buffer_pages,
            default_page: options.page,
            root,
            pages,
            names,
            viewer_preferences,
            encrypt,
            info,
            info_ref: None,
            file_id,
            security,
            page_buffer: Vec::new(),
            page_buffer_start: 0,
            current_page: None,
            deferred: Vec::new(),
        };

        if options.auto_first_page {
            document.add_page()?;
        }
        Ok(document)
    }

    pub fn version(&self) -> PdfVersion {
        self.version
    }

    pub fn state(&self) -> DocumentState {
        self.state
    }

    /// Objects allocated but not yet finalized.
    pub fn outstanding(&self) -> usize {
        self.state.outstanding()
    }

    /// Byte offset of every object, indexed by `id - 1`. Zero until written.
    pub fn offsets(&self) -> &[u64] {
        self.table.offsets()
    }

    /// Bytes written to the sink so far.
    pub fn position(&self) -> u64 {
        self.writer.position()
    }

    pub fn file_id(&self) -> &[u8; 16] {
        &self.file_id
    }

    pub fn info(&self) -> &Info {
        &self.info
    }

    pub fn security(&self) -> Option<&StandardSecurityHandler> {
        self.security.as_ref()
    }

    pub fn root(&self) -> Ref {
        self.root
    }

    pub fn pages(&self) -> Ref {
        self.pages
    }

    /// Returns the sink once the trailer has been written.
    pub fn into_inner(self) -> Result<W> {
        if !self.state.is_closed() {
            return Err(PdfError::ProtocolViolation(format!(
                "document is not finished ({:?})",
                self.state
            )));
        }
        Ok(self.writer.into_inner())
    }

    // ---- objects -------------------------------------------------------

    /// Allocates a new indirect object. The id is fixed now; the object is
    /// written when it is finalized.
    pub fn reference(&mut self, data: Dictionary) -> Result<Ref> {
        self.state.allocate()?;
        let r = self.table.allocate(data);
        trace!(object = r.number(), "object allocated");
        Ok(r)
    }

    /// Mutable access to an object's dictionary until it is finalized.
    pub fn object_mut(&mut self, r: Ref) -> Result<&mut Dictionary> {
        self.state.ensure_live()?;
        self.table.get_mut(r)?.data_mut()
    }

    pub fn object(&self, r: Ref) -> Result<&Dictionary> {
        Ok(self.table.get(r)?.data())
    }

    pub fn is_finalized(&self, r: Ref) -> Result<bool> {
        Ok(!self.table.get(r)?.is_open())
    }

    /// Appends raw bytes to an object's stream.
    pub fn write_to(&mut self, r: Ref, chunk: &[u8]) -> Result<()> {
        self.state.ensure_live()?;
        self.table.get_mut(r)?.write(chunk)
    }

    /// Appends `text` and a newline to an object's stream.
    pub fn write_line(&mut self, r: Ref, text: &str) -> Result<()> {
        let mut chunk = Vec::with_capacity(text.len() + 1);
        chunk.extend_from_slice(text.as_bytes());
        chunk.push(b'\n');
        self.write_to(r, &chunk)
    }

    /// Optionally appends a last chunk, then writes the object to the sink.
    ///
    /// Each object can be finalized once. When `end()` has already been
    /// called, finalizing the last outstanding object writes the trailer.
    pub fn end_object(&mut self, r: Ref, chunk: Option<&[u8]>) -> Result<()> {
        self.state.ensure_live()?;
        let object = self.table.get_mut(r)?;
        if !object.is_open() {
            return Err(PdfError::ProtocolViolation(format!(
                "object {} finalized twice",
                r.id()
            )));
        }
        if let Some(chunk) = chunk {
            object.write(chunk)?;
        }
        self.poison_on_error(|doc| doc.finalize(r))
    }

    fn finalize(&mut self, r: Ref) -> Result<()> {
        let object = self.table.get_mut(r)?;
        let id = object.id();
        let cipher = match (&self.security, object.encrypt()) {
            (Some(handler), true) => Some(handler.object_cipher(id)),
            _ => None,
        };

        let stream = match object.take_stream() {
            Some(data) => {
                let data = if object.compress() {
                    compression::compress(&data)?
                } else {
                    data
                };
                let data = match &cipher {
                    Some(cipher) => cipher.encrypt(&data)?,
                    None => data,
                };
                object.data_mut()?.set("Length", data.len());
                Some(data)
            }
            None => None,
        };

        let offset = self
            .writer
            .write_object(id, object.data(), stream.as_deref(), cipher.as_ref())?;
        object.release();
        self.table.record_offset(id, offset);
        debug!(object = id.number(), offset, "object finalized");

        if self.state.settle()? == Transition::EmitTrailer {
            self.write_trailer()?;
        }
        Ok(())
    }

    /// Runs `op`; an error leaves the sink in an unknown state, so the
    /// document is marked failed.
    fn poison_on_error(&mut self, op: impl FnOnce(&mut Self) -> Result<()>) -> Result<()> {
        let result = op(self);
        if result.is_err() {
            self.state = DocumentState::Failed;
        }
        result
    }

    // ---- pages ---------------------------------------------------------

    /// Adds a page using the document's default page options.
    pub fn add_page(&mut self) -> Result<&Page> {
        let options = self.default_page.clone();
        self.add_page_with(options)
    }

    /// Adds a page and makes it current. Unless pages are buffered, every
    /// earlier page is finalized first.
    pub fn add_page_with(&mut self, options: PageOptions) -> Result<&Page> {
        self.state.ensure_open()?;
        let (width, height) = options.resolve()?;
        if !self.buffer_pages {
            self.flush_pages()?;
        }

        let content = self.reference(Dictionary::new())?;

        let mut resources = Dictionary::new();
        resources.set(
            "ProcSet",
            ["PDF", "Text", "ImageB", "ImageC", "ImageI"]
                .into_iter()
                .map(Object::name)
                .collect::<Vec<_>>(),
        );
        let resources = self.reference(resources)?;

        let mut page = Dictionary::new();
        page.set("Type", Object::name("Page"));
        page.set("Parent", self.pages);
        page.set(
            "MediaBox",
            vec![0.into(), 0.into(), Object::Real(width), Object::Real(height)],
        );
        page.set("Contents", content);
        page.set("Resources", resources);
        let dictionary = self.reference(page)?;

        let pages = self.table.get_mut(self.pages)?.data_mut()?;
        pages.get_or_insert_array("Kids").push(dictionary.into());
        let count = pages.get("Count").and_then(Object::as_integer).unwrap_or(0);
        pages.set("Count", count + 1);

        self.page_buffer.push(Page::new(
            width,
            height,
            options.margins,
            content,
            resources,
            dictionary,
        ));
        let index = self.page_buffer.len() - 1;
        self.current_page = Some(index);
        trace!(page = self.page_buffer_start + index, width, height, "page added");
        Ok(&self.page_buffer[index])
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.current_page.map(|index| &self.page_buffer[index])
    }

    /// Pages added so far, including flushed ones.
    pub fn page_count(&self) -> usize {
        self.page_buffer_start + self.page_buffer.len()
    }

    /// `(start, count)`: the zero-based numbers of the pages still buffered.
    pub fn buffered_page_range(&self) -> (usize, usize) {
        (self.page_buffer_start, self.page_buffer.len())
    }

    /// Makes buffered page `n` (zero-based, counted over the whole document)
    /// current again.
    pub fn switch_to_page(&mut self, n: usize) -> Result<&Page> {
        self.state.ensure_open()?;
        let index = n
            .checked_sub(self.page_buffer_start)
            .filter(|index| *index < self.page_buffer.len())
            .ok_or_else(|| {
                PdfError::Validation(format!(
                    "switch_to_page({n}) out of bounds, current buffer covers pages {} to {}",
                    self.page_buffer_start,
                    (self.page_buffer_start + self.page_buffer.len()).saturating_sub(1)
                ))
            })?;
        self.current_page = Some(index);
        Ok(&self.page_buffer[index])
    }

    /// Finalizes every buffered page: dictionary, resources, then content.
    pub fn flush_pages(&mut self) -> Result<()> {
        self.state.ensure_live()?;
        let pages = std::mem::take(&mut self.page_buffer);
        self.page_buffer_start += pages.len();
        self.current_page = None;
        for page in pages {
            self.end_object(page.dictionary(), None)?;
            self.end_object(page.resources(), None)?;
            self.end_object(page.content(), None)?;
        }
        Ok(())
    }

    fn require_page(&self) -> Result<Page> {
        self.current_page()
            .cloned()
            .ok_or_else(|| PdfError::ProtocolViolation("no current page".to_string()))
    }

    /// Appends an operator line to the current page's content stream.
    pub fn add_content(&mut self, text: &str) -> Result<()> {
        let page = self.require_page()?;
        self.write_line(page.content(), text)
    }

    pub fn write_content(&mut self, bytes: &[u8]) -> Result<()> {
        let page = self.require_page()?;
        self.write_to(page.content(), bytes)
    }

    /// The current page's `/Resources` sub-dictionary of the given kind,
    /// created on first use.
    pub fn page_resource(&mut self, kind: ResourceKind) -> Result<&mut Dictionary> {
        let page = self.require_page()?;
        Ok(self
            .object_mut(page.resources())?
            .get_or_insert_dict(kind.pdf_name()))
    }

    /// The current page's `/Annots` array, created on first use.
    pub fn page_annotations(&mut self) -> Result<&mut Vec<Object>> {
        let page = self.require_page()?;
        Ok(self
            .object_mut(page.dictionary())?
            .get_or_insert_array("Annots"))
    }

    /// Registers `name` in the catalog's `/Dests` tree, pointing into the
    /// current page. Coordinates are measured from the top-left corner.
    pub fn add_named_destination(&mut self, name: impl Into<String>, dest: Destination) -> Result<()> {
        let page = self.require_page()?;
        let array = dest.to_array(page.dictionary().id(), page.height());
        let names = self.object_mut(self.names)?;
        match names.get_mut("Dests") {
            Some(Object::NameTree(tree)) => {
                tree.add(name, Object::Array(array));
                Ok(())
            }
            _ => Err(PdfError::ProtocolViolation(
                "names dictionary has no /Dests tree".to_string(),
            )),
        }
    }

    // ---- closing -------------------------------------------------------

    /// Registers work to run during `end()`, after the pages and info are
    /// written and before the catalog. Finalizers may allocate objects and
    /// leave some of them open; the trailer then waits for them.
    pub fn defer(&mut self, finalizer: impl FnOnce(&mut Document<W>) -> Result<()> + Send + 'static) -> Result<()> {
        self.state.ensure_open()?;
        self.deferred.push(Box::new(finalizer));
        Ok(())
    }

    /// Finishes the document. The trailer is written now when every object
    /// is finalized, or later by the `end_object` call that settles the last
    /// one.
    ///
    /// Any error raised here, including one returned by a deferred
    /// finalizer, leaves the document [`DocumentState::Failed`].
    pub fn end(&mut self) -> Result<()> {
        self.state.ensure_open()?;
        self.poison_on_error(|doc| doc.close_out())
    }

    fn close_out(&mut self) -> Result<()> {
        self.flush_pages()?;

        let info = self.reference(self.info.to_dictionary())?;
        self.info_ref = Some(info);
        self.end_object(info, None)?;

        for finalizer in std::mem::take(&mut self.deferred) {
            finalizer(self)?;
        }

        self.end_object(self.root, None)?;
        self.end_object(self.pages, None)?;
        self.end_object(self.names, None)?;
        if let Some(prefs) = self.viewer_preferences {
            self.end_object(prefs, None)?;
        }
        if let Some(encrypt) = self.encrypt {
            self.end_object(encrypt, None)?;
        }

        let transition = self.state.close()?;
        match transition {
            Transition::EmitTrailer => self.write_trailer(),
            Transition::Continue => {
                debug!(pending = self.state.outstanding(), "end() waiting on open objects");
                Ok(())
            }
        }
    }

    fn write_trailer(&mut self) -> Result<()> {
        let info = self.info_ref.ok_or_else(|| {
            PdfError::ProtocolViolation("trailer requested before the info dictionary".to_string())
        })?;

        let xref = self.writer.write_xref(self.table.offsets())?;

        let mut trailer = Dictionary::new();
        trailer.set("Size", self.table.len() + 1);
        trailer.set("Root", self.root);
        trailer.set("Info", info);
        trailer.set(
            "ID",
            vec![
                Object::ByteString(self.file_id.to_vec()),
                Object::ByteString(self.file_id.to_vec()),
            ],
        );
        if let Some(encrypt) = self.encrypt {
            trailer.set("Encrypt", encrypt);
        }
        self.writer.write_trailer(&trailer, xref)?;
        self.writer.flush()?;

        debug!(objects = self.table.len(), xref, bytes = self.writer.position(), "trailer written");
        Ok(())
    }
}
