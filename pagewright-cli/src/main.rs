use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pagewright::writer::encode_winansi_literal;
use pagewright::{
    Destination, Dictionary, Document, DocumentOptions, Object, PageOptions, PageSize, PdfVersion,
    ResourceKind,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pagewright",
    about = "A streaming PDF writer",
    version,
    author
)]
struct Cli {
    /// Log engine events (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct DocumentArgs {
    /// JSON file with document options (see `pagewright config`)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Page size name (A4, LETTER, ...) overriding the config
    #[arg(long)]
    size: Option<String>,

    /// Landscape pages
    #[arg(long)]
    landscape: bool,

    /// PDF version: 1.3, 1.4, 1.5, 1.6, 1.7 or 1.7ext3
    #[arg(long = "pdf-version")]
    pdf_version: Option<PdfVersion>,

    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    author: Option<String>,

    /// Password required to open the document
    #[arg(long)]
    user_password: Option<String>,

    /// Password granting full access
    #[arg(long)]
    owner_password: Option<String>,

    /// Store streams uncompressed
    #[arg(long)]
    no_compress: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a PDF with one line of text per input line
    Create {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Text to include in the PDF
        #[arg(short, long)]
        text: String,

        #[command(flatten)]
        document: DocumentArgs,
    },

    /// Generate a two-page demo PDF with graphics and a named destination
    Demo {
        /// Output file path
        #[arg(short, long, default_value = "demo.pdf")]
        output: PathBuf,

        #[command(flatten)]
        document: DocumentArgs,
    },

    /// Print the default document options as JSON
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Create {
            output,
            text,
            document,
        } => {
            let options = document.resolve()?;
            create(&output, &text, options)?;
            println!("PDF created successfully!");
        }

        Commands::Demo { output, document } => {
            let options = document.resolve()?;
            demo(&output, options)?;
            println!("Demo PDF created successfully!");
        }

        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&DocumentOptions::default())?);
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

impl DocumentArgs {
    /// Config file first, then command-line overrides.
    fn resolve(self) -> Result<DocumentOptions> {
        let mut options = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str::<DocumentOptions>(&json)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => DocumentOptions::default(),
        };

        if let Some(size) = self.size {
            options.page.size = PageSize::Named(size);
        }
        if self.landscape {
            options.page = options.page.landscape();
        }
        if let Some(version) = self.pdf_version {
            options.version = version;
        }
        if let Some(title) = self.title {
            options = options.with_title(title);
        }
        if let Some(author) = self.author {
            options = options.with_author(author);
        }
        if let Some(password) = self.user_password {
            options = options.with_user_password(password);
        }
        if let Some(password) = self.owner_password {
            options = options.with_owner_password(password);
        }
        if self.no_compress {
            options.compress = false;
        }
        debug!(
            version = %options.version,
            compress = options.compress,
            encrypted = options.user_password.is_some() || options.owner_password.is_some(),
            "document options"
        );
        Ok(options)
    }
}

/// Registers a standard Type 1 font on the current page.
fn use_standard_font<W: std::io::Write>(
    doc: &mut Document<W>,
    key: &str,
    base_font: &str,
) -> pagewright::Result<()> {
    let mut font = Dictionary::new();
    font.set("Type", Object::name("Font"));
    font.set("Subtype", Object::name("Type1"));
    font.set("BaseFont", Object::name(base_font));
    font.set("Encoding", Object::name("WinAnsiEncoding"));
    let font = doc.reference(font)?;
    doc.page_resource(ResourceKind::Font)?.set(key, font);
    doc.end_object(font, None)
}

/// Appends a `(text) Tj` line to the current page.
fn show_text<W: std::io::Write>(doc: &mut Document<W>, text: &str) -> pagewright::Result<()> {
    let mut operator = encode_winansi_literal(text);
    operator.extend_from_slice(b" Tj\n");
    doc.write_content(&operator)
}

fn create(output: &Path, text: &str, options: DocumentOptions) -> Result<()> {
    let mut doc = Document::create(output, options)
        .with_context(|| format!("creating {}", output.display()))?;
    use_standard_font(&mut doc, "F1", "Helvetica")?;

    let (left, top) = {
        let page = doc
            .current_page()
            .context("document has no first page")?;
        (page.margins().left, page.height() - page.margins().top)
    };

    doc.add_content("BT")?;
    doc.add_content("/F1 24 Tf 28 TL")?;
    doc.add_content(&format!("{left} {} Td", top - 24.0))?;
    for line in text.lines() {
        show_text(&mut doc, line)?;
        doc.add_content("T*")?;
    }
    doc.add_content("ET")?;

    doc.end()?;
    info!(path = %output.display(), "document written");
    Ok(())
}

fn demo(output: &Path, options: DocumentOptions) -> Result<()> {
    let options = options
        .with_buffer_pages(true)
        .with_info("Subject", "pagewright demo");
    let mut doc = Document::create(output, options)
        .with_context(|| format!("creating {}", output.display()))?;

    // Page 1: a stroked rectangle and a filled circle
    use_standard_font(&mut doc, "F1", "Helvetica-Bold")?;
    doc.add_content("1 0 0 RG 2 w 50 50 200 100 re S")?;
    doc.add_content("0 0 1 rg")?;
    doc.add_content(&circle(300.0, 400.0, 50.0))?;
    doc.add_content("f")?;
    doc.add_content("BT /F1 36 Tf 100 700 Td")?;
    show_text(&mut doc, "pagewright demo")?;
    doc.add_content("ET")?;
    doc.add_named_destination("cover", Destination::default())?;

    // Page 2, then back to page 1 to add a footer once the page count is known
    doc.add_page_with(PageOptions::a4().landscape())?;
    use_standard_font(&mut doc, "F1", "Helvetica")?;
    doc.add_content("BT /F1 16 Tf 72 500 Td")?;
    show_text(&mut doc, "Native Rust PDF generation")?;
    doc.add_content("ET")?;
    doc.add_named_destination("details", Destination::xyz(72.0, 72.0, Some(1.0)))?;

    let (start, count) = doc.buffered_page_range();
    for n in start..start + count {
        doc.switch_to_page(n)?;
        doc.add_content("BT /F1 10 Tf 72 30 Td")?;
        show_text(&mut doc, &format!("Page {} of {}", n + 1, count))?;
        doc.add_content("ET")?;
    }

    doc.end()?;
    info!(path = %output.display(), pages = count, "demo written");
    Ok(())
}

/// Four Bezier arcs approximating a circle.
fn circle(cx: f64, cy: f64, r: f64) -> String {
    let k = r * 0.552_284_75;
    format!(
        "{} {} m {} {} {} {} {} {} c {} {} {} {} {} {} c {} {} {} {} {} {} c {} {} {} {} {} {} c",
        cx + r, cy,
        cx + r, cy + k, cx + k, cy + r, cx, cy + r,
        cx - k, cy + r, cx - r, cy + k, cx - r, cy,
        cx - r, cy - k, cx - k, cy - r, cx, cy - r,
        cx + k, cy - r, cx + r, cy - k, cx + r, cy,
    )
}
