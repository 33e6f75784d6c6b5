//! Stickerboard command-line driver.
//!
//! Creates, inspects and edits designs headlessly, and manages a local
//! store of saved creations.

mod script;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use stickerboard_core::{
    Background, CreationId, Document, Editor, EditorConfig, ElementContent, FileStorage, Storage,
};

#[derive(Debug, Parser)]
#[command(name = "stickerboard", version, about = "Compose emoji and sticker designs")]
struct Cli {
    /// Editor configuration file (JSON).
    #[arg(long, global = true, env = "STICKERBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Directory of the creation store. Defaults to the user data directory.
    #[arg(long, global = true, env = "STICKERBOARD_STORE")]
    store: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write an empty design.
    New {
        #[arg(long)]
        out: PathBuf,
    },
    /// Summarize a design file.
    Inspect { design: PathBuf },
    /// Replay an edit script, optionally starting from an existing design.
    Apply {
        #[arg(long)]
        script: PathBuf,
        #[arg(long)]
        design: Option<PathBuf>,
        #[arg(long)]
        out: PathBuf,
    },
    /// Save a design to the creation store.
    Save {
        design: PathBuf,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// Rendered preview, usually a data: URL.
        #[arg(long)]
        data_url: String,
        #[arg(long, default_value = "local")]
        author: String,
        /// Keep the creation out of the public gallery.
        #[arg(long)]
        private: bool,
    },
    /// List stored creations.
    List,
    /// Write a stored creation's design to a file.
    Load {
        id: CreationId,
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
    log::debug!("{cli:?}");

    let config = match &cli.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };

    match cli.command {
        Command::New { out } => {
            let editor = Editor::with_config(config);
            write_design(&editor, &out)?;
            log::info!("Wrote empty design to {}", out.display());
        }
        Command::Inspect { design } => {
            let document = read_document(&design)?;
            print!("{}", describe(&document));
        }
        Command::Apply { script, design, out } => {
            let mut editor = open_editor(config, design.as_deref())?;
            let json = fs::read_to_string(&script)
                .with_context(|| format!("Failed to read {}", script.display()))?;
            let commands = script::parse(&json)?;
            script::run(&mut editor, &commands)?;
            write_design(&editor, &out)?;
            log::info!(
                "Applied {} command(s); {} element(s) written to {}",
                commands.len(),
                editor.document().len(),
                out.display()
            );
        }
        Command::Save { design, title, description, data_url, author, private } => {
            let editor = open_editor(config, Some(design.as_path()))?;
            let request = editor.save_request(title, description, data_url, !private);
            let storage = open_store(cli.store)?;
            let stored = pollster::block_on(storage.save(&author, request))?;
            println!("{}", stored.id);
        }
        Command::List => {
            let storage = open_store(cli.store)?;
            for id in pollster::block_on(storage.list())? {
                let creation = pollster::block_on(storage.load(id))?;
                let visibility = if creation.is_public { "public" } else { "private" };
                println!(
                    "{}  {}  ({}, by {})",
                    creation.id, creation.title, visibility, creation.author
                );
            }
        }
        Command::Load { id, out } => {
            let storage = open_store(cli.store)?;
            let creation = pollster::block_on(storage.load(id))?;
            let mut editor = Editor::with_config(config);
            editor.load(&creation.design_data).context("Stored design is malformed")?;
            write_design(&editor, &out)?;
            log::info!("Wrote \"{}\" to {}", creation.title, out.display());
        }
    }
    Ok(())
}

fn open_store(path: Option<PathBuf>) -> Result<FileStorage> {
    let storage = match path {
        Some(path) => FileStorage::new(path)?,
        None => FileStorage::default_location()?,
    };
    log::debug!("Using store at {}", storage.base_path().display());
    Ok(storage)
}

fn open_editor(config: EditorConfig, design: Option<&Path>) -> Result<Editor> {
    let mut editor = Editor::with_config(config);
    if let Some(path) = design {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        editor
            .load_json(&json)
            .with_context(|| format!("Failed to load design {}", path.display()))?;
    }
    Ok(editor)
}

fn read_document(path: &Path) -> Result<Document> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Document::from_json(&json).with_context(|| format!("Failed to load design {}", path.display()))
}

fn write_design(editor: &Editor, path: &Path) -> Result<()> {
    let json = editor.document().to_json()?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

/// Human-readable summary of a document, one element per line.
fn describe(document: &Document) -> String {
    let background = match document.background() {
        Background::Solid(color) => format!("solid {color}"),
        Background::LinearGradient { from, to } => format!("gradient {from} -> {to}"),
        Background::Image(uri) => format!("image {uri}"),
    };
    let mut out = format!("background: {background}\nelements: {}\n", document.len());
    for (z, element) in document.elements().iter().enumerate() {
        let content = match element.content() {
            ElementContent::Emoji(glyph) => glyph.clone(),
            ElementContent::Sticker(sticker) => sticker.entry().display_name.to_string(),
            ElementContent::Text { text, style } => {
                format!(
                    "{text:?} {} {}px {}",
                    style.font_family.name(),
                    style.font_size,
                    style.color
                )
            }
            ElementContent::Image(uri) => uri.clone(),
        };
        out.push_str(&format!(
            "  {z}: {} {content} at ({}, {}) scale {} rotation {} [{} / {}]\n",
            element.kind(),
            element.position.x,
            element.position.y,
            element.scale,
            element.rotation,
            element.animation,
            element.filter,
        ));
    }
    out
}
