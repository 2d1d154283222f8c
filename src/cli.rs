use crate::{badge::BadgeStyle, font::FontChain, generate, manifest::DEFAULT_FOLDER};
use std::path::PathBuf;

const DEFAULT_SOURCE_DIR: &str = "OwlUploader/Assets.xcassets/AppIcon.appiconset";
const DEFAULT_DEST_DIR: &str = "OwlUploader/Assets.xcassets/AppIcon-Dev.appiconset";

fn default_source_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SOURCE_DIR)
}

fn default_dest_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DEST_DIR)
}

fn default_folder() -> String {
    DEFAULT_FOLDER.to_owned()
}

fn default_label() -> String {
    BadgeStyle::default().label
}

/// Generate DEV-badged app icons for debug builds.
#[derive(Debug, argh::FromArgs)]
pub struct Args {
    /// source icon set directory
    #[argh(option, default = "default_source_dir()")]
    pub source_dir: PathBuf,
    /// output icon set directory
    #[argh(option, default = "default_dest_dir()")]
    pub dest_dir: PathBuf,
    /// folder value written to each manifest entry
    #[argh(option, default = "default_folder()")]
    pub folder: String,
    /// badge text
    #[argh(option, default = "default_label()")]
    pub label: String,
    /// font file for the badge text, tried in order before the built-in font
    /// (replaces the default system fonts)
    #[argh(option)]
    pub font: Vec<PathBuf>,
    /// print debug diagnostics
    #[argh(switch, short = 'v')]
    pub verbose: bool,
}

impl Args {
    pub fn into_config(self) -> generate::Config {
        let fonts = if self.font.is_empty() {
            FontChain::default()
        } else {
            FontChain::new(self.font)
        };
        generate::Config {
            source_dir: self.source_dir,
            dest_dir: self.dest_dir,
            folder: self.folder,
            style: BadgeStyle::with_label(self.label),
            fonts,
        }
    }
}
