//! Font selection for the badge label.
//!
//! Fonts are tried in order from a [`FontChain`]; a source that can't be read
//! or parsed falls through to the next one. The chain always ends with the
//! built-in bitmap font, so resolving a font never fails.
use ab_glyph::{point, Font, FontVec, Glyph, Point, PxScale, Rect, ScaleFont};
use std::path::{Path, PathBuf};

mod builtin;

/// Font files tried by default before falling back to the built-in font.
pub const DEFAULT_FONT_PATHS: &[&str] = &[
    "/System/Library/Fonts/Helvetica.ttc",
    "/System/Library/Fonts/SFCompact.ttf",
];

#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("failed to read font file '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse font file '{path}'")]
    Parse {
        path: PathBuf,
        #[source]
        source: ab_glyph::InvalidFont,
    },
}

/// Where a font in the chain comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    File(PathBuf),
    Builtin,
}

impl FontSource {
    fn load(&self) -> Result<LabelFont, FontError> {
        match self {
            FontSource::File(path) => load_font_file(path),
            FontSource::Builtin => Ok(LabelFont::Builtin),
        }
    }
}

impl std::fmt::Display for FontSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FontSource::File(path) => write!(f, "{}", path.display()),
            FontSource::Builtin => write!(f, "<built-in>"),
        }
    }
}

fn load_font_file(path: &Path) -> Result<LabelFont, FontError> {
    let data = std::fs::read(path).map_err(|source| FontError::Io {
        path: path.to_owned(),
        source,
    })?;
    // index 0 also selects the first face of a .ttc collection
    let font = FontVec::try_from_vec_and_index(data, 0).map_err(|source| FontError::Parse {
        path: path.to_owned(),
        source,
    })?;
    Ok(LabelFont::Outline(font))
}

/// An ordered list of font sources, terminated by the built-in font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontChain(Vec<FontSource>);

impl FontChain {
    pub fn new<P: Into<PathBuf>>(paths: impl IntoIterator<Item = P>) -> Self {
        let sources = paths
            .into_iter()
            .map(|p| FontSource::File(p.into()))
            .chain(std::iter::once(FontSource::Builtin))
            .collect();
        FontChain(sources)
    }

    pub fn builtin() -> Self {
        FontChain(vec![FontSource::Builtin])
    }

    pub fn sources(&self) -> &[FontSource] {
        &self.0
    }

    /// Returns the first font in the chain that loads successfully.
    pub fn resolve(&self) -> LabelFont {
        for source in &self.0 {
            match source.load() {
                Ok(font) => {
                    tracing::debug!("using font {}", source);
                    return font;
                }
                Err(error) => {
                    tracing::debug!("font {} unavailable: {}", source, error);
                }
            }
        }
        LabelFont::Builtin
    }
}

impl Default for FontChain {
    fn default() -> Self {
        FontChain::new(DEFAULT_FONT_PATHS.iter().copied())
    }
}

/// A font the badge label can be measured and rendered with.
pub enum LabelFont {
    Outline(FontVec),
    Builtin,
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LabelFont::Outline(_) => write!(f, "LabelFont::Outline"),
            LabelFont::Builtin => write!(f, "LabelFont::Builtin"),
        }
    }
}

impl LabelFont {
    /// Tight pixel bounds of `text` drawn at `px` with its top-left pen
    /// position (ascender line) at the origin. `None` if nothing would be
    /// drawn at all.
    pub fn text_bounds(&self, text: &str, px: f32) -> Option<Rect> {
        match self {
            LabelFont::Outline(font) => layout(font, text, px, point(0.0, 0.0))
                .into_iter()
                .filter_map(|g| font.outline_glyph(g))
                .map(|g| g.px_bounds())
                .reduce(builtin::union),
            LabelFont::Builtin => builtin::text_bounds(text, px),
        }
    }

    /// Renders `text` with its pen origin at `origin`, calling `put` with the
    /// absolute pixel position and coverage (0..=1) of every touched pixel.
    pub fn draw_text(&self, text: &str, px: f32, origin: Point, mut put: impl FnMut(i32, i32, f32)) {
        match self {
            LabelFont::Outline(font) => {
                for glyph in layout(font, text, px, origin) {
                    if let Some(outlined) = font.outline_glyph(glyph) {
                        let bounds = outlined.px_bounds();
                        let (x0, y0) = (bounds.min.x as i32, bounds.min.y as i32);
                        outlined.draw(|x, y, c| put(x0 + x as i32, y0 + y as i32, c));
                    }
                }
            }
            LabelFont::Builtin => builtin::draw_text(text, px, origin, put),
        }
    }
}

fn layout(font: &FontVec, text: &str, px: f32, origin: Point) -> Vec<Glyph> {
    let scale = PxScale::from(px);
    let scaled = font.as_scaled(scale);
    let mut caret = origin.x;
    let mut last = None;
    let mut glyphs = Vec::new();
    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(last) = last {
            caret += scaled.kern(last, id);
        }
        glyphs.push(id.with_scale_and_position(scale, point(caret, origin.y + scaled.ascent())));
        caret += scaled.h_advance(id);
        last = Some(id);
    }
    glyphs
}

/// First outline font file installed on this machine, for tests that exercise
/// real glyph rendering. `None` where no known font file exists.
#[cfg(test)]
pub(crate) fn system_outline_font_path() -> Option<PathBuf> {
    const CANDIDATES: &[&str] = &[
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
        "/System/Library/Fonts/Helvetica.ttc",
        "/System/Library/Fonts/SFCompact.ttf",
        "C:\\Windows\\Fonts\\arialbd.ttf",
    ];
    CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|path| load_font_file(path).is_ok())
}

#[cfg(test)]
pub(crate) fn system_outline_font() -> Option<LabelFont> {
    system_outline_font_path().and_then(|path| load_font_file(&path).ok())
}
