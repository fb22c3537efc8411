use ab_glyph::FontArc;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

static REGISTRY: OnceCell<FontRegistry> = OnceCell::new();

const SYSTEM_REGULAR: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

const SYSTEM_BOLD: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

// bundled DejaVu Sans, used when no preferred or system font can be loaded
static EMBEDDED_REGULAR: &[u8] = include_bytes!("../../../assets/fonts/DejaVuSans.ttf");
static EMBEDDED_BOLD: &[u8] = include_bytes!("../../../assets/fonts/DejaVuSans-Bold.ttf");

/// Fonts available to the preview renderer.
///
/// Both slots are always filled; the bundled face is the last candidate.
pub struct FontRegistry {
    regular: FontArc,
    bold: FontArc,
}

impl FontRegistry {
    /// Process-wide registry, loaded on first use.
    /// The `font_dir` of the first caller wins.
    pub fn global(font_dir: &Path) -> &'static FontRegistry {
        REGISTRY.get_or_init(|| Self::load(font_dir))
    }

    /// Prefer Inter from `font_dir`, then common system sans-serif fonts,
    /// then the bundled face
    pub fn load(font_dir: &Path) -> Self {
        let regular = first_loadable(
            std::iter::once(font_dir.join("Inter-Regular.ttf"))
                .chain(SYSTEM_REGULAR.iter().map(PathBuf::from)),
        );
        let bold = first_loadable(
            std::iter::once(font_dir.join("Inter-Bold.ttf"))
                .chain(SYSTEM_BOLD.iter().map(PathBuf::from)),
        );

        match (regular, bold) {
            (Some(regular), Some(bold)) => Self { regular, bold },
            (Some(regular), None) => Self {
                bold: regular.clone(),
                regular,
            },
            (None, bold) => {
                tracing::warn!(
                    font_dir = %font_dir.display(),
                    "No preferred font found; using the bundled DejaVu Sans"
                );
                let embedded = Self::embedded();
                Self {
                    regular: embedded.regular,
                    bold: bold.unwrap_or(embedded.bold),
                }
            }
        }
    }

    /// Only the bundled DejaVu Sans faces
    pub fn embedded() -> Self {
        Self {
            regular: FontArc::try_from_slice(EMBEDDED_REGULAR)
                .expect("bundled regular font is a valid TrueType file"),
            bold: FontArc::try_from_slice(EMBEDDED_BOLD)
                .expect("bundled bold font is a valid TrueType file"),
        }
    }

    pub fn regular(&self) -> &FontArc {
        &self.regular
    }

    pub fn bold(&self) -> &FontArc {
        &self.bold
    }
}

fn first_loadable(candidates: impl Iterator<Item = PathBuf>) -> Option<FontArc> {
    candidates.into_iter().find_map(|path| load_font(&path))
}

fn load_font(path: &Path) -> Option<FontArc> {
    let bytes = std::fs::read(path).ok()?;
    match FontArc::try_from_vec(bytes) {
        Ok(font) => {
            tracing::info!(path = %path.display(), "Font registered");
            Some(font)
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Skipping unparsable font");
            None
        }
    }
}
