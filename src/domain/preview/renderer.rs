use super::fonts::FontRegistry;
use super::wrap::{clip_to_width, wrap_summary};
use crate::domain::conversion::ConversionError;
use crate::infrastructure::storage::{ArtifactKind, ArtifactStore, ScopedArtifact};
use ab_glyph::{FontArc, PxScale};
use image::{ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const CANVAS_WIDTH: u32 = 1920;
pub const CANVAS_HEIGHT: u32 = 1080;

const GRADIENT_START: [u8; 3] = [0x0f, 0x17, 0x2a];
const GRADIENT_END: [u8; 3] = [0x1d, 0x4e, 0xd8];

const PANEL_X: u32 = 80;
const PANEL_Y: u32 = 160;
const PANEL_WIDTH: u32 = CANVAS_WIDTH - 160;
const PANEL_HEIGHT: u32 = CANVAS_HEIGHT - 320;
const PANEL_ALPHA: f32 = 0.25;

const TITLE_X: i32 = 140;
const TITLE_Y: i32 = 220;
const TITLE_SIZE: f32 = 80.0;
const TITLE_MAX_WIDTH: f32 = (CANVAS_WIDTH - 280) as f32;
const TITLE_COLOR: [u8; 4] = [0xf8, 0xfa, 0xfc, 0xff];

const BODY_X: i32 = 140;
const BODY_Y: i32 = 360;
const BODY_SIZE: f32 = 36.0;
const BODY_LINE_HEIGHT: i32 = 52;
const BODY_MAX_WIDTH: f32 = (CANVAS_WIDTH - 320) as f32;
const BODY_COLOR: [u8; 4] = [0xe2, 0xe8, 0xf0, 0xff];

/// A preview frame on disk. The file is removed when this value is dropped.
#[derive(Debug)]
pub struct PreviewImage {
    pub filename: String,
    pub line_count: usize,
    file: ScopedArtifact,
}

impl PreviewImage {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub async fn discard(self) {
        self.file.remove().await;
    }
}

/// Draws the single still frame shown for the whole video
pub struct PreviewRenderer {
    store: Arc<ArtifactStore>,
    font_dir: PathBuf,
}

impl PreviewRenderer {
    pub fn new(store: Arc<ArtifactStore>, font_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            font_dir: font_dir.into(),
        }
    }

    pub async fn render(&self, title: &str, summary: &str) -> Result<PreviewImage, ConversionError> {
        let start_time = std::time::Instant::now();
        let title = title.to_string();
        let summary = summary.to_string();
        let font_dir = self.font_dir.clone();

        let (png, line_count) = tokio::task::spawn_blocking(move || {
            let fonts = FontRegistry::global(&font_dir);
            let (canvas, line_count) = compose(&title, &summary, fonts);
            encode_png(&canvas).map(|png| (png, line_count))
        })
        .await
        .map_err(|e| ConversionError::Rendering(format!("render task failed: {}", e)))??;

        let filename = self.store.generate_filename(ArtifactKind::Image);
        let file = ScopedArtifact::new(self.store.path_for(ArtifactKind::Image, &filename));
        tokio::fs::write(file.path(), &png).await?;

        tracing::info!(
            filename = %filename,
            line_count,
            image_size_bytes = png.len(),
            latency_ms = start_time.elapsed().as_millis(),
            "Preview rendered"
        );

        Ok(PreviewImage {
            filename,
            line_count,
            file,
        })
    }
}

/// Draw title and summary on a fresh canvas. Returns the canvas and the
/// number of summary lines drawn.
pub fn compose(title: &str, summary: &str, fonts: &FontRegistry) -> (RgbaImage, usize) {
    let mut canvas = RgbaImage::from_fn(CANVAS_WIDTH, CANVAS_HEIGHT, gradient_at);
    blend_panel(&mut canvas);

    let title_scale = PxScale::from(TITLE_SIZE);
    let title = clip_to_width(title, TITLE_MAX_WIDTH, |s| {
        measure(fonts.bold(), title_scale, s)
    });
    draw_text_mut(
        &mut canvas,
        Rgba(TITLE_COLOR),
        TITLE_X,
        TITLE_Y,
        title_scale,
        fonts.bold(),
        &title,
    );

    let body_scale = PxScale::from(BODY_SIZE);
    let lines = wrap_summary(summary, BODY_MAX_WIDTH, |s| {
        measure(fonts.regular(), body_scale, s)
    });
    for (i, line) in lines.iter().enumerate() {
        draw_text_mut(
            &mut canvas,
            Rgba(BODY_COLOR),
            BODY_X,
            BODY_Y + i as i32 * BODY_LINE_HEIGHT,
            body_scale,
            fonts.regular(),
            line,
        );
    }

    (canvas, lines.len())
}

fn measure(font: &FontArc, scale: PxScale, text: &str) -> f32 {
    text_size(scale, font, text).0 as f32
}

// diagonal gradient from the top-left to the bottom-right corner
fn gradient_at(x: u32, y: u32) -> Rgba<u8> {
    let (w, h) = (CANVAS_WIDTH as f32, CANVAS_HEIGHT as f32);
    let t = ((x as f32 * w + y as f32 * h) / (w * w + h * h)).clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Rgba([
        mix(GRADIENT_START[0], GRADIENT_END[0]),
        mix(GRADIENT_START[1], GRADIENT_END[1]),
        mix(GRADIENT_START[2], GRADIENT_END[2]),
        0xff,
    ])
}

fn blend_panel(canvas: &mut RgbaImage) {
    for y in PANEL_Y..PANEL_Y + PANEL_HEIGHT {
        for x in PANEL_X..PANEL_X + PANEL_WIDTH {
            let pixel = canvas.get_pixel_mut(x, y);
            for channel in pixel.0.iter_mut().take(3) {
                *channel = (*channel as f32 * (1.0 - PANEL_ALPHA) + 255.0 * PANEL_ALPHA).round() as u8;
            }
        }
    }
}

fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>, ConversionError> {
    let mut png = Vec::new();
    canvas
        .write_to(&mut std::io::Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| ConversionError::Rendering(e.to_string()))?;
    Ok(png)
}
