//! Rendering Adapter: turns a frequency mapping plus style options into
//! calls against the layout engine. All geometry lives behind `WordCloud`;
//! this module only resolves colors, masks, and fonts, and saves the result.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage, Rgba, RgbaImage};
use nanorand::{Rng, WyRand};
use tracing::{info, warn};

use crate::config::{Config, Preferences};
use crate::error::Error;
use crate::{Word, WordCloud, WordCloudSize};

/// Style options for one render request.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub max_words: usize,
    pub color_scheme: String,
    pub background_color: String,
    pub mask_path: Option<PathBuf>,
    pub font_path: Option<PathBuf>,
    pub rng_seed: Option<u64>,
    pub scale: f32,
}

impl RenderOptions {
    pub fn new(config: &Config, preferences: &Preferences) -> Self {
        RenderOptions {
            width: config.width,
            height: config.height,
            max_words: preferences.max_words,
            color_scheme: preferences.color_scheme.clone(),
            background_color: preferences.background_color.clone(),
            mask_path: preferences.mask_path.clone(),
            font_path: None,
            rng_seed: None,
            scale: 1.0,
        }
    }
}

/// Render a word cloud for an already-counted frequency mapping.
///
/// Empty frequencies are rejected before the engine (or a font) is touched.
/// A broken mask or an unparseable background color degrades gracefully; a
/// missing font does not, since nothing can be drawn without one.
pub fn render(
    config: &Config,
    frequencies: &[(String, usize)],
    options: &RenderOptions,
) -> Result<RgbaImage, Error> {
    if frequencies.is_empty() || options.max_words == 0 {
        return Err(Error::EmptyFrequencies);
    }
    let keep = frequencies.len().min(options.max_words);
    let frequencies = &frequencies[..keep];

    let size = match options.mask_path.as_deref().and_then(load_mask) {
        Some(mask) => WordCloudSize::FromMask(mask),
        None => WordCloudSize::FromDimensions {
            width: options.width,
            height: options.height,
        },
    };

    let background = parse_color(&options.background_color).unwrap_or_else(|| {
        warn!(
            color = %options.background_color,
            "unrecognized background color, falling back to white"
        );
        Rgba([255, 255, 255, 255])
    });

    let font_path = match &options.font_path {
        Some(path) => path.clone(),
        None => find_system_font().ok_or(Error::FontNotFound)?,
    };

    let mut cloud = WordCloud::from_font_path(font_path)?.with_background_color(background);
    if let Some(seed) = options.rng_seed {
        cloud = cloud.with_rng_seed(seed);
    }

    match config.color_scheme_colors(&options.color_scheme) {
        Some(palette) => {
            let colors = parse_palette(palette);
            if colors.is_empty() {
                return cloud.generate_from_frequencies(frequencies, size, options.scale);
            }
            let pick = move |_: &Word, rng: &mut WyRand| colors[rng.generate_range(0..colors.len())];
            cloud.generate_from_frequencies_with_color_func(frequencies, size, options.scale, pick)
        }
        // "random" or an unknown scheme: the engine's own palette.
        None => cloud.generate_from_frequencies(frequencies, size, options.scale),
    }
}

/// Save to PNG or JPEG based on the file extension. JPEG has no alpha
/// channel, so the image is flattened first.
pub fn save_image(image: &RgbaImage, path: &Path) -> Result<(), Error> {
    let extension = path
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_lowercase);

    let result = match extension.as_deref() {
        Some("jpg") | Some("jpeg") => DynamicImage::ImageRgba8(image.clone()).to_rgb8().save(path),
        _ => image.save(path),
    };

    result.map_err(|source| Error::SaveImage {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a mask image as grayscale. Failure is reported and swallowed: the
/// caller proceeds with the default rectangular canvas.
pub fn load_mask(path: &Path) -> Option<GrayImage> {
    match image::open(path) {
        Ok(img) => {
            info!(path = %path.display(), "using custom mask shape");
            Some(img.to_luma8())
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "could not load mask image, using default rectangular shape"
            );
            None
        }
    }
}

/// Parse a CSS color (name or hex) into an RGBA pixel.
pub fn parse_color(value: &str) -> Option<Rgba<u8>> {
    let color = csscolorparser::parse(value.trim()).ok()?;
    Some(Rgba([
        (color.r * 255.0).round() as u8,
        (color.g * 255.0).round() as u8,
        (color.b * 255.0).round() as u8,
        (color.a * 255.0).round() as u8,
    ]))
}

fn parse_palette(palette: &[&str]) -> Vec<Rgba<u8>> {
    palette
        .iter()
        .filter_map(|value| {
            let parsed = parse_color(value);
            if parsed.is_none() {
                warn!(color = %value, "skipping unparseable palette color");
            }
            parsed
        })
        .collect()
}

/// Look for a usable TTF in the usual places. Explicit `--font` always wins.
pub fn find_system_font() -> Option<PathBuf> {
    const CANDIDATES: &[&str] = &[
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "/Library/Fonts/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ];

    CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|path| path.is_file())
}
