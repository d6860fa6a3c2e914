//! Word-cloud generation: a frequency pipeline (`tokenize`) feeding a
//! glyph-layout engine (`WordCloud`), with an interactive shell on top.

use std::{fs, path::PathBuf};

use ab_glyph::{point, FontVec, Point, PxScale};
use image::{GrayImage, Luma, Rgba, RgbaImage};
use nanorand::{Rng, WyRand};
use palette::{Hsl, IntoColor, Pixel, Srgb};
use tracing::debug;

use glyphs::GlyphData;

pub use crate::config::{Config, Preferences};
pub use crate::error::Error;
pub use crate::tokenize::{count_top, Tokenizer};

pub mod app;
pub mod config;
pub mod error;
mod glyphs;
pub mod render;
pub mod samples;
mod sat;
pub mod tokenize;
pub mod ui;

/// A placed word, as seen by color functions.
pub struct Word<'a> {
    pub text: &'a str,
    pub font_size: PxScale,
    pub position: Point,
    /// Frequency relative to the most common word, in `(0, 1]`.
    pub frequency: f32,
    pub index: usize,
    pub(crate) glyphs: GlyphData,
}

pub enum WordCloudSize {
    FromDimensions { width: u32, height: u32 },
    /// Grayscale mask: pixels with luma >= 128 are off-limits, so words
    /// fill the dark silhouette.
    FromMask(GrayImage),
}

/// The layout engine. Sizes words by relative frequency, finds free space
/// for each through a summed-area table, and composites the result.
pub struct WordCloud {
    background_color: Rgba<u8>,
    pub font: FontVec,
    min_font_size: f32,
    max_font_size: Option<f32>,
    font_step: f32,
    word_margin: u32,
    relative_font_scaling: f32,
    rng_seed: Option<u64>,
}

impl WordCloud {
    pub fn new(font: FontVec) -> Self {
        WordCloud {
            background_color: Rgba([255, 255, 255, 255]),
            font,
            min_font_size: 4.0,
            max_font_size: None,
            font_step: 1.0,
            word_margin: 2,
            relative_font_scaling: 0.5,
            rng_seed: None,
        }
    }

    pub fn from_font_path(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        let font_file = fs::read(&path).map_err(|source| Error::FontLoad {
            path: path.clone(),
            source,
        })?;
        let font = FontVec::try_from_vec(font_file).map_err(|_| Error::FontInvalid { path })?;

        Ok(WordCloud::new(font))
    }

    pub fn with_background_color(mut self, value: Rgba<u8>) -> Self {
        self.background_color = value;
        self
    }

    pub fn with_min_font_size(mut self, value: f32) -> Self {
        self.min_font_size = value;
        self
    }

    pub fn with_max_font_size(mut self, value: f32) -> Self {
        self.max_font_size = Some(value);
        self
    }

    pub fn with_font_step(mut self, value: f32) -> Self {
        self.font_step = value;
        self
    }

    pub fn with_word_margin(mut self, value: u32) -> Self {
        self.word_margin = value;
        self
    }

    /// How strongly font size follows frequency: 0 ranks by order only,
    /// 1 scales linearly with relative frequency.
    pub fn with_relative_font_scaling(mut self, value: f32) -> Self {
        self.relative_font_scaling = value.clamp(0.0, 1.0);
        self
    }

    /// Fix the RNG seed so placement and color choice are reproducible.
    pub fn with_rng_seed(mut self, value: u64) -> Self {
        self.rng_seed = Some(value);
        self
    }

    pub fn generate_from_frequencies(
        &self,
        frequencies: &[(String, usize)],
        size: WordCloudSize,
        scale: f32,
    ) -> Result<RgbaImage, Error> {
        self.generate_from_frequencies_with_color_func(frequencies, size, scale, random_color_rgba)
    }

    pub fn generate_from_frequencies_with_color_func<F>(
        &self,
        frequencies: &[(String, usize)],
        size: WordCloudSize,
        scale: f32,
        color_func: F,
    ) -> Result<RgbaImage, Error>
    where
        F: Fn(&Word, &mut WyRand) -> Rgba<u8>,
    {
        let max_count = frequencies
            .iter()
            .map(|(_, count)| *count)
            .max()
            .ok_or(Error::EmptyFrequencies)?;

        // Descending relative frequency; the sort is stable, so the
        // caller's tie order survives.
        let mut normalized: Vec<(&str, f32)> = frequencies
            .iter()
            .map(|(word, count)| (word.as_str(), *count as f32 / max_count as f32))
            .collect();
        normalized.sort_by(|a, b| b.1.total_cmp(&a.1));

        let (mut summed_area_table, mut gray_buffer) = match size {
            WordCloudSize::FromDimensions { width, height } => {
                let buf = GrayImage::from_pixel(width, height, Luma([0]));
                let table = vec![0u32; (width * height) as usize];
                (table, buf)
            }
            WordCloudSize::FromMask(mut mask) => {
                for px in mask.pixels_mut() {
                    px.0[0] = u8::from(px.0[0] >= 128);
                }
                let mut table: Vec<u32> = mask.as_raw().iter().map(|el| *el as u32).collect();
                sat::to_summed_area_table(&mut table, mask.width() as usize, 0);
                (table, mask)
            }
        };

        let (width, height) = gray_buffer.dimensions();

        let mut rng = match self.rng_seed {
            Some(seed) => WyRand::new_seed(seed),
            None => WyRand::new(),
        };

        // Size the largest word from the canvas: lay it out at near-canvas
        // height, then shrink so its width would also fit.
        let mut font_size = {
            let rect = self
                .text_dimensions_at_font_size(normalized[0].0, PxScale::from(height as f32 * 0.95));
            let height_ratio = rect.height as f32 / rect.width.max(1) as f32;
            (width as f32 * height_ratio).min(height as f32 * 0.95)
        };
        if let Some(max) = self.max_font_size {
            font_size = font_size.min(max);
        }

        let mut final_words = Vec::with_capacity(normalized.len());
        let mut last_freq = 1.0_f32;

        for (index, &(text, frequency)) in normalized.iter().enumerate() {
            if index > 0 && self.relative_font_scaling > 0.0 {
                font_size *= self.relative_font_scaling * (frequency / last_freq)
                    + (1.0 - self.relative_font_scaling);
            }

            let placed = loop {
                if font_size < self.min_font_size {
                    break None;
                }

                let glyph_data = glyphs::text_to_glyphs(text, &self.font, PxScale::from(font_size));
                let rect = sat::Rect {
                    width: glyph_data.width + self.word_margin,
                    height: glyph_data.height + self.word_margin,
                };

                match sat::find_space_for_rect(&summed_area_table, width, height, &rect, &mut rng) {
                    Some(pos) => break Some((glyph_data, pos)),
                    None => font_size -= self.font_step,
                }
            };

            let Some((glyph_data, pos)) = placed else {
                debug!(word = text, placed = final_words.len(), "out of space, stopping");
                break;
            };

            let margin = self.word_margin as f32 / 2.0;
            let position = point(pos.x as f32 + margin, pos.y as f32 + margin);

            glyphs::draw_glyphs_to_gray_buffer(&mut gray_buffer, &glyph_data, &self.font, position);
            sat::update_summed_area_table(&mut summed_area_table, &gray_buffer, pos.y as usize);

            final_words.push(Word {
                text,
                font_size: PxScale::from(font_size),
                position,
                frequency,
                index,
                glyphs: glyph_data,
            });
            last_freq = frequency;
        }

        Ok(self.composite(&mut rng, width, height, final_words, scale, color_func))
    }

    fn composite<F>(
        &self,
        rng: &mut WyRand,
        width: u32,
        height: u32,
        words: Vec<Word>,
        scale: f32,
        color_func: F,
    ) -> RgbaImage
    where
        F: Fn(&Word, &mut WyRand) -> Rgba<u8>,
    {
        let mut buffer = RgbaImage::from_pixel(
            (width as f32 * scale) as u32,
            (height as f32 * scale) as u32,
            self.background_color,
        );

        for word in &words {
            let color = color_func(word, rng);

            if (scale - 1.0).abs() < f32::EPSILON {
                glyphs::draw_glyphs_to_rgba_buffer(
                    &mut buffer,
                    &word.glyphs,
                    &self.font,
                    word.position,
                    color,
                );
            } else {
                // Re-layout at the scaled size so enlarged output stays
                // crisp instead of upsampling coverage.
                let scaled = glyphs::text_to_glyphs(
                    word.text,
                    &self.font,
                    PxScale::from(word.font_size.x * scale),
                );
                let position = point(word.position.x * scale, word.position.y * scale);
                glyphs::draw_glyphs_to_rgba_buffer(
                    &mut buffer,
                    &scaled,
                    &self.font,
                    position,
                    color,
                );
            }
        }

        buffer
    }

    fn text_dimensions_at_font_size(&self, text: &str, font_size: PxScale) -> sat::Rect {
        let glyph_data = glyphs::text_to_glyphs(text, &self.font, font_size);
        sat::Rect {
            width: glyph_data.width + self.word_margin,
            height: glyph_data.height + self.word_margin,
        }
    }
}

/// Default coloring: a fully saturated hue picked at random per word.
pub fn random_color_rgba(_: &Word, rng: &mut WyRand) -> Rgba<u8> {
    let hue: u8 = rng.generate_range(0..255);

    let col = Hsl::new(hue as f32, 1.0, 0.5);
    let rgb: Srgb = col.into_color();

    let raw: [u8; 3] = rgb.into_format().into_raw();

    Rgba([raw[0], raw[1], raw[2], 255])
}
