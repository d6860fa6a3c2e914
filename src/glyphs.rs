use ab_glyph::{point, Font, FontVec, Glyph, GlyphId, Point, PxScale, ScaleFont};
use image::{GrayImage, Luma, Pixel, Rgba, RgbaImage};

/// A laid-out run of glyphs plus its pixel bounding size.
#[derive(Clone, Debug)]
pub struct GlyphData {
    pub glyphs: Vec<Glyph>,
    pub width: u32,
    pub height: u32,
}

pub fn text_to_glyphs(text: &str, font: &FontVec, scale: PxScale) -> GlyphData {
    let scaled_font = font.as_scaled(scale);

    let mut glyphs: Vec<Glyph> = vec![];
    layout_paragraph(scaled_font, point(0.0, 0.0), text, &mut glyphs);

    let (glyphs_width, glyphs_height) = match (glyphs.first(), glyphs.last()) {
        (Some(first), Some(last)) => {
            let min_x = first.position.x;
            let max_x = last.position.x + scaled_font.h_advance(last.id);
            (
                (max_x - min_x).ceil() as u32,
                scaled_font.height().ceil() as u32,
            )
        }
        _ => (0, 0),
    };

    GlyphData {
        glyphs,
        width: glyphs_width,
        height: glyphs_height,
    }
}

/// Mark the glyph coverage in the occupancy buffer. Pixels that would land
/// outside the buffer are clipped.
pub fn draw_glyphs_to_gray_buffer(
    buffer: &mut GrayImage,
    glyph_data: &GlyphData,
    font: &FontVec,
    origin: Point,
) {
    let (width, height) = buffer.dimensions();

    for glyph in glyph_data.glyphs.iter().cloned() {
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();

            outlined.draw(|x, y, coverage| {
                if coverage <= 0.0 {
                    return;
                }
                let final_x = (origin.x + bounds.min.x) as i64 + x as i64;
                let final_y = (origin.y + bounds.min.y) as i64 + y as i64;
                if (0..width as i64).contains(&final_x) && (0..height as i64).contains(&final_y) {
                    buffer.put_pixel(final_x as u32, final_y as u32, Luma([1]));
                }
            })
        }
    }
}

/// Alpha-blend the glyphs into the output image in the given color.
pub fn draw_glyphs_to_rgba_buffer(
    buffer: &mut RgbaImage,
    glyph_data: &GlyphData,
    font: &FontVec,
    origin: Point,
    color: Rgba<u8>,
) {
    let (width, height) = buffer.dimensions();

    for glyph in glyph_data.glyphs.iter().cloned() {
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();

            outlined.draw(|x, y, coverage| {
                let final_x = (origin.x + bounds.min.x) as i64 + x as i64;
                let final_y = (origin.y + bounds.min.y) as i64 + y as i64;
                if !(0..width as i64).contains(&final_x) || !(0..height as i64).contains(&final_y) {
                    return;
                }

                let px = buffer.get_pixel_mut(final_x as u32, final_y as u32);
                px.apply2(&color, |old, new| {
                    ((coverage * new as f32) + (1.0 - coverage) * old as f32) as u8
                });
                if px != &Rgba::from([0; 4]) {
                    px.0[3] = 0xFF;
                }
            })
        }
    }
}

pub fn layout_paragraph<F, SF>(font: SF, position: Point, text: &str, target: &mut Vec<Glyph>)
where
    F: Font,
    SF: ScaleFont<F>,
{
    let v_advance = font.height() + font.line_gap();
    let mut caret = position + point(0.0, font.ascent());
    let mut last_glyph: Option<GlyphId> = None;
    for c in text.chars() {
        if c.is_control() {
            if c == '\n' {
                caret = point(position.x, caret.y + v_advance);
            }
            continue;
        }

        let mut glyph = font.scaled_glyph(c);
        if let Some(previous) = last_glyph.take() {
            caret.x += font.kern(previous, glyph.id);
        }
        glyph.position = caret;
        last_glyph = Some(glyph.id);
        caret.x += font.h_advance(glyph.id);

        target.push(glyph);
    }
}
