use image::GrayImage;
use nanorand::{Rng, WyRand};

#[derive(Debug)]
pub struct Rect {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

pub fn region_is_empty(
    table: &[u32],
    table_width: usize,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
) -> bool {
    let tl = table[y * table_width + x];
    let tr = table[y * table_width + x + width];

    let bl = table[(y + height) * table_width + x];
    let br = table[(y + height) * table_width + x + width];

    tl as i32 + br as i32 - tr as i32 - bl as i32 == 0
}

/// Pick a free spot for `rect`, uniformly at random over all free spots
/// (reservoir sampling over the full scan). `None` when nothing fits.
///
/// The scan is exclusive at the right and bottom edges: `region_is_empty`
/// reads one cell past the rect, so a rect spanning the full canvas width
/// or height is reported as not fitting rather than indexing out of
/// bounds. Callers shrink the font and retry, which keeps words strictly
/// inside the canvas.
pub fn find_space_for_rect(
    table: &[u32],
    table_width: u32,
    table_height: u32,
    rect: &Rect,
    rng: &mut WyRand,
) -> Option<Point> {
    let max_x = table_width.checked_sub(rect.width)?;
    let max_y = table_height.checked_sub(rect.height)?;

    let mut available_points: u32 = 0;
    let mut random_point = None;

    for y in 0..max_y {
        for x in 0..max_x {
            let empty = region_is_empty(
                table,
                table_width as usize,
                x as usize,
                y as usize,
                rect.width as usize,
                rect.height as usize,
            );
            if empty {
                let random_num = rng.generate_range(0..=available_points);
                if random_num == available_points {
                    random_point = Some(Point { x, y });
                }
                available_points += 1;
            }
        }
    }

    random_point
}

/// https://blog.demofox.org/2018/04/16/prefix-sums-and-summed-area-tables/
///
/// Rows before `start_row` must already hold summed values; the prefix row
/// is seeded from them so a partial rebuild stays consistent.
pub fn to_summed_area_table(table: &mut [u32], width: usize, start_row: usize) {
    let mut prev_row = if start_row == 0 {
        vec![0; width]
    } else {
        table[(start_row - 1) * width..start_row * width].to_vec()
    };

    table
        .chunks_exact_mut(width)
        .skip(start_row)
        .for_each(|row| {
            let mut sum = 0;
            row.iter_mut()
                .zip(prev_row.iter())
                .for_each(|(el, prev_row_el)| {
                    let original_value = *el;
                    *el += sum + prev_row_el;
                    sum += original_value;
                });

            prev_row.clone_from_slice(row)
        });
}

/// Refresh the table after `buffer` changed from `start_row` down: re-copy
/// the raw pixel values for the affected rows, then re-sum them.
pub fn update_summed_area_table(table: &mut [u32], buffer: &GrayImage, start_row: usize) {
    let width = buffer.width() as usize;
    let offset = start_row * width;

    for (el, px) in table[offset..]
        .iter_mut()
        .zip(buffer.as_raw()[offset..].iter())
    {
        *el = *px as u32;
    }

    to_summed_area_table(table, width, start_row);
}

#[cfg(test)]
mod tests {
    use image::Luma;

    use super::*;

    #[test]
    fn summed_area_table_accumulates() {
        let mut table = vec![1; 16];
        to_summed_area_table(&mut table, 4, 0);

        // Bottom-right of an all-ones 4x4 grid is the total count.
        assert_eq!(table[0], 1);
        assert_eq!(table[3], 4);
        assert_eq!(table[15], 16);
    }

    #[test]
    fn empty_region_detection() {
        let mut buffer = GrayImage::new(8, 8);
        buffer.put_pixel(5, 5, Luma([1]));

        let mut table: Vec<u32> = buffer.as_raw().iter().map(|px| *px as u32).collect();
        to_summed_area_table(&mut table, 8, 0);

        assert!(region_is_empty(&table, 8, 0, 0, 4, 4));
        assert!(!region_is_empty(&table, 8, 3, 3, 4, 4));
    }

    #[test]
    fn incremental_update_matches_full_rebuild() {
        let mut buffer = GrayImage::new(6, 6);
        buffer.put_pixel(1, 1, Luma([1]));

        let mut table: Vec<u32> = buffer.as_raw().iter().map(|px| *px as u32).collect();
        to_summed_area_table(&mut table, 6, 0);

        buffer.put_pixel(4, 4, Luma([1]));
        update_summed_area_table(&mut table, &buffer, 4);

        let mut full: Vec<u32> = buffer.as_raw().iter().map(|px| *px as u32).collect();
        to_summed_area_table(&mut full, 6, 0);

        assert_eq!(table, full);
    }

    #[test]
    fn find_space_respects_occupancy() {
        let mut rng = WyRand::new_seed(7);

        let table = vec![0; 10 * 10];
        let rect = Rect {
            width: 3,
            height: 3,
        };
        let spot = find_space_for_rect(&table, 10, 10, &rect, &mut rng).unwrap();
        assert!(spot.x < 10 - 3 && spot.y < 10 - 3);

        // A rect larger than the canvas can never fit.
        let too_big = Rect {
            width: 11,
            height: 2,
        };
        assert!(find_space_for_rect(&table, 10, 10, &too_big, &mut rng).is_none());

        // A rect exactly the canvas size is excluded by the edge-exclusive
        // scan: reported as not fitting, and no out-of-bounds lookup.
        let full_canvas = Rect {
            width: 10,
            height: 10,
        };
        assert!(find_space_for_rect(&table, 10, 10, &full_canvas, &mut rng).is_none());

        let full_width = Rect {
            width: 10,
            height: 3,
        };
        assert!(find_space_for_rect(&table, 10, 10, &full_width, &mut rng).is_none());

        // A fully occupied canvas has no space either.
        let mut occupied = vec![1; 10 * 10];
        to_summed_area_table(&mut occupied, 10, 0);
        assert!(find_space_for_rect(&occupied, 10, 10, &rect, &mut rng).is_none());
    }
}
