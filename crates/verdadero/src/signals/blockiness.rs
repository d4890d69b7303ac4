//! 8x8 compression-blockiness estimate.
//!
//! Recompressed or spliced media shows luma discontinuities along the 8x8
//! DCT block grid. For every block the mean luma of the last interior
//! column/row is compared against the first exterior column/row; jumps
//! above the threshold count as blocky. Two boundaries (right, bottom) are
//! checked per block.

use super::config::BlockinessThresholds;
use crate::pixel::PixelBuffer;

/// Side length of a compression block.
pub const BLOCK_SIZE: u32 = 8;

/// Blocky-boundary density over the 8x8 grid, in [0, 100].
#[must_use]
pub fn blockiness_score(buffer: &PixelBuffer, config: &BlockinessThresholds) -> f64 {
    let width = buffer.width();
    let height = buffer.height();
    let blocks_x = width / BLOCK_SIZE;
    let blocks_y = height / BLOCK_SIZE;
    let block_count = u64::from(blocks_x) * u64::from(blocks_y);
    if block_count == 0 {
        return 0.0;
    }

    let mut blocky = 0u64;

    for by in 0..blocks_y {
        for bx in 0..blocks_x {
            let x0 = bx * BLOCK_SIZE;
            let y0 = by * BLOCK_SIZE;

            // Right boundary: last column inside vs first column outside.
            let x_in = x0 + BLOCK_SIZE - 1;
            let x_out = x0 + BLOCK_SIZE;
            if x_out < width {
                let inside = column_mean(buffer, x_in, y0, BLOCK_SIZE);
                let outside = column_mean(buffer, x_out, y0, BLOCK_SIZE);
                if (inside - outside).abs() > config.edge_threshold {
                    blocky += 1;
                }
            }

            // Bottom boundary: last row inside vs first row outside.
            let y_in = y0 + BLOCK_SIZE - 1;
            let y_out = y0 + BLOCK_SIZE;
            if y_out < height {
                let inside = row_mean(buffer, y_in, x0, BLOCK_SIZE);
                let outside = row_mean(buffer, y_out, x0, BLOCK_SIZE);
                if (inside - outside).abs() > config.edge_threshold {
                    blocky += 1;
                }
            }
        }
    }

    blocky as f64 / (2.0 * block_count as f64) * 100.0
}

fn column_mean(buffer: &PixelBuffer, x: u32, y0: u32, len: u32) -> f64 {
    let mut sum = 0.0;
    for y in y0..y0 + len {
        sum += buffer.luma(x, y);
    }
    sum / f64::from(len)
}

fn row_mean(buffer: &PixelBuffer, y: u32, x0: u32, len: u32) -> f64 {
    let mut sum = 0.0;
    for x in x0..x0 + len {
        sum += buffer.luma(x, y);
    }
    sum / f64::from(len)
}
