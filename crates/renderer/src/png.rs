//! PNG output for the heatmap.
//!
//! The chart SVG is rasterized with resvg onto a tiny-skia pixmap, then encoded
//! as an 8-bit RGBA PNG (color type 6) with a single deflated IDAT chunk.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use heatmap_common::{HeatmapError, HeatmapResult};
use tracing::debug;

use crate::chart::HeatmapChart;
use crate::svg::SvgOptions;

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Render a chart straight to PNG bytes.
pub fn render_png(chart: &HeatmapChart) -> HeatmapResult<Vec<u8>> {
    let svg = chart.to_svg_with(&SvgOptions::new().without_cell_titles())?;
    let pixels = rasterize_svg(&svg, chart.width, chart.height)?;
    encode_png(&pixels, chart.width, chart.height)
}

/// Rasterize SVG markup into straight-alpha RGBA pixels of `width` x `height`.
///
/// The SVG is scaled to fit the target size.
pub fn rasterize_svg(svg: &str, width: u32, height: u32) -> HeatmapResult<Vec<u8>> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)
        .map_err(|e| HeatmapError::Render(format!("SVG parse failed: {}", e)))?;

    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        HeatmapError::Render(format!("Invalid pixmap size {}x{}", width, height))
    })?;

    let size = tree.size();
    let scale_x = width as f32 / size.width();
    let scale_y = height as f32 / size.height();
    let transform = tiny_skia::Transform::from_scale(scale_x, scale_y);

    resvg::render(&tree, transform, &mut pixmap.as_mut());

    // tiny-skia stores premultiplied alpha; PNG wants straight alpha
    let mut rgba = Vec::with_capacity(pixmap.pixels().len() * 4);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    debug!(width, height, "Rasterized SVG");
    Ok(rgba)
}

/// Encode RGBA pixel data (4 bytes per pixel, row-major) as PNG.
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> HeatmapResult<Vec<u8>> {
    if width == 0 || height == 0 {
        return Err(HeatmapError::Render(format!(
            "Invalid image size {}x{}",
            width, height
        )));
    }
    let expected = width as usize * height as usize * 4;
    if pixels.len() != expected {
        return Err(HeatmapError::Render(format!(
            "Pixel buffer has {} bytes, expected {} for {}x{}",
            pixels.len(),
            expected,
            width,
            height
        )));
    }

    let mut png = Vec::with_capacity(expected / 2);
    png.extend_from_slice(&PNG_SIGNATURE);

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.push(8); // bit depth
    ihdr.push(6); // color type (RGBA)
    ihdr.push(0); // compression method
    ihdr.push(0); // filter method
    ihdr.push(0); // interlace method
    write_chunk(&mut png, b"IHDR", &ihdr);

    let idat = deflate_scanlines(pixels, width as usize, height as usize)
        .map_err(|e| HeatmapError::Render(format!("IDAT compression failed: {}", e)))?;
    write_chunk(&mut png, b"IDAT", &idat);

    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Prefix each scanline with filter byte 0 (none) and zlib-compress.
fn deflate_scanlines(pixels: &[u8], width: usize, height: usize) -> std::io::Result<Vec<u8>> {
    let stride = width * 4;
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::fast());
    for row in pixels.chunks_exact(stride).take(height) {
        encoder.write_all(&[0])?;
        encoder.write_all(row)?;
    }
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_short_buffer() {
        assert!(encode_png(&[0; 8], 2, 2).is_err());
    }

    #[test]
    fn test_chunk_layout() {
        let png = encode_png(&[255; 16], 2, 2).unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
        assert_eq!(&png[12..16], b"IHDR");
        assert_eq!(&png[png.len() - 8..png.len() - 4], b"IEND");
    }
}
