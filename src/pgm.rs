//! Writes a stack of rasters out as one PGM graymap.  The rasters are
//! laid down in the order given, top to bottom, with no interleaving.
//!
//! The caller declares the size of the finished image.  When the
//! rasters don't add up to exactly that size (band heights are floored
//! separately, so they can come up a row short) we write what both
//! agree on: no more columns than the narrowest raster has, no more
//! rows than the rasters hold, and never more than declared.  The
//! header always describes the samples that follow it.

use image::pnm::PNMEncoder;
use image::pnm::{PNMSubtype, SampleEncoding};
use image::ColorType;
use itertools::Itertools;
use log::{debug, warn};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::RenderError;
use crate::escape::MAX_GRAY;
use crate::planes::Dimensions;
use crate::raster::Raster;

/// The dimensions that will actually be written for a declared size.
pub fn clamp(rasters: &[Raster], width: usize, height: usize) -> Dimensions {
    let narrowest = rasters.iter().map(Raster::width).min().unwrap_or(0);
    let rows: usize = rasters.iter().map(Raster::height).sum();
    let written = Dimensions(width.min(narrowest), height.min(rows));
    if written != Dimensions(width, height) {
        warn!(
            "Declared {}x{} but rasters hold {}x{}; writing {}x{}",
            width, height, narrowest, rows, written.0, written.1
        );
    }
    written
}

fn rows<'a>(rasters: &'a [Raster], size: Dimensions) -> impl Iterator<Item = &'a [u8]> + 'a {
    rasters
        .iter()
        .flat_map(|raster| raster.rows())
        .take(size.1)
        .map(move |row| &row[..size.0])
}

/// Write the plain-text (`P2`) form: a three line header, then one
/// line of space-separated samples per row.
pub fn write_text<W: Write>(mut out: W, rasters: &[Raster], size: Dimensions) -> io::Result<()> {
    write!(out, "P2\n{} {}\n{}\n", size.0, size.1, MAX_GRAY)?;
    for row in rows(rasters, size) {
        writeln!(out, "{}", row.iter().join(" "))?;
    }
    out.flush()
}

/// Save the rasters as a plain-text graymap at `path`.  Returns the
/// dimensions written.
pub fn save<P: AsRef<Path>>(
    rasters: &[Raster],
    width: usize,
    height: usize,
    path: P,
) -> Result<Dimensions, RenderError> {
    let path = path.as_ref();
    let size = clamp(rasters, width, height);
    let output = File::create(path).map_err(|e| RenderError::io(path, e))?;
    write_text(BufWriter::new(output), rasters, size).map_err(|e| RenderError::io(path, e))?;
    debug!("Wrote {}x{} graymap to {}", size.0, size.1, path.display());
    Ok(size)
}

/// Save the rasters as a binary (`P5`) graymap at `path`.  Returns
/// the dimensions written.
pub fn save_binary<P: AsRef<Path>>(
    rasters: &[Raster],
    width: usize,
    height: usize,
    path: P,
) -> Result<Dimensions, RenderError> {
    let path = path.as_ref();
    let size = clamp(rasters, width, height);
    let pixels: Vec<u8> = rows(rasters, size).flatten().cloned().collect();
    let output = File::create(path).map_err(|e| RenderError::io(path, e))?;
    let mut encoder =
        PNMEncoder::new(output).with_subtype(PNMSubtype::Graymap(SampleEncoding::Binary));
    encoder
        .encode(&pixels[..], size.0 as u32, size.1 as u32, ColorType::Gray(8))
        .map_err(|e| RenderError::io(path, e))?;
    debug!("Wrote {}x{} binary graymap to {}", size.0, size.1, path.display());
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex::point;
    use crate::planes::Region;

    fn filled(top: f64, rows: usize, value: u8) -> Raster {
        let region = Region::new(point(0.0, top), point(3.0, top - rows as f64)).unwrap();
        let mut raster = Raster::new(region, 1.0, false);
        for row in 0..raster.height() {
            for column in 0..raster.width() {
                *raster.get_mut(column, row).unwrap() = value + column as u8;
            }
        }
        raster
    }

    fn text(rasters: &[Raster], width: usize, height: usize) -> String {
        let mut out = Vec::new();
        write_text(&mut out, rasters, clamp(rasters, width, height)).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn text_layout_stacks_rasters_in_order() {
        let rasters = vec![filled(2.0, 1, 10), filled(1.0, 2, 20)];
        assert_eq!(
            text(&rasters, 3, 3),
            "P2\n3 3\n255\n10 11 12\n20 21 22\n20 21 22\n"
        );
    }

    #[test]
    fn short_rasters_shrink_the_header() {
        let rasters = vec![filled(2.0, 1, 0), filled(1.0, 1, 0)];
        assert_eq!(clamp(&rasters, 3, 3), Dimensions(3, 2));
        assert!(text(&rasters, 3, 3).starts_with("P2\n3 2\n255\n"));
    }

    #[test]
    fn extra_rows_and_columns_are_dropped() {
        let rasters = vec![filled(3.0, 3, 5)];
        assert_eq!(text(&rasters, 2, 2), "P2\n2 2\n255\n5 6\n5 6\n");
    }

    #[test]
    fn save_reports_unwritable_paths() {
        let rasters = vec![filled(1.0, 1, 0)];
        match save(&rasters, 3, 1, "/nonexistent-directory/out.pgm") {
            Err(RenderError::Io { path, .. }) => assert!(path.ends_with("out.pgm")),
            other => panic!("expected an I/O error, got {:?}", other),
        }
    }
}
