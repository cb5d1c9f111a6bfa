use mandelbands::complex::point;
use mandelbands::planes::Dimensions;
use mandelbands::{run, Config, Mode, Renderer};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Pulls the dimensions and the samples out of a plain-text graymap.
fn read_pgm(path: &Path) -> (Dimensions, Vec<Vec<u8>>) {
    let text = fs::read_to_string(path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("P2"));
    let size: Vec<usize> = lines
        .next()
        .unwrap()
        .split_whitespace()
        .map(|n| n.parse().unwrap())
        .collect();
    assert_eq!(lines.next(), Some("255"));
    let rows: Vec<Vec<u8>> = lines
        .map(|line| line.split_whitespace().map(|n| n.parse().unwrap()).collect())
        .collect();
    (Dimensions(size[0], size[1]), rows)
}

fn quick() -> Config {
    Config {
        step: 0.03125,
        max_iterations: 64,
        ..Config::default()
    }
}

#[test]
fn serial_render_of_the_default_window() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mandelbrot-s.pgm");
    let renderer = Renderer::new(Config {
        max_iterations: 200,
        ..Config::default()
    })
    .unwrap();

    let written = run("test", &renderer, Mode::Serial, &path, false).unwrap();
    assert_eq!(written, Dimensions(400, 400));

    let (size, rows) = read_pgm(&path);
    assert_eq!(size, Dimensions(400, 400));
    assert_eq!(rows.len(), 400);
    assert!(rows.iter().all(|row| row.len() == 400));

    // c = -1 sits in the period-two bulb and never escapes.
    let pixel = renderer
        .config()
        .region
        .point_to_pixel(&point(-1.0, 0.0), 0.01)
        .unwrap();
    assert_eq!(rows[pixel.1][pixel.0], 0);
    // The top-left corner escapes on the first iteration.
    assert_eq!(rows[0][0], 255 - (255 / 200) as u8);
}

#[test]
fn parallel_file_is_the_negative_of_the_serial_file() {
    let dir = TempDir::new().unwrap();
    let serial = dir.path().join("s.pgm");
    let parallel = dir.path().join("p.pgm");
    let renderer = Renderer::new(quick()).unwrap();

    renderer.save(Mode::Serial, &serial, false).unwrap();
    renderer.save(Mode::Parallel, &parallel, false).unwrap();

    let (s_size, s_rows) = read_pgm(&serial);
    let (p_size, p_rows) = read_pgm(&parallel);
    assert_eq!(s_size, p_size);
    assert_eq!(s_size, Dimensions(128, 128));
    for (s, p) in s_rows.iter().zip(p_rows.iter()) {
        for (a, b) in s.iter().zip(p.iter()) {
            assert_eq!(u16::from(*a) + u16::from(*b), 255);
        }
    }
}

#[test]
fn default_step_parity_drifts_only_at_a_few_boundary_samples() {
    // 0.01 isn't exact in binary.  Each band restarts its `y -= step`
    // walk from an exactly computed top, so a handful of samples near
    // the set's edge land a rounding error away from the serial ones.
    let renderer = Renderer::new(Config {
        max_iterations: 100,
        ..Config::default()
    })
    .unwrap();
    let serial = renderer.render_serial();
    let parallel = renderer.render_parallel().unwrap();

    let serial_rows: Vec<&[u8]> = serial[0].raster.rows().collect();
    let parallel_rows: Vec<&[u8]> = parallel.iter().flat_map(|b| b.raster.rows()).collect();
    assert_eq!(serial_rows.len(), 400);
    assert_eq!(parallel_rows.len(), 400);

    let mut total = 0;
    let mut mismatched = 0;
    for (s, p) in serial_rows.iter().zip(parallel_rows.iter()) {
        assert_eq!(s.len(), p.len());
        for (a, b) in s.iter().zip(p.iter()) {
            total += 1;
            if u16::from(*a) + u16::from(*b) != 255 {
                mismatched += 1;
            }
        }
    }
    assert_eq!(total, 160_000);
    // Under a tenth of a percent of the image.
    assert!(mismatched * 1000 <= total, "{} samples disagree", mismatched);
}

#[test]
fn rendering_twice_gives_identical_files() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.pgm");
    let second = dir.path().join("second.pgm");
    let renderer = Renderer::new(quick()).unwrap();

    renderer.save(Mode::Parallel, &first, false).unwrap();
    renderer.save(Mode::Parallel, &second, false).unwrap();
    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn four_bands_add_up_to_the_serial_height() {
    let renderer = Renderer::new(Config::default()).unwrap();
    let full = renderer.dimensions();
    let heights: usize = renderer
        .config()
        .region
        .bands(4)
        .iter()
        .map(|band| band.dimensions(0.01).1)
        .sum();
    assert!((heights as i64 - full.1 as i64).abs() <= 1);
}

#[test]
fn uneven_bands_still_write_a_consistent_file() {
    // 4.0 / 0.03 floors to 133 rows, but four bands of 1.0 / 0.03 floor
    // to 33 rows apiece.
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("uneven.pgm");
    let renderer = Renderer::new(Config {
        step: 0.03,
        max_iterations: 32,
        ..Config::default()
    })
    .unwrap();

    let written = renderer.save(Mode::Parallel, &path, false).unwrap();
    let (size, rows) = read_pgm(&path);
    assert_eq!(size, written);
    assert_eq!(rows.len(), size.1);
    assert!(rows.iter().all(|row| row.len() == size.0));
    assert!(size.1 <= renderer.dimensions().1);
}

#[test]
fn binary_output_has_a_p5_header() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("binary.pgm");
    let renderer = Renderer::new(quick()).unwrap();

    renderer.save(Mode::Parallel, &path, true).unwrap();
    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"P5"));
    assert!(bytes.len() >= 128 * 128);
}
