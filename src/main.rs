use clap::{value_t, App, Arg, ArgMatches};
use num::Complex;
use std::str::FromStr;

use mandelbands::config::{
    DEFAULT_BANDS, DEFAULT_ESCAPE_RADIUS, DEFAULT_MAX_ITERATIONS, DEFAULT_STEP,
};
use mandelbands::{run, Config, Mode, Region, RenderError, Renderer};

/// Given a string and a separator, returns the two values
/// separated by the separator.
fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_complex(s: &str, err: &str) -> Result<(), String> {
    match parse_complex(s) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const LABEL: &str = "label";
const MODE: &str = "mode";
const SERIAL_OUTPUT: &str = "serial-output";
const PARALLEL_OUTPUT: &str = "parallel-output";
const TOPLEFT: &str = "topleft";
const BOTTOMRIGHT: &str = "bottomright";
const STEP: &str = "step";
const ITERATIONS: &str = "iterations";
const RADIUS: &str = "radius";
const BANDS: &str = "bands";
const BINARY: &str = "binary";

fn args<'a>() -> ArgMatches<'a> {
    App::new("mandelbands")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Band-parallel Mandelbrot graymap renderer")
        .arg(
            Arg::with_name(LABEL)
                .index(1)
                .default_value("Rust")
                .help("Label for the begin and end log lines"),
        )
        .arg(
            Arg::with_name(MODE)
                .long(MODE)
                .short("m")
                .takes_value(true)
                .possible_values(&["serial", "parallel", "both"])
                .default_value("both")
                .help("Which renders to run"),
        )
        .arg(
            Arg::with_name(SERIAL_OUTPUT)
                .long(SERIAL_OUTPUT)
                .takes_value(true)
                .default_value(Mode::Serial.default_output())
                .help("Output file for the serial render"),
        )
        .arg(
            Arg::with_name(PARALLEL_OUTPUT)
                .long(PARALLEL_OUTPUT)
                .takes_value(true)
                .default_value(Mode::Parallel.default_output())
                .help("Output file for the parallel render"),
        )
        .arg(
            Arg::with_name(TOPLEFT)
                .long(TOPLEFT)
                .short("t")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-3.0,2.0")
                .validator(|s| validate_complex(&s, "Could not parse top left corner"))
                .help("Top left corner of the mandelbrot space"),
        )
        .arg(
            Arg::with_name(BOTTOMRIGHT)
                .long(BOTTOMRIGHT)
                .short("b")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("1.0,-2.0")
                .validator(|s| validate_complex(&s, "Could not parse bottom right corner"))
                .help("Bottom right corner of the mandelbrot space"),
        )
        .arg(
            Arg::with_name(STEP)
                .long(STEP)
                .short("d")
                .takes_value(true)
                .default_value("0.01")
                .validator(|s| {
                    validate_range(
                        &s,
                        1e-6,
                        10.0,
                        "Could not parse step",
                        "Step must be between 0.000001 and 10",
                    )
                })
                .help("Distance between samples on the complex plane"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("1000")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 1000000",
                    )
                })
                .help("Iterations before a point is taken to be in the set"),
        )
        .arg(
            Arg::with_name(RADIUS)
                .long(RADIUS)
                .short("r")
                .takes_value(true)
                .default_value("2.0")
                .validator(|s| {
                    validate_range(
                        &s,
                        0.001,
                        1000.0,
                        "Could not parse escape radius",
                        "Escape radius must be between 0.001 and 1000",
                    )
                })
                .help("Modulus at which an orbit has escaped"),
        )
        .arg(
            Arg::with_name(BANDS)
                .long(BANDS)
                .short("n")
                .takes_value(true)
                .default_value("4")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        256,
                        "Could not parse band count",
                        "Band count must be between 1 and 256",
                    )
                })
                .help("Number of bands, and threads, in the parallel render"),
        )
        .arg(
            Arg::with_name(BINARY)
                .long(BINARY)
                .help("Write binary (P5) graymaps instead of plain text (P2)"),
        )
        .get_matches()
}

fn config(matches: &ArgMatches) -> Result<Config, RenderError> {
    let corner = |name: &str| {
        matches
            .value_of(name)
            .and_then(parse_complex)
            .ok_or_else(|| RenderError::InvalidConfig(format!("Could not parse --{}", name)))
    };
    Ok(Config {
        region: Region::new(corner(TOPLEFT)?, corner(BOTTOMRIGHT)?)?,
        step: value_t!(matches, STEP, f64).unwrap_or(DEFAULT_STEP),
        max_iterations: value_t!(matches, ITERATIONS, u32).unwrap_or(DEFAULT_MAX_ITERATIONS),
        escape_radius: value_t!(matches, RADIUS, f64).unwrap_or(DEFAULT_ESCAPE_RADIUS),
        bands: value_t!(matches, BANDS, usize).unwrap_or(DEFAULT_BANDS),
    })
}

fn render(matches: &ArgMatches) -> Result<(), RenderError> {
    let renderer = Renderer::new(config(matches)?)?;
    let label = matches.value_of(LABEL).unwrap_or("Rust");
    let binary = matches.is_present(BINARY);
    let modes: Vec<Mode> = [Mode::Serial, Mode::Parallel]
        .iter()
        .cloned()
        .filter(|mode| match matches.value_of(MODE) {
            Some("both") | None => true,
            Some(name) => name == mode.name(),
        })
        .collect();
    for mode in &modes {
        let output = match mode {
            Mode::Serial => matches.value_of(SERIAL_OUTPUT),
            Mode::Parallel => matches.value_of(PARALLEL_OUTPUT),
        }
        .unwrap_or_else(|| mode.default_output());
        let label = format!("{} {}", label, mode.name());
        run(&label, &renderer, *mode, output, binary)?;
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = args();
    if let Err(e) = render(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
