use clap::{value_parser, Arg, ArgMatches, Command};
use log::info;
use mandelbrot::config::{parse_complex, parse_pair};
use mandelbrot::tiles::Grid;
use mandelbrot::{Mode, Palette, RenderConfig, RenderError};
use num::Complex;
use std::path::PathBuf;

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    match parse_pair::<u32>(s, 'x') {
        Some((w, h)) if w > 0 && h > 0 => Ok((w, h)),
        Some(_) => Err("Image dimensions must be positive".to_string()),
        None => Err("Could not parse output image size".to_string()),
    }
}

fn parse_corner(s: &str) -> Result<Complex<f64>, String> {
    parse_complex(s).ok_or_else(|| format!("Could not parse corner '{}'", s))
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const ITERATIONS: &str = "iterations";
const MODE: &str = "mode";
const TILES: &str = "tiles";
const THREADS: &str = "threads";
const PALETTE: &str = "palette";
const QUALITY: &str = "quality";

fn args() -> ArgMatches {
    Command::new("mandel")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Mandelbrot renderer")
        .arg(
            Arg::new(OUTPUT)
                .long(OUTPUT)
                .short('o')
                .default_value("mandelbrot.jpg")
                .value_parser(value_parser!(PathBuf))
                .help("Output file; the extension picks the format"),
        )
        .arg(
            Arg::new(SIZE)
                .long(SIZE)
                .short('s')
                .default_value("1000x1000")
                .value_parser(parse_size)
                .help("Size of output image"),
        )
        .arg(
            Arg::new(LEFTLOWER)
                .long(LEFTLOWER)
                .short('l')
                .default_value("-2.0,-1.25")
                .allow_hyphen_values(true)
                .value_parser(parse_corner)
                .help("Left lower corner of the mandelbrot space"),
        )
        .arg(
            Arg::new(RIGHTUPPER)
                .long(RIGHTUPPER)
                .short('r')
                .default_value("0.5,1.25")
                .allow_hyphen_values(true)
                .value_parser(parse_corner)
                .help("Right upper corner of the mandelbrot space"),
        )
        .arg(
            Arg::new(ITERATIONS)
                .long(ITERATIONS)
                .short('i')
                .default_value("2048")
                .value_parser(value_parser!(u32).range(1..=200_000))
                .help("Iteration cap for the escape test"),
        )
        .arg(
            Arg::new(MODE)
                .long(MODE)
                .short('m')
                .default_value("tiled")
                .value_parser(|s: &str| s.parse::<Mode>())
                .help("Pipeline layout: single or tiled"),
        )
        .arg(
            Arg::new(TILES)
                .long(TILES)
                .short('g')
                .default_value("3x2")
                .value_parser(|s: &str| s.parse::<Grid>())
                .help("Tile grid for the tiled layout, columns x rows"),
        )
        .arg(
            Arg::new(THREADS)
                .long(THREADS)
                .short('t')
                .value_parser(value_parser!(u32).range(1..=1024))
                .help("Most tiles rendered at once [default: number of CPUs]"),
        )
        .arg(
            Arg::new(PALETTE)
                .long(PALETTE)
                .short('p')
                .value_parser(|s: &str| s.parse::<Palette>())
                .help("Colour palette: red or green [default: red for single, green for tiled]"),
        )
        .arg(
            Arg::new(QUALITY)
                .long(QUALITY)
                .short('q')
                .default_value("75")
                .value_parser(value_parser!(u8).range(1..=100))
                .help("JPEG quality"),
        )
        .get_matches()
}

fn config(matches: &ArgMatches) -> RenderConfig {
    let defaults = RenderConfig::default();
    let (width, height) = matches
        .get_one::<(u32, u32)>(SIZE)
        .copied()
        .unwrap_or((defaults.width, defaults.height));
    RenderConfig {
        width,
        height,
        leftlower: matches
            .get_one::<Complex<f64>>(LEFTLOWER)
            .copied()
            .unwrap_or(defaults.leftlower),
        rightupper: matches
            .get_one::<Complex<f64>>(RIGHTUPPER)
            .copied()
            .unwrap_or(defaults.rightupper),
        max_count: matches
            .get_one::<u32>(ITERATIONS)
            .copied()
            .unwrap_or(defaults.max_count),
        mode: matches.get_one::<Mode>(MODE).copied().unwrap_or(defaults.mode),
        grid: matches.get_one::<Grid>(TILES).copied().unwrap_or(defaults.grid),
        threads: matches
            .get_one::<u32>(THREADS)
            .map(|&t| t as usize)
            .unwrap_or(defaults.threads),
        palette: matches.get_one::<Palette>(PALETTE).copied(),
        output: matches
            .get_one::<PathBuf>(OUTPUT)
            .cloned()
            .unwrap_or(defaults.output),
        quality: matches
            .get_one::<u8>(QUALITY)
            .copied()
            .unwrap_or(defaults.quality),
    }
}

fn run(config: &RenderConfig) -> Result<(), RenderError> {
    let (image, report) = mandelbrot::render(config)?;
    mandelbrot::write_image(&config.output, &image, config.quality)?;
    info!(
        "{} pipeline(s) wrote {} pixels to {}",
        report.tiles,
        report.pixels,
        config.output.display()
    );
    Ok(())
}

fn main() {
    env_logger::init();
    let config = config(&args());
    if let Err(e) = run(&config) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
