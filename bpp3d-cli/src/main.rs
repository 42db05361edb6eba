use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bpp3d::solver::{PackingMode, solve};
use bpp3d_cli::config::HarnessConfig;
use bpp3d_cli::io::cli::{Cli, Command};
use bpp3d_cli::{generator, io};
use clap::Parser as ClapParser;
use log::{info, warn};
use rand::SeedableRng;
use rand::prelude::SmallRng;

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    match args.command {
        Command::Solve {
            input_file,
            solution_folder,
            config_file,
        } => main_solve(input_file, solution_folder, config_file),
        Command::Gen {
            n_items,
            truck_type,
            output_file,
            config_file,
        } => main_gen(n_items, truck_type, output_file, config_file),
    }
}

fn load_config(config_file: Option<PathBuf>) -> Result<HarnessConfig> {
    match config_file {
        None => {
            warn!("no config file provided, using defaults; use --config-file to override");
            Ok(HarnessConfig::default())
        }
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("could not open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).context("incorrect config file format")
        }
    }
}

fn main_solve(
    input_file: PathBuf,
    solution_folder: PathBuf,
    config_file: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config_file)?;
    info!("parsed config: {config:?}");

    let instance = io::read_instance(&input_file)?;
    info!(
        "instance: {} items, bin ({}, {}, {})",
        instance.n_items(),
        instance.bin.width,
        instance.bin.height,
        instance.bin.depth
    );

    let input_stem = input_file
        .file_stem()
        .and_then(|stem| stem.to_str())
        .context("input file has no usable name")?;

    if !solution_folder.exists() {
        fs::create_dir_all(&solution_folder).with_context(|| {
            format!("could not create solution folder: {solution_folder:?}")
        })?;
    }

    if config.run_both_modes {
        // independent invocations over the same read-only instance
        let (robot, general) = rayon::join(
            || solve(&instance, config.limits, PackingMode::Robot),
            || solve(&instance, config.limits, PackingMode::General),
        );
        for (mode, solution) in [
            (PackingMode::Robot, robot),
            (PackingMode::General, general),
        ] {
            io::report_solution(mode, &instance, &solution);
            let path = solution_path(&solution_folder, input_stem, Some(mode));
            io::write_solution(&instance, &solution, &path)?;
        }
    } else {
        let solution = solve(&instance, config.limits, config.mode);
        io::report_solution(config.mode, &instance, &solution);
        let path = solution_path(&solution_folder, input_stem, None);
        io::write_solution(&instance, &solution, &path)?;
    }

    Ok(())
}

fn solution_path(folder: &Path, stem: &str, mode: Option<PackingMode>) -> PathBuf {
    let suffix = match mode {
        Some(PackingMode::Robot) => "_robot",
        Some(PackingMode::General) => "_general",
        None => "",
    };
    folder.join(format!("sol_{stem}{suffix}.tsv"))
}

fn main_gen(
    n_items: usize,
    truck_type: usize,
    output_file: PathBuf,
    config_file: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config_file)?;

    let mut rng = match config.prng_seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    let instance = generator::random_instance(n_items, truck_type, &mut rng)?;
    io::write_instance(&instance, &output_file)?;

    info!(
        "generated instance with {} items for truck type {truck_type}",
        instance.n_items()
    );
    Ok(())
}
