use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, ensure};
use bpp3d::entities::{Bin, Instance, Solution};
use bpp3d::solver::PackingMode;
use log::{Level, LevelFilter, info, log};
use thousands::Separable;

use crate::EPOCH;

pub mod cli;

/// Reads a tab-separated instance file: a `n W H D` header line followed by
/// one `w h d` row per item.
pub fn read_instance(path: &Path) -> Result<Instance> {
    let file = File::open(path)
        .with_context(|| format!("could not open instance file: {}", path.display()))?;
    let mut lines = BufReader::new(file).lines();

    let header = lines
        .next()
        .context("instance file is empty")?
        .context("could not read instance header")?;
    let header_fields = parse_row(&header, 4)
        .with_context(|| format!("malformed instance header: {header:?}"))?;
    let n = header_fields[0] as usize;
    let bin = Bin::new(header_fields[1], header_fields[2], header_fields[3])?;

    let mut dims = Vec::with_capacity(n);
    for (i, line) in lines.enumerate() {
        let line = line.with_context(|| format!("could not read item row {i}"))?;
        if line.trim().is_empty() {
            continue;
        }
        let fields = parse_row(&line, 3).with_context(|| format!("malformed item row {i}"))?;
        dims.push((fields[0], fields[1], fields[2]));
    }
    ensure!(
        dims.len() == n,
        "instance header announces {n} items but the file contains {}",
        dims.len()
    );

    Instance::from_dims(&dims, bin)
}

/// Writes an instance in the format accepted by [`read_instance`].
pub fn write_instance(instance: &Instance, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not create instance file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let bin = &instance.bin;
    writeln!(
        writer,
        "{}\t{}\t{}\t{}",
        instance.n_items(),
        bin.width,
        bin.height,
        bin.depth
    )?;
    for item in &instance.items {
        writeln!(writer, "{}\t{}\t{}", item.width, item.height, item.depth)?;
    }

    info!("instance written to {:?}", path);
    Ok(())
}

/// Writes a solution as tab-separated rows: a `W H D` header followed by one
/// `id w h d x y z` row per item, in input order. The first column is the
/// item's input index; instance files carry no carton-type column, so the
/// index takes the place a type identifier would otherwise occupy.
pub fn write_solution(instance: &Instance, solution: &Solution, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not create solution file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let bin = &instance.bin;
    writeln!(writer, "{}\t{}\t{}", bin.width, bin.height, bin.depth)?;

    let mut placements = solution.placements.clone();
    placements.sort_by_key(|p| p.item_id);
    for p in &placements {
        let item = instance.item(p.item_id);
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            item.id,
            item.width,
            item.height,
            item.depth,
            p.position.x(),
            p.position.y(),
            p.position.z()
        )?;
    }

    info!("solution written to {:?}", path);
    Ok(())
}

fn parse_row(line: &str, expected: usize) -> Result<Vec<f64>> {
    let fields: Vec<f64> = line
        .split_whitespace()
        .map(|field| {
            field
                .parse::<f64>()
                .with_context(|| format!("not a number: {field:?}"))
        })
        .collect::<Result<_>>()?;
    ensure!(
        fields.len() == expected,
        "expected {expected} fields, found {}",
        fields.len()
    );
    Ok(fields)
}

/// Logs a summary of a finished run, mirroring the statistics the solver
/// accumulates: bounds, search counters, fit-test counters and phase times.
pub fn report_solution(mode: PackingMode, instance: &Instance, solution: &Solution) {
    let stats = &solution.stats;
    info!("=== {mode:?} packing ===");
    info!(
        "bins used (Z): {}, lower bound (Lb): {}{}",
        solution.n_bins,
        solution.lower_bound,
        if solution.is_proven_optimal() {
            " [proven optimal]"
        } else {
            " [stopped, best effort]"
        }
    );
    info!(
        "density: {:.1}% of the used bin volume",
        solution.density(instance) * 100.0
    );
    info!(
        "nodes: {}, sub-nodes: {}",
        stats.nodes.separate_with_commas(),
        stats.sub_nodes.separate_with_commas()
    );
    info!(
        "iterations: {}, sub-iterations: {}",
        stats.iterations.separate_with_commas(),
        stats.sub_iterations.separate_with_commas()
    );
    info!(
        "fit tests: {} pairs, {} triples, {} groups",
        stats.calls_fits_two.separate_with_commas(),
        stats.calls_fits_three.separate_with_commas(),
        stats.calls_fits_more.separate_with_commas()
    );
    let search_time = match mode {
        PackingMode::Robot => stats.robot_time,
        PackingMode::General => stats.general_time,
    };
    info!(
        "time: {:.3}ms total, {:.3}ms heuristic, {:.3}ms search",
        stats.total_time.as_secs_f64() * 1000.0,
        stats.heuristic_time.as_secs_f64() * 1000.0,
        search_time.as_secs_f64() * 1000.0
    );
}

pub fn init_logger(level_filter: LevelFilter) -> Result<()> {
    fern::Dispatch::new()
        // Perform allocation-free log formatting
        .format(|out, message, record| {
            let handle = std::thread::current();
            let thread_name = handle.name().unwrap_or("-");

            let duration = EPOCH.elapsed();
            let sec = duration.as_secs() % 60;
            let min = (duration.as_secs() / 60) % 60;
            let hours = (duration.as_secs() / 60) / 60;

            let prefix = format!(
                "[{}] [{:0>2}:{:0>2}:{:0>2}] <{}>",
                record.level(),
                hours,
                min,
                sec,
                thread_name,
            );

            out.finish(format_args!("{prefix:<27}{message}"))
        })
        .level(level_filter)
        .chain(std::io::stdout())
        .apply()?;
    log!(Level::Info, "time: {}", jiff::Timestamp::now());
    Ok(())
}
