// Imports
use crate::demos::{self, DemoKind};
use anyhow::Context;
use clap::Parser;
use rxkcd_engine::{export, xkcdify, ObjectKey, SceneGraph, XkcdConfig, XkcdReport};
use std::path::{Path, PathBuf};
use tracing::info;

///    rxkcd-cli{n}{n}
///    This program is free software; you can redistribute it{n}
///    and/or modify it under the terms of the GPL v3 or (at your option){n}
///    any later version.
#[derive(clap::Parser, Debug, Clone)]
#[command(author, version, about, long_about = None, arg_required_else_help = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub(crate) enum Command {
    /// Builds a demo chart, re-draws it in the xkcd style and saves it as svg.
    Demo {
        /// The demo chart.
        kind: DemoKind,
        /// The svg output file.
        #[arg(short = 'o', long)]
        output_file: PathBuf,
        #[command(flatten)]
        style: StyleArgs,
    },
    /// Moves one of the shapes of the stacking demo in the stacking order and saves the chart as svg.{n}
    /// The shapes start out with red in front and green in the back.
    Stack {
        /// The svg output file.
        #[arg(short = 'o', long)]
        output_file: PathBuf,
        /// The shape that gets moved.
        #[arg(short = 't', long)]
        target: StackTarget,
        /// Where the shape is moved: "up", "down", "top" or "bottom".
        #[arg(short = 'p', long)]
        placement: String,
        /// The count of positions the shape is moved with "up" and "down".
        #[arg(short = 's', long, default_value_t = 1, allow_negative_numbers = true)]
        step: i64,
        #[command(flatten)]
        style: StyleArgs,
    },
    /// Prints the default configuration as Json.
    Config,
}

#[derive(clap::Args, Debug, Clone)]
pub(crate) struct StyleArgs {
    /// A Json configuration file. Missing fields take their default values.
    #[arg(short = 'c', long)]
    pub(crate) config: Option<PathBuf>,
    /// Seed for reproducible jitter. Overrides the seed of the configuration.
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Don't redraw the axes with hand-drawn spines and ticks.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub(crate) no_axes: bool,
    /// Save the chart as it is, without the xkcd style.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub(crate) plain: bool,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StackTarget {
    Red,
    Blue,
    Green,
}

impl StackTarget {
    pub(crate) fn tag(self) -> &'static str {
        let [red, blue, green] = demos::STACKING_TAGS;
        match self {
            Self::Red => red,
            Self::Blue => blue,
            Self::Green => green,
        }
    }
}

pub(crate) fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Demo {
            kind,
            output_file,
            style,
        } => {
            println!("Rendering demo..");
            let (mut scene, figure) = kind.build()?;
            apply_style(&mut scene, figure, &style)?;
            save_svg(&scene, figure, &output_file)?;
            println!("Demo saved to {}", output_file.display());
        }
        Command::Stack {
            output_file,
            target,
            placement,
            step,
            style,
        } => {
            let (mut scene, figure) = demos::stacking()?;
            let target_key = scene
                .find_by_tag(target.tag())
                .context("stacking demo is missing the target shape")?;

            let report = scene.reorder_by_name(&[target_key], &placement, step)?;
            for (_, stack_move) in report.moves.iter() {
                println!(
                    "Moved {} from position {} to {}",
                    target.tag(),
                    stack_move.from,
                    stack_move.to
                );
            }
            println!("Stacking order, front to back: {}", stacking_order(&scene, figure));

            apply_style(&mut scene, figure, &style)?;
            save_svg(&scene, figure, &output_file)?;
            println!("Chart saved to {}", output_file.display());
        }
        Command::Config => {
            println!("{}", XkcdConfig::default().to_json()?);
        }
    }

    Ok(())
}

pub(crate) fn load_config(style: &StyleArgs) -> anyhow::Result<XkcdConfig> {
    let mut config = match &style.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config file `{}` failed", path.display()))?;
            XkcdConfig::load_from_json(&json)?
        }
        None => XkcdConfig::default(),
    };
    if let Some(seed) = style.seed {
        config.seed = Some(seed);
    }
    if style.no_axes {
        config.draw_axes = false;
    }
    Ok(config)
}

fn apply_style(scene: &mut SceneGraph, figure: ObjectKey, style: &StyleArgs) -> anyhow::Result<()> {
    if style.plain {
        return Ok(());
    }
    let config = load_config(style)?;
    let report = xkcdify(scene, &[figure], &config)?;
    log_report(&report);
    Ok(())
}

fn log_report(report: &XkcdReport) {
    info!(
        "restyled {} axes, {} lines, {} patches, {} texts, created {} decorations",
        report.axes, report.lines, report.patches, report.texts, report.decorations
    );
    if !report.skipped.is_empty() {
        info!("skipped {} objects", report.skipped.len());
    }
}

fn stacking_order(scene: &SceneGraph, figure: ObjectKey) -> String {
    scene
        .children(figure)
        .iter()
        .flat_map(|&axes| scene.children(axes).iter())
        .filter_map(|&key| scene.get(key).and_then(|o| o.tag.clone()))
        .collect::<Vec<String>>()
        .join(", ")
}

fn save_svg(scene: &SceneGraph, figure: ObjectKey, output_file: &Path) -> anyhow::Result<()> {
    let svg = export::scene_to_svg(scene, figure)?;
    std::fs::write(output_file, svg)
        .with_context(|| format!("writing svg to `{}` failed", output_file.display()))?;
    Ok(())
}
