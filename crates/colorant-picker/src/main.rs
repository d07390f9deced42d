use chrono::Utc;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use owo_colors::{OwoColorize as _, Stream};
use std::path::PathBuf;

use colorant_harmony::{DyeCategory, HarmonyPattern};
use colorant_picker::commands::custom::{run as custom, CustomAction, CustomArgs};
use colorant_picker::commands::dyes::{run as dyes, DyesArgs};
use colorant_picker::commands::favorites::{run as favorites, FavoritesAction, FavoritesArgs};
use colorant_picker::commands::history::{run as history, HistoryAction, HistoryArgs};
use colorant_picker::commands::open::{run as open, OpenArgs};
use colorant_picker::commands::patterns::{run as patterns, PatternsArgs};
use colorant_picker::commands::ratio::{run as ratio, RatioArgs};
use colorant_picker::commands::share::{run as share, ShareArgs};
use colorant_picker::commands::suggest::{run as suggest, SuggestArgs};
use colorant_picker::context::{Context, ContextOptions};
use colorant_picker::filter::FilterOptions;
use colorant_picker::telemetry::init_tracing;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Colorant picker, harmonious dye palettes", long_about = None)]
struct Args {
    #[clap(long, global = true, default_value = "auto")]
    color: Color,

    /// Dye catalog JSON file. Defaults to the bundled catalog
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// YAML file overriding harmony angles, thresholds and weights
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Where favorites, history and custom colors are kept
    #[arg(long, global = true, default_value = ".colorant-picker")]
    data_dir: PathBuf,

    /// More logging. Repeat for more
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[clap(rename_all = "lowercase")]
enum Color {
    Always,
    Auto,
    Never,
}

impl Color {
    fn init(self) {
        match self {
            Color::Always => owo_colors::set_override(true),
            Color::Auto => {}
            Color::Never => owo_colors::set_override(false),
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Suggest two dyes to go with a primary dye, hex color or custom color
    Suggest {
        primary: String,
        #[arg(short, long, default_value_t = HarmonyPattern::Triadic)]
        pattern: HarmonyPattern,
        /// Leave metallic dyes out of the suggestions
        #[arg(long)]
        exclude_metallic: bool,
        /// Seed for the random fallback picks
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the main/sub/accent split for three colors
    Ratio {
        primary: String,
        first: String,
        second: String,
    },
    /// Preview every pattern for one primary
    Patterns {
        primary: String,
        #[arg(long)]
        exclude_metallic: bool,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Browse the catalog
    Dyes {
        #[arg(long, value_parser = parse_category)]
        category: Option<DyeCategory>,
        #[arg(long, default_value_t = 0.0)]
        hue_min: f64,
        #[arg(long, default_value_t = 360.0)]
        hue_max: f64,
        /// Percent
        #[arg(long, default_value_t = 0.0)]
        saturation_min: f64,
        #[arg(long, default_value_t = 100.0)]
        saturation_max: f64,
        /// Percent
        #[arg(long, default_value_t = 0.0)]
        value_min: f64,
        #[arg(long, default_value_t = 100.0)]
        value_max: f64,
        #[arg(long)]
        exclude_metallic: bool,
    },
    /// Saved palettes
    Favorites {
        #[command(subcommand)]
        command: FavoritesCommand,
    },
    /// Recently viewed palettes
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },
    /// Your own colors, usable as a primary anywhere
    Custom {
        #[command(subcommand)]
        command: CustomCommand,
    },
    /// Print a share link and post text for a palette
    Share {
        primary: String,
        first: String,
        second: String,
        #[arg(short, long, default_value_t = HarmonyPattern::Triadic)]
        pattern: HarmonyPattern,
        #[arg(long)]
        link_only: bool,
    },
    /// Open a share link
    Open { link: String },
}

#[derive(Subcommand, Debug, Clone)]
enum FavoritesCommand {
    List,
    Add {
        primary: String,
        first: String,
        second: String,
        #[arg(short, long, default_value_t = HarmonyPattern::Triadic)]
        pattern: HarmonyPattern,
    },
    Remove {
        id: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
enum HistoryCommand {
    List,
    Clear,
}

#[derive(Subcommand, Debug, Clone)]
enum CustomCommand {
    List,
    Add {
        name: String,
        /// `r,g,b` or hex
        value: String,
    },
    Edit {
        /// Id or name
        custom_color: String,
        #[arg(long)]
        name: Option<String>,
        /// `r,g,b` or hex
        #[arg(long)]
        value: Option<String>,
    },
    Remove {
        /// Id or name
        custom_color: String,
    },
}

fn parse_category(input: &str) -> Result<DyeCategory, String> {
    DyeCategory::ALL
        .into_iter()
        .find(|category| category.as_str() == input)
        .ok_or_else(|| format!("unknown category `{}`", input))
}

fn main() {
    let args = Args::parse();
    args.color.init();
    init_tracing(args.verbose);

    let Some(command) = args.command else {
        let _ = Args::command().print_help();
        std::process::exit(1);
    };

    let context = Context::load(ContextOptions {
        catalog: args.catalog.as_deref(),
        config: args.config.as_deref(),
        data_dir: &args.data_dir,
    });

    let result = context.and_then(|mut ctx| run(command, &mut ctx));

    if let Err(e) = result {
        eprintln!(
            "{} {}",
            "Error:".if_supports_color(Stream::Stderr, |s| s.red()),
            e
        );
        std::process::exit(1);
    }
}

fn run(command: Commands, ctx: &mut Context) -> colorant_picker::Result<()> {
    let mut stdout = std::io::stdout();
    let now = Utc::now();

    match command {
        Commands::Suggest {
            primary,
            pattern,
            exclude_metallic,
            seed,
        } => suggest(SuggestArgs {
            ctx,
            primary: &primary,
            pattern,
            exclude_metallic,
            seed,
            now,
            stdout: &mut stdout,
        }),
        Commands::Ratio {
            primary,
            first,
            second,
        } => ratio(RatioArgs {
            ctx,
            primary: &primary,
            suggested: [first.as_str(), second.as_str()],
            stdout: &mut stdout,
        }),
        Commands::Patterns {
            primary,
            exclude_metallic,
            seed,
        } => patterns(PatternsArgs {
            ctx,
            primary: &primary,
            exclude_metallic,
            seed,
            stdout: &mut stdout,
        }),
        Commands::Dyes {
            category,
            hue_min,
            hue_max,
            saturation_min,
            saturation_max,
            value_min,
            value_max,
            exclude_metallic,
        } => dyes(DyesArgs {
            ctx,
            filter: FilterOptions {
                category,
                hue_range: hue_min..=hue_max,
                saturation_range: saturation_min..=saturation_max,
                value_range: value_min..=value_max,
                exclude_metallic,
            },
            stdout: &mut stdout,
        }),
        Commands::Favorites { command } => {
            let action = match &command {
                FavoritesCommand::List => FavoritesAction::List,
                FavoritesCommand::Add {
                    primary,
                    first,
                    second,
                    pattern,
                } => FavoritesAction::Add {
                    primary,
                    suggested: [first.as_str(), second.as_str()],
                    pattern: *pattern,
                },
                FavoritesCommand::Remove { id } => FavoritesAction::Remove { id },
            };

            favorites(FavoritesArgs {
                ctx,
                action,
                now,
                stdout: &mut stdout,
            })
        }
        Commands::History { command } => history(HistoryArgs {
            ctx,
            action: match command {
                HistoryCommand::List => HistoryAction::List,
                HistoryCommand::Clear => HistoryAction::Clear,
            },
            stdout: &mut stdout,
        }),
        Commands::Custom { command } => {
            let action = match &command {
                CustomCommand::List => CustomAction::List,
                CustomCommand::Add { name, value } => CustomAction::Add { name, color: value },
                CustomCommand::Edit {
                    custom_color,
                    name,
                    value,
                } => CustomAction::Edit {
                    color_ref: custom_color,
                    name: name.as_deref(),
                    color: value.as_deref(),
                },
                CustomCommand::Remove { custom_color } => CustomAction::Remove {
                    color_ref: custom_color,
                },
            };

            custom(CustomArgs {
                ctx,
                action,
                now,
                stdout: &mut stdout,
            })
        }
        Commands::Share {
            primary,
            first,
            second,
            pattern,
            link_only,
        } => share(ShareArgs {
            ctx,
            primary: &primary,
            suggested: [first.as_str(), second.as_str()],
            pattern,
            link_only,
            stdout: &mut stdout,
        }),
        Commands::Open { link } => open(OpenArgs {
            ctx,
            link: &link,
            now,
            stdout: &mut stdout,
        }),
    }
}
