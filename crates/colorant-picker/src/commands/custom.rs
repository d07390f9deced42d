use chrono::{DateTime, Utc};
use owo_colors::{OwoColorize as _, Stream};

use crate::color_input::parse_color;
use crate::context::Context;
use crate::output::{swatch_rgb, write_done};
use crate::{Error, Result};

pub enum CustomAction<'a> {
    List,
    Add {
        name: &'a str,
        color: &'a str,
    },
    Edit {
        color_ref: &'a str,
        name: Option<&'a str>,
        color: Option<&'a str>,
    },
    Remove {
        color_ref: &'a str,
    },
}

pub struct CustomArgs<'a, W: std::io::Write> {
    pub ctx: &'a mut Context,
    pub action: CustomAction<'a>,
    pub now: DateTime<Utc>,
    pub stdout: &'a mut W,
}

pub fn run<W: std::io::Write>(args: CustomArgs<W>) -> Result<()> {
    let ctx = args.ctx;
    let mut colors = ctx.custom_colors()?;

    match args.action {
        CustomAction::List => {
            if colors.list().is_empty() {
                writeln!(args.stdout, "No custom colors yet")?;
            }

            for color in colors.list() {
                writeln!(
                    args.stdout,
                    "  {} {}  {:<24} {}",
                    swatch_rgb(color.rgb),
                    color.hex(),
                    color.name,
                    color
                        .id
                        .if_supports_color(Stream::Stdout, |s| s.dimmed()),
                )?;
            }

            Ok(())
        }
        CustomAction::Add { name, color } => {
            let rgb = parse_color(color)?;
            let color = colors.add(name, rgb, ctx.ids.as_mut(), args.now, ctx.store.as_mut())?;

            write_done(
                args.stdout,
                &format!("Saved {} {} as {}", color.name, color.hex(), color.id),
            )
        }
        CustomAction::Edit {
            color_ref,
            name,
            color,
        } => {
            let id = find_id(&colors, color_ref)?;
            let rgb = color.map(parse_color).transpose()?;
            colors.update(&id, name, rgb, args.now, ctx.store.as_mut())?;

            write_done(args.stdout, &format!("Updated {}", id))
        }
        CustomAction::Remove { color_ref } => {
            let id = find_id(&colors, color_ref)?;
            colors.remove(&id, ctx.store.as_mut())?;

            write_done(args.stdout, &format!("Removed {}", id))
        }
    }
}

fn find_id(colors: &crate::storage::CustomColors, color_ref: &str) -> Result<String> {
    colors
        .find(color_ref)
        .map(|color| color.id.clone())
        .ok_or_else(|| Error::General(format!("No custom color `{}`", color_ref)))
}
