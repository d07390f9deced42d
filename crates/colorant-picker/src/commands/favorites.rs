use chrono::{DateTime, Utc};
use colorant_harmony::{HarmonyPattern, Palette};

use crate::context::Context;
use crate::output::{write_done, write_entries};
use crate::storage::Favorites;
use crate::{Error, Result};

pub enum FavoritesAction<'a> {
    List,
    Add {
        primary: &'a str,
        suggested: [&'a str; 2],
        pattern: HarmonyPattern,
    },
    Remove {
        id: &'a str,
    },
}

pub struct FavoritesArgs<'a, W: std::io::Write> {
    pub ctx: &'a mut Context,
    pub action: FavoritesAction<'a>,
    pub now: DateTime<Utc>,
    pub stdout: &'a mut W,
}

pub fn run<W: std::io::Write>(args: FavoritesArgs<W>) -> Result<()> {
    let ctx = args.ctx;
    let mut favorites = Favorites::load(&*ctx.store)?;

    match args.action {
        FavoritesAction::List => write_entries(
            args.stdout,
            favorites.list(),
            &ctx.config().ratio,
            "No favorites yet",
        ),
        FavoritesAction::Add {
            primary,
            suggested,
            pattern,
        } => {
            let palette = Palette::new(
                ctx.resolve(primary)?,
                [
                    ctx.resolve_catalog_dye(suggested[0])?,
                    ctx.resolve_catalog_dye(suggested[1])?,
                ],
                pattern,
            );

            if favorites.contains(&palette) {
                return write_done(args.stdout, "Already in your favorites");
            }

            let entry = favorites.save(&palette, ctx.ids.as_mut(), args.now, ctx.store.as_mut())?;
            write_done(args.stdout, &format!("Saved favorite {}", entry.id))
        }
        FavoritesAction::Remove { id } => {
            if !favorites.remove(id, ctx.store.as_mut())? {
                return Err(Error::General(format!("No favorite with id `{}`", id)));
            }

            write_done(args.stdout, &format!("Removed favorite {}", id))
        }
    }
}
