use colorant_harmony::{HarmonyPattern, Palette};

use crate::context::Context;
use crate::share::{share_text, share_url};
use crate::Result;

pub struct ShareArgs<'a, W: std::io::Write> {
    pub ctx: &'a Context,
    pub primary: &'a str,
    pub suggested: [&'a str; 2],
    pub pattern: HarmonyPattern,
    /// Print only the link, without the post text.
    pub link_only: bool,
    pub stdout: &'a mut W,
}

pub fn run<W: std::io::Write>(args: ShareArgs<W>) -> Result<()> {
    let ctx = args.ctx;
    let palette = Palette::new(
        ctx.resolve(args.primary)?,
        [
            ctx.resolve_catalog_dye(args.suggested[0])?,
            ctx.resolve_catalog_dye(args.suggested[1])?,
        ],
        args.pattern,
    );

    let url = share_url(&palette)?;

    if args.link_only {
        writeln!(args.stdout, "{}", url)?;
    } else {
        writeln!(args.stdout, "{}", share_text(&palette, &url))?;
    }

    Ok(())
}
