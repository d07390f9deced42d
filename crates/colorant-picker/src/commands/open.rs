use chrono::{DateTime, Utc};

use crate::context::Context;
use crate::output::write_palette;
use crate::share::{payload_from_link, restore};
use crate::storage::History;
use crate::Result;

pub struct OpenArgs<'a, W: std::io::Write> {
    pub ctx: &'a mut Context,
    /// A share link or just its payload.
    pub link: &'a str,
    pub now: DateTime<Utc>,
    pub stdout: &'a mut W,
}

/// Shows a shared palette and adds it to the history.
pub fn run<W: std::io::Write>(args: OpenArgs<W>) -> Result<()> {
    let ctx = args.ctx;
    let payload = payload_from_link(args.link)?;
    let palette = restore(&payload, &ctx.catalog)?;

    write_palette(args.stdout, &palette, &ctx.config().ratio)?;

    let mut history = History::load(&*ctx.store)?;
    history.record(&palette, ctx.ids.as_mut(), args.now, ctx.store.as_mut())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::context;
    use crate::share::share_url;
    use crate::Error;
    use colorant_harmony::{Dye, HarmonyPattern, Palette, Rgb255};

    fn open(ctx: &mut Context, link: &str) -> Result<String> {
        let mut stdout = std::io::Cursor::new(Vec::new());

        run(OpenArgs {
            ctx,
            link,
            now: Utc::now(),
            stdout: &mut stdout,
        })?;

        Ok(String::from_utf8(stdout.into_inner()).unwrap())
    }

    #[test]
    fn opens_a_shared_palette() {
        let mut ctx = context();
        let palette = Palette::from_ids(
            &ctx.catalog,
            "dye_034",
            ["dye_016", "dye_020"],
            HarmonyPattern::SplitComplementary,
        )
        .unwrap();
        let link = share_url(&palette).unwrap();

        let output = open(&mut ctx, &link).unwrap();
        assert!(output.starts_with("Accent (split-complementary)\n"));
        assert!(output.contains("Sky Blue"));

        let history = History::load(&*ctx.store).unwrap();
        assert!(history.list()[0].matches(&palette));
    }

    #[test]
    fn shared_custom_colors_stay_apart_in_history() {
        let mut ctx = context();
        let link = |ctx: &Context, rgb: Rgb255| {
            let primary = Dye::custom("mine", "Mine", rgb.to_srgb());
            let suggested = [
                ctx.catalog.get("dye_016").unwrap().clone(),
                ctx.catalog.get("dye_020").unwrap().clone(),
            ];
            share_url(&Palette::new(primary, suggested, HarmonyPattern::Triadic)).unwrap()
        };

        let teal = link(&ctx, Rgb255::new(0, 128, 128));
        let plum = link(&ctx, Rgb255::new(128, 0, 96));
        open(&mut ctx, &teal).unwrap();
        open(&mut ctx, &plum).unwrap();

        let history = History::load(&*ctx.store).unwrap();
        let colors: Vec<Rgb255> = history.list().iter().map(|e| e.primary_dye.rgb).collect();
        assert_eq!(colors, vec![Rgb255::new(128, 0, 96), Rgb255::new(0, 128, 128)]);
    }

    #[test]
    fn rejects_broken_links() {
        let mut ctx = context();

        assert!(matches!(
            open(&mut ctx, "https://colorant-picker.pl4rd.com/share/%%%"),
            Err(Error::InvalidShare(_))
        ));
        assert!(History::load(&*ctx.store).unwrap().list().is_empty());
    }
}
