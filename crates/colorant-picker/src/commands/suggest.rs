use chrono::{DateTime, Utc};
use colorant_harmony::{HarmonyPattern, Palette, RngSource};
use owo_colors::{OwoColorize as _, Stream};

use crate::catalog::dye_reference;
use crate::context::Context;
use crate::filter::suggestion_pool;
use crate::output::write_palette;
use crate::storage::History;
use crate::Result;

pub struct SuggestArgs<'a, W: std::io::Write> {
    pub ctx: &'a mut Context,
    pub primary: &'a str,
    pub pattern: HarmonyPattern,
    pub exclude_metallic: bool,
    /// Fixes the fallback picks. A fresh seed is drawn without one.
    pub seed: Option<u64>,
    pub now: DateTime<Utc>,
    pub stdout: &'a mut W,
}

pub fn run<W: std::io::Write>(args: SuggestArgs<W>) -> Result<()> {
    let ctx = args.ctx;
    let primary = ctx.resolve(args.primary)?;
    let pool = suggestion_pool(ctx.catalog.dyes(), args.exclude_metallic);

    let mut rng = match args.seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_os_rng(),
    };
    let palette = Palette::generate(primary, args.pattern, &pool, &ctx.generator, &mut rng)?;

    write_palette(args.stdout, &palette, &ctx.config().ratio)?;

    let mut history = History::load(&*ctx.store)?;
    history.record(&palette, ctx.ids.as_mut(), args.now, ctx.store.as_mut())?;

    let custom_colors = ctx.custom_colors()?;
    let [a, b] = &palette.suggested;
    let save = format!(
        "colorant-picker favorites add {} {} {} --pattern {}",
        quote(&dye_reference(&palette.primary, &custom_colors)),
        quote(&a.id),
        quote(&b.id),
        palette.pattern,
    );
    writeln!(args.stdout)?;
    writeln!(
        args.stdout,
        "Save it with {}",
        save.if_supports_color(Stream::Stdout, |s| s.cyan())
    )?;

    Ok(())
}

fn quote(value: &str) -> String {
    if value.starts_with('#') || value.contains(char::is_whitespace) {
        format!("\"{}\"", value)
    } else {
        value.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::context;
    use crate::Error;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn suggest(
        ctx: &mut Context,
        primary: &str,
        pattern: HarmonyPattern,
        seed: u64,
    ) -> Result<String> {
        let mut stdout = std::io::Cursor::new(Vec::new());

        run(SuggestArgs {
            ctx,
            primary,
            pattern,
            exclude_metallic: true,
            seed: Some(seed),
            now: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            stdout: &mut stdout,
        })?;

        Ok(String::from_utf8(stdout.into_inner()).unwrap())
    }

    #[test]
    fn prints_the_palette_and_records_history() {
        let mut ctx = context();
        let output = suggest(&mut ctx, "dye_011", HarmonyPattern::Triadic, 7).unwrap();

        assert!(output.starts_with("Balanced (triadic)\n"));
        assert!(output.contains("Rust Red"));
        assert!(output.contains("Save it with colorant-picker favorites add dye_011 "));

        let history = History::load(&*ctx.store).unwrap();
        assert_eq!(history.list().len(), 1);
        let entry = &history.list()[0];
        assert_eq!(entry.primary_dye.id, "dye_011");
        assert_eq!(entry.pattern, HarmonyPattern::Triadic);
        assert!(entry.suggested_dyes.iter().all(|d| !d.tags.iter().any(|t| t == "metallic")));
    }

    #[test]
    fn same_seed_gives_same_output() {
        let mut first = context();
        let mut second = context();

        for pattern in HarmonyPattern::ALL {
            assert_eq!(
                suggest(&mut first, "Sky Blue", pattern, 42).unwrap(),
                suggest(&mut second, "Sky Blue", pattern, 42).unwrap()
            );
        }
    }

    #[test]
    fn accepts_color_literals() {
        let mut ctx = context();
        let output = suggest(&mut ctx, "#2E8B57", HarmonyPattern::Analogous, 1).unwrap();

        assert!(output.contains("#2E8B57"));
        assert!(output.contains("favorites add \"#2E8B57\" "));
    }

    #[test]
    fn unknown_primary_is_an_error() {
        let mut ctx = context();

        assert!(matches!(
            suggest(&mut ctx, "Plaid", HarmonyPattern::Triadic, 1),
            Err(Error::UnknownDye(_))
        ));
        assert!(History::load(&*ctx.store).unwrap().list().is_empty());
    }
}
