use colorant_harmony::{color, Rgb255, RngSource};
use owo_colors::{OwoColorize as _, Stream};

use crate::context::Context;
use crate::filter::suggestion_pool;
use crate::output::swatch_rgb;
use crate::Result;

pub struct PatternsArgs<'a, W: std::io::Write> {
    pub ctx: &'a Context,
    pub primary: &'a str,
    pub exclude_metallic: bool,
    pub seed: Option<u64>,
    pub stdout: &'a mut W,
}

/// Shows what every pattern does with one primary.
pub fn run<W: std::io::Write>(args: PatternsArgs<W>) -> Result<()> {
    let primary = args.ctx.resolve(args.primary)?;
    let pool = suggestion_pool(args.ctx.catalog.dyes(), args.exclude_metallic);
    let mut rng = match args.seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_os_rng(),
    };

    let samples = args
        .ctx
        .generator
        .pattern_samples(&primary, &pool, &mut rng)?;

    for (pattern, hexes) in samples {
        let mut swatches = Vec::with_capacity(hexes.len());
        for hex in &hexes {
            let rgb = Rgb255::from_srgb(color::parse_hex(hex)?);
            swatches.push(format!("{} {}", swatch_rgb(rgb), hex));
        }

        writeln!(
            args.stdout,
            "{:<9} {:<20} {}",
            pattern.label(),
            pattern.as_str(),
            swatches.join("  "),
        )?;
        writeln!(
            args.stdout,
            "          {}",
            pattern
                .description()
                .if_supports_color(Stream::Stdout, |s| s.dimmed()),
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::context;
    use colorant_harmony::HarmonyPattern;

    #[test]
    fn lists_every_pattern() {
        let ctx = context();
        let mut stdout = std::io::Cursor::new(Vec::new());

        run(PatternsArgs {
            ctx: &ctx,
            primary: "dye_034",
            exclude_metallic: false,
            seed: Some(3),
            stdout: &mut stdout,
        })
        .unwrap();

        let output = String::from_utf8(stdout.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), HarmonyPattern::ALL.len() * 2);

        for (index, pattern) in HarmonyPattern::ALL.iter().enumerate() {
            let line = lines[index * 2];
            assert!(line.starts_with(pattern.label()), "{}", line);
            assert!(line.contains(pattern.as_str()));
            // Sky Blue's hex leads every row.
            assert!(line.contains("#83B0D2"));
        }
    }
}
