use std::io::Write;

use colorant_harmony::{Dye, DyeWithRole, Palette, RatioConfig, Rgb255};
use owo_colors::{OwoColorize as _, Stream};

use crate::storage::PaletteEntry;
use crate::Result;

pub(crate) fn swatch(dye: &Dye) -> String {
    swatch_rgb(dye.rgb255())
}

pub(crate) fn swatch_rgb(rgb: Rgb255) -> String {
    "■■"
        .if_supports_color(Stream::Stdout, |s| s.truecolor(rgb.r, rgb.g, rgb.b))
        .to_string()
}

pub(crate) fn write_dye<W: Write>(stdout: &mut W, dye: &Dye) -> Result<()> {
    writeln!(
        stdout,
        "  {} {}  {:<24} {}",
        swatch(dye),
        dye.hex(),
        dye.name,
        dye.id.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    )?;

    Ok(())
}

pub(crate) fn write_role<W: Write>(stdout: &mut W, entry: &DyeWithRole) -> Result<()> {
    writeln!(
        stdout,
        "  {} {:<6} {:>3}%  {}  {}",
        swatch(entry.dye),
        entry.role.label(),
        entry.percent,
        entry.dye.hex(),
        entry.dye.name,
    )?;

    Ok(())
}

/// The pattern heading followed by one line per role.
pub(crate) fn write_palette<W: Write>(
    stdout: &mut W,
    palette: &Palette,
    ratio: &RatioConfig,
) -> Result<()> {
    writeln!(
        stdout,
        "{} {}",
        palette
            .pattern
            .label()
            .if_supports_color(Stream::Stdout, |s| s.bold()),
        format!("({})", palette.pattern).if_supports_color(Stream::Stdout, |s| s.dimmed()),
    )?;

    for entry in palette.ratio_with(ratio) {
        write_role(stdout, &entry)?;
    }

    Ok(())
}

/// Stored palettes with their ids, newest first.
pub(crate) fn write_entries<W: Write>(
    stdout: &mut W,
    entries: &[PaletteEntry],
    ratio: &RatioConfig,
    empty_message: &str,
) -> Result<()> {
    if entries.is_empty() {
        writeln!(stdout, "{}", empty_message)?;
        return Ok(());
    }

    for (index, entry) in entries.iter().enumerate() {
        if index > 0 {
            writeln!(stdout)?;
        }

        writeln!(
            stdout,
            "{}  {}",
            entry.id.if_supports_color(Stream::Stdout, |s| s.cyan()),
            entry.created_at.format("%Y-%m-%d %H:%M"),
        )?;
        write_palette(stdout, &entry.to_palette(), ratio)?;
    }

    Ok(())
}

pub(crate) fn write_done<W: Write>(stdout: &mut W, message: &str) -> Result<()> {
    writeln!(
        stdout,
        "{} {}",
        "✓".if_supports_color(Stream::Stdout, |s| s.green()),
        message
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use colorant_harmony::{DyeCategory, HarmonyPattern};

    #[test]
    fn palette_lines_show_roles_and_percentages() {
        let dye = |id: &str, name: &str, rgb| Dye::new(id, name, DyeCategory::Red, rgb);
        let palette = Palette::new(
            dye("p", "Primary", Rgb255::new(200, 40, 40)),
            [
                dye("a", "First", Rgb255::new(40, 200, 40)),
                dye("b", "Second", Rgb255::new(40, 40, 200)),
            ],
            HarmonyPattern::Triadic,
        );

        let mut stdout = std::io::Cursor::new(Vec::new());
        write_palette(&mut stdout, &palette, &RatioConfig::default()).unwrap();
        let output = String::from_utf8(stdout.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Balanced (triadic)");
        assert!(lines[1].contains("Main"));
        assert!(lines[1].contains("#C82828  Primary"));
        assert!(lines[2].contains("Sub"));
        assert!(lines[3].contains("Accent"));
    }
}
