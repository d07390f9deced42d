use colorant_harmony::compute_palette_ratio;

use crate::context::Context;
use crate::output::write_role;
use crate::Result;

pub struct RatioArgs<'a, W: std::io::Write> {
    pub ctx: &'a Context,
    pub primary: &'a str,
    pub suggested: [&'a str; 2],
    pub stdout: &'a mut W,
}

/// Prints how much of an outfit each color should cover.
pub fn run<W: std::io::Write>(args: RatioArgs<W>) -> Result<()> {
    let primary = args.ctx.resolve(args.primary)?;
    let a = args.ctx.resolve(args.suggested[0])?;
    let b = args.ctx.resolve(args.suggested[1])?;

    for entry in compute_palette_ratio(&primary, &a, &b, &args.ctx.config().ratio) {
        write_role(args.stdout, &entry)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::context;

    fn ratio(primary: &str, a: &str, b: &str) -> Result<Vec<String>> {
        let ctx = context();
        let mut stdout = std::io::Cursor::new(Vec::new());

        run(RatioArgs {
            ctx: &ctx,
            primary,
            suggested: [a, b],
            stdout: &mut stdout,
        })?;

        let output = String::from_utf8(stdout.into_inner()).unwrap();
        Ok(output.lines().map(str::to_owned).collect())
    }

    #[test]
    fn the_closer_color_is_the_sub() {
        // Wine Red sits much closer to Rust Red than Sky Blue does.
        let lines = ratio("Rust Red", "Sky Blue", "Wine Red").unwrap();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Main") && lines[0].contains("Rust Red"));
        assert!(lines[1].contains("Sub") && lines[1].contains("Wine Red"));
        assert!(lines[2].contains("Accent") && lines[2].contains("Sky Blue"));

        let total: u32 = lines
            .iter()
            .map(|line| {
                let percent = line.split('%').next().unwrap();
                percent.rsplit(' ').next().unwrap().parse::<u32>().unwrap()
            })
            .sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn accepts_literals() {
        let lines = ratio("#FF0000", "255,0,0", "#0000FF").unwrap();
        assert_eq!(lines.len(), 3);
    }
}
