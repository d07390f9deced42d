use crate::context::Context;
use crate::filter::FilterOptions;
use crate::output::write_dye;
use crate::Result;

pub struct DyesArgs<'a, W: std::io::Write> {
    pub ctx: &'a Context,
    pub filter: FilterOptions,
    pub stdout: &'a mut W,
}

/// Lists catalog dyes matching `filter`.
pub fn run<W: std::io::Write>(args: DyesArgs<W>) -> Result<()> {
    let dyes = args.filter.apply(args.ctx.catalog.dyes());

    for dye in &dyes {
        write_dye(args.stdout, dye)?;
    }

    writeln!(
        args.stdout,
        "{} of {} dyes",
        dyes.len(),
        args.ctx.catalog.len()
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::context;
    use colorant_harmony::DyeCategory;

    fn dyes(filter: FilterOptions) -> Vec<String> {
        let ctx = context();
        let mut stdout = std::io::Cursor::new(Vec::new());

        run(DyesArgs {
            ctx: &ctx,
            filter,
            stdout: &mut stdout,
        })
        .unwrap();

        let output = String::from_utf8(stdout.into_inner()).unwrap();
        output.lines().map(str::to_owned).collect()
    }

    #[test]
    fn lists_the_whole_catalog_by_default() {
        let lines = dyes(FilterOptions::default());

        assert_eq!(lines.len(), 54);
        assert!(lines[0].contains("#E4DFD0  Snow White"));
        assert_eq!(lines.last().unwrap(), "53 of 53 dyes");
    }

    #[test]
    fn applies_filters() {
        let lines = dyes(FilterOptions {
            category: Some(DyeCategory::Rare),
            exclude_metallic: true,
            ..Default::default()
        });

        assert!(lines.iter().all(|line| !line.contains("Metallic")));
        assert!(lines.last().unwrap().ends_with("of 53 dyes"));
    }
}
