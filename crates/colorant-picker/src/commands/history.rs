use crate::context::Context;
use crate::output::{write_done, write_entries};
use crate::storage::History;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    List,
    Clear,
}

pub struct HistoryArgs<'a, W: std::io::Write> {
    pub ctx: &'a mut Context,
    pub action: HistoryAction,
    pub stdout: &'a mut W,
}

pub fn run<W: std::io::Write>(args: HistoryArgs<W>) -> Result<()> {
    let ctx = args.ctx;
    let mut history = History::load(&*ctx.store)?;

    match args.action {
        HistoryAction::List => write_entries(
            args.stdout,
            history.list(),
            &ctx.config().ratio,
            "No palettes viewed yet",
        ),
        HistoryAction::Clear => {
            history.clear(ctx.store.as_mut())?;
            write_done(args.stdout, "Cleared history")
        }
    }
}
