mod evaluate;
mod table;
mod verify;

use evaluate::run_eval;
use verify::run_verify;

use anyhow::Result;

use formula_forge::Mode;
use formula_forge::io::FormulaRecord;

use crate::cli::Command;
use crate::display::Context;

/// A formula left out of the results and why.
pub struct Skipped {
    pub record: FormulaRecord,
    pub reason: String,
}

/// What a completed batch did.
#[derive(Default)]
pub struct Outcome {
    pub processed: usize,
    pub skipped: Vec<Skipped>,
    pub unbalanced: usize,
}

impl Outcome {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn total(&self) -> usize {
        self.processed + self.skipped.len()
    }

    fn skip(&mut self, record: &FormulaRecord, reason: impl ToString) {
        self.skipped.push(Skipped {
            record: record.clone(),
            reason: reason.to_string(),
        });
    }
}

pub fn dispatch(command: Command, ctx: Context) -> Result<Outcome> {
    match command {
        Command::Expand(args) => run_eval(args, Mode::Expand, ctx),
        Command::Protons(args) => run_eval(args, Mode::Protons, ctx),
        Command::Verify(args) => run_verify(args, ctx),
    }
}
