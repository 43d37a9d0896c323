use anyhow::{Context, Result, bail};

use formula_forge::check_balance;
use formula_forge::io::{FormulaReader, ResultWriter};

use super::Outcome;
use crate::cli::VerifyArgs;
use crate::display::{Context as DisplayContext, Progress, print_imbalance, print_run_summary};
use crate::io::{create_output, display_name, open_input, stdin_is_tty};

const TOTAL_STEPS: u8 = 2;

pub fn run_verify(args: VerifyArgs, ctx: DisplayContext) -> Result<Outcome> {
    if args.io.input.is_none() && stdin_is_tty() {
        bail!(
            "No input file specified and stdin is a terminal.\n\nUsage: fforge verify -i <INPUT> or pipe formulas via stdin."
        );
    }

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Reading formulas");
    let input_name = display_name(args.io.input.as_deref(), "stdin");
    let records = FormulaReader::new(open_input(args.io.input.as_deref())?)
        .read_all()
        .with_context(|| format!("Failed to read formulas from {input_name}"))?;
    progress.complete_step(
        "Reading formulas",
        &[format!("{} formulas from {}", records.len(), input_name)],
    );

    progress.step("Checking parentheses");
    let output_name = display_name(args.io.output.as_deref(), "stdout");
    let mut writer = ResultWriter::new(create_output(
        args.io.output.as_deref(),
        args.io.append,
    )?);

    let mut outcome = Outcome::default();

    for (done, record) in records.iter().enumerate() {
        progress.advance(done, records.len());

        let verdict = check_balance(&record.text);
        if let Err(imbalance) = &verdict {
            tracing::info!(
                index = record.index,
                line = record.line,
                formula = %record.text,
                "unbalanced parentheses"
            );
            if !ctx.quiet {
                print_imbalance(record, imbalance);
            }
            outcome.unbalanced += 1;
        }

        writer
            .write_line(&verdict.is_ok().to_string())
            .with_context(|| format!("Failed to write results to {output_name}"))?;
        outcome.processed += 1;
    }

    writer
        .finish()
        .with_context(|| format!("Failed to flush results to {output_name}"))?;

    let verdict = if outcome.unbalanced == 0 {
        "Parentheses are balanced for all formulas".to_string()
    } else {
        format!("{} of {} formulas unbalanced", outcome.unbalanced, outcome.processed)
    };
    progress.complete_step("Checking parentheses", &[verdict]);
    progress.finish();

    if ctx.interactive {
        print_run_summary(&[
            ("Mode", "verify".to_string()),
            ("Formulas", outcome.processed.to_string()),
            ("Balanced", (outcome.processed - outcome.unbalanced).to_string()),
            ("Unbalanced", outcome.unbalanced.to_string()),
        ]);
    }

    Ok(outcome)
}
