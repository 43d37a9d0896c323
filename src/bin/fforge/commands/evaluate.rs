use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};

use formula_forge::io::{FormulaReader, ResultWriter};
use formula_forge::{
    Config, ElementTable, ExpandedSequence, FormulaError, Mode, evaluate, expand, tokenize,
};

use super::Outcome;
use super::table::load_table;
use crate::cli::EvalArgs;
use crate::config::{build_eval_config, duplicate_policy};
use crate::display::{
    Context as DisplayContext, Progress, print_element_distribution, print_formula_error,
    print_run_summary,
};
use crate::io::{create_output, display_name, open_input, stdin_is_tty};

const TOTAL_STEPS: u8 = 3;

pub fn run_eval(args: EvalArgs, mode: Mode, ctx: DisplayContext) -> Result<Outcome> {
    if args.io.input.is_none() && stdin_is_tty() {
        bail!(
            "No input file specified and stdin is a terminal.\n\nUsage: fforge {mode} -i <INPUT> or pipe formulas via stdin."
        );
    }

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Loading element table");
    let table = load_table(&args.table, duplicate_policy(&args.batch))?;
    let table_name = display_name(args.table.table.as_deref(), "built-in");
    progress.complete_step(
        "Loading element table",
        &[format!("{} elements from {}", table.len(), table_name)],
    );

    progress.step("Reading formulas");
    let input_name = display_name(args.io.input.as_deref(), "stdin");
    let records = FormulaReader::new(open_input(args.io.input.as_deref())?)
        .read_all()
        .with_context(|| format!("Failed to read formulas from {input_name}"))?;
    progress.complete_step(
        "Reading formulas",
        &[format!("{} formulas from {}", records.len(), input_name)],
    );

    let label = step_label(mode);
    progress.step(label);

    let config = build_eval_config(&args.batch);
    let output_name = display_name(args.io.output.as_deref(), "stdout");
    let mut writer = ResultWriter::new(create_output(
        args.io.output.as_deref(),
        args.io.append,
    )?);

    let mut outcome = Outcome::default();
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();

    for (done, record) in records.iter().enumerate() {
        progress.advance(done, records.len());

        match evaluate_line(&record.text, &table, mode, &config) {
            Ok((line, atoms)) => {
                writer
                    .write_line(&line)
                    .with_context(|| format!("Failed to write results to {output_name}"))?;
                for (symbol, n) in atoms.counts() {
                    *counts.entry(symbol.to_string()).or_default() += n;
                }
                outcome.processed += 1;
            }
            Err(err) => {
                if !ctx.quiet {
                    print_formula_error(record, &err);
                }
                if args.batch.fail_fast {
                    return Err(anyhow::Error::new(err).context(format!(
                        "Formula #{} '{}' (line {}, column {}) could not be processed",
                        record.index, record.text, record.line, record.column
                    )));
                }
                tracing::debug!(
                    index = record.index,
                    formula = %record.text,
                    error = %err,
                    "skipping formula"
                );
                outcome.skip(record, err);
            }
        }
    }

    let written = writer.lines_written();
    writer
        .finish()
        .with_context(|| format!("Failed to flush results to {output_name}"))?;

    progress.complete_step(
        label,
        &[
            format!("{written} lines → {output_name}"),
            format!("{} skipped", outcome.skipped.len()),
        ],
    );
    progress.finish();

    if ctx.interactive {
        print_run_summary(&[
            ("Mode", mode.to_string()),
            ("Element Table", table_name),
            ("Formulas", outcome.total().to_string()),
            ("Written", written.to_string()),
            ("Skipped", outcome.skipped.len().to_string()),
        ]);
        if !counts.is_empty() {
            print_element_distribution(&counts);
        }
    }

    Ok(outcome)
}

fn step_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Expand => "Expanding formulas",
        Mode::Protons => "Summing protons",
        Mode::Verify => "Checking parentheses",
    }
}

/// Output line plus the expanded atoms, which feed the distribution table.
fn evaluate_line<'a>(
    formula: &'a str,
    table: &ElementTable,
    mode: Mode,
    config: &Config,
) -> Result<(String, ExpandedSequence<'a>), FormulaError> {
    match mode {
        Mode::Protons => {
            let eval = evaluate(formula, table, config)?;
            Ok((eval.render(mode), eval.atoms))
        }
        _ => {
            let atoms = expand(&tokenize(formula, table)?)?;
            Ok((atoms.to_string(), atoms))
        }
    }
}
