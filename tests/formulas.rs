use std::thread;

use formula_forge::io::{FormulaReader, ResultWriter, TableFormat, read_table};
use formula_forge::{
    Config, DuplicatePolicy, ElementTable, FormulaError, MalformedKind, Mode, Token,
    UnknownElementPolicy, check_balance, evaluate, expand, is_balanced, process, proton_sum,
    reconstruct, tokenize,
};

fn builtin() -> &'static ElementTable {
    ElementTable::builtin()
}

fn expanded(formula: &str) -> String {
    process(formula, builtin(), Mode::Expand, &Config::default()).unwrap()
}

fn protons(formula: &str) -> u64 {
    evaluate(formula, builtin(), &Config::default())
        .unwrap()
        .protons
}

#[test]
fn simple_binary_compound() {
    assert_eq!(expanded("NaCl"), "Na Cl");
    assert_eq!(protons("NaCl"), 11 + 17);
}

#[test]
fn element_multiplier() {
    assert_eq!(expanded("H2O"), "H H O");
    assert_eq!(protons("H2O"), 10);
}

#[test]
fn group_multiplier() {
    let eval = evaluate("Ca3(PO4)2", builtin(), &Config::default()).unwrap();
    assert_eq!(eval.atoms.to_string(), "Ca Ca Ca P O O O O P O O O O");
    assert_eq!(eval.atoms.len(), 13);
    assert_eq!(eval.protons, 3 * 20 + 2 * (15 + 4 * 8));
    assert_eq!(eval.protons, 154);
}

#[test]
fn nested_groups_multiply_through() {
    let eval = evaluate("K4(Fe(CN)6)", builtin(), &Config::default()).unwrap();
    let counts = eval.atoms.counts();
    assert_eq!(counts["K"], 4);
    assert_eq!(counts["Fe"], 1);
    assert_eq!(counts["C"], 6);
    assert_eq!(counts["N"], 6);
    assert_eq!(eval.protons, 4 * 19 + 26 + 6 * (6 + 7));
}

#[test]
fn group_repetition_preserves_inner_order() {
    let table =
        ElementTable::build([("A", 1), ("B", 2), ("C", 3)], DuplicatePolicy::KeepFirst).unwrap();
    let atoms = expand(&tokenize("(AB)3", &table).unwrap()).unwrap();
    assert_eq!(atoms.as_slice(), ["A", "B", "A", "B", "A", "B"]);

    let atoms = expand(&tokenize("((AB)2C)3", &table).unwrap()).unwrap();
    assert_eq!(atoms.len(), 15);
    assert_eq!(atoms.counts()["C"], 3);
}

#[test]
fn greedy_match_prefers_longest_symbol() {
    let tokens = tokenize("Co", builtin()).unwrap();
    assert!(matches!(tokens[..], [Token::Element { symbol: "Co", .. }]));

    let tokens = tokenize("CO", builtin()).unwrap();
    assert_eq!(tokens.len(), 2);
}

#[test]
fn unknown_symbol_is_reported_with_offset() {
    let err = tokenize("NaXx", builtin()).unwrap_err();
    assert!(matches!(
        err,
        FormulaError::UnmatchedSymbol { pos: 2, ch: 'X' }
    ));
    assert_eq!(err.position(), Some(2));
}

#[test]
fn tokens_reconstruct_the_formula() {
    for formula in ["H2O", "Ca3(PO4)2", "K4(Fe(CN)6)", "((CH3)3C)2O", "H02", ""] {
        let tokens = tokenize(formula, builtin()).unwrap();
        let rebuilt = reconstruct(&tokens);
        assert_eq!(rebuilt, formula);

        let again = tokenize(&rebuilt, builtin()).unwrap();
        assert_eq!(again.len(), tokens.len());
        assert!(tokens.iter().zip(&again).all(|(a, b)| a.same_kind(b)));
    }
}

#[test]
fn empty_formula_is_empty_sequence() {
    let eval = evaluate("", builtin(), &Config::default()).unwrap();
    assert!(eval.tokens.is_empty());
    assert!(eval.atoms.is_empty());
    assert_eq!(eval.protons, 0);
}

#[test]
fn malformed_groups_are_errors() {
    let config = Config::default();
    assert!(matches!(
        evaluate("Mg(OH", builtin(), &config),
        Err(FormulaError::Malformed {
            pos: 2,
            kind: MalformedKind::UnclosedGroup
        })
    ));
    assert!(matches!(
        evaluate("MgOH)2", builtin(), &config),
        Err(FormulaError::Malformed {
            pos: 4,
            kind: MalformedKind::UnmatchedClose
        })
    ));
    assert!(matches!(
        evaluate("2H", builtin(), &config),
        Err(FormulaError::Malformed {
            kind: MalformedKind::DanglingMultiplier,
            ..
        })
    ));
}

#[test]
fn balance_checker_is_table_free() {
    assert!(is_balanced("(Zz(Qq))"));
    assert!(!is_balanced("(("));
    assert_eq!(check_balance(")(").unwrap_err().position(), 0);
    assert_eq!(
        process("Ca3(PO4", builtin(), Mode::Verify, &Config::default()).unwrap(),
        "false"
    );
}

#[test]
fn custom_table_without_an_element() {
    let table = read_table(
        "H 1\nO 8\n".as_bytes(),
        TableFormat::Text,
        DuplicatePolicy::Reject,
    )
    .unwrap();
    let config = Config::default();
    assert_eq!(process("H2O2", &table, Mode::Protons, &config).unwrap(), "18");
    assert!(process("NaCl", &table, Mode::Protons, &config).is_err());
}

#[test]
fn unknown_element_policy_applies_to_sums() {
    let lookup = ElementTable::build([("H", 1)], DuplicatePolicy::KeepFirst).unwrap();
    let tokenizer_table =
        ElementTable::build([("H", 1), ("Q", 0)], DuplicatePolicy::KeepFirst).unwrap();
    let atoms = expand(&tokenize("H2Q", &tokenizer_table).unwrap()).unwrap();

    assert_eq!(
        proton_sum(&atoms, &lookup, UnknownElementPolicy::Zero).unwrap(),
        2
    );
    assert!(matches!(
        proton_sum(&atoms, &lookup, UnknownElementPolicy::Reject),
        Err(FormulaError::UnknownElement { symbol }) if symbol == "Q"
    ));
}

#[test]
fn toml_table_loads() {
    let text = "[elements]\nH = 1\nC = 6\nO = 8\n";
    let table = read_table(text.as_bytes(), TableFormat::Toml, DuplicatePolicy::Reject).unwrap();
    assert_eq!(
        process("C2H6O", &table, Mode::Protons, &Config::default()).unwrap(),
        "26"
    );
}

#[test]
fn batch_through_reader_and_writer() {
    let input = "H2O NaCl\nCa3(PO4)2\n";
    let mut writer = ResultWriter::new(Vec::new());

    for record in FormulaReader::new(input.as_bytes()) {
        let record = record.unwrap();
        let line = process(&record.text, builtin(), Mode::Protons, &Config::default()).unwrap();
        writer.write_line(&line).unwrap();
    }

    assert_eq!(writer.lines_written(), 3);
    let out = String::from_utf8(writer.finish().unwrap()).unwrap();
    assert_eq!(out, "10\n28\n154\n");
}

#[test]
fn shared_table_across_threads() {
    let table = builtin();
    let formulas = ["H2O", "NaCl", "Ca3(PO4)2", "K4(Fe(CN)6)", "C6H12O6"];

    let sums: Vec<u64> = thread::scope(|s| {
        let handles: Vec<_> = formulas
            .iter()
            .map(|formula| {
                s.spawn(move || {
                    evaluate(formula, table, &Config::default())
                        .unwrap()
                        .protons
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sums, [10, 28, 154, 76 + 26 + 78, 36 + 12 + 48]);
}
