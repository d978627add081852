use texdiag_log::{ParseOptions, parse_latex_log};

#[test]
fn test_many_parens_on_one_line() {
    let depth = 100_000;
    let log = format!("{}{}", "(".repeat(depth), ")".repeat(depth));
    let result = parse_latex_log(&log, &ParseOptions::default());
    assert!(result.files.is_empty());
    assert!(result.is_empty());
}

#[test]
fn test_deeply_nested_files() {
    let depth = 1_000;
    let mut log = String::new();
    for i in 0..depth {
        log.push_str(&format!("(./d{i}/f.tex "));
    }
    log.push_str("\nLaTeX Warning: Deep.\n");
    log.push_str(&")".repeat(depth));
    let result = parse_latex_log(&log, &ParseOptions::default());
    assert_eq!(
        result.warnings[0].file.as_deref(),
        Some(format!("./d{}/f.tex", depth - 1).as_str())
    );
    assert_eq!(result.file_paths().count(), depth);
}

#[test]
fn test_large_log() {
    let block = "\
(./sec/part.tex
LaTeX Warning: Citation `x' on page 1 undefined on input line 5.
Overfull \\hbox (1.0pt too wide) in paragraph at lines 3--4
)
";
    let copies = 5_000;
    let log = block.repeat(copies);
    let result = parse_latex_log(&log, &ParseOptions::default());
    assert_eq!(result.warnings.len(), copies);
    assert_eq!(result.typesetting.len(), copies);
    assert_eq!(result.files.len(), 1);
    assert_eq!(result.file_paths().count(), copies);

    let deduped = parse_latex_log(&log, &ParseOptions::default().ignoring_duplicates(true));
    assert_eq!(deduped.all.len(), 2);
}
