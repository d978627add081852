use texdiag_log::{LogParser, OptionsError, ParseOptions, parse_latex_log};

#[test]
fn test_parser_struct_and_free_function_agree() {
    let log = "(./main.tex\nLaTeX Warning: Label `a' multiply defined.\n)";
    let options = ParseOptions::default();
    let parser = LogParser::new(log, options.clone());
    assert_eq!(parser.options(), &options);
    assert_eq!(parser.parse(), parse_latex_log(log, &options));
}

#[test]
fn test_default_base_names() {
    let options = ParseOptions::default();
    assert!(!options.ignore_duplicates);
    assert_eq!(options.file_base_names, ["compiles", "/usr/local"]);

    let matcher = options.compile_base_names().unwrap();
    assert!(matcher.is_base_file("/usr/local/texlive/2023/texmf-dist/tex/latex/base/article.cls"));
    assert!(matcher.is_base_file("/var/lib/compiles/abc123/main.tex"));
    assert!(!matcher.is_base_file("./chapters/intro.tex"));
}

#[test]
fn test_base_names_do_not_change_parsing() {
    let log = "(/usr/local/tex/pkg.sty\nLaTeX Warning: From a package.\n)";
    let plain = parse_latex_log(log, &ParseOptions::default());
    let custom = parse_latex_log(
        log,
        &ParseOptions::default().with_file_base_names(["^/opt/"]),
    );
    assert_eq!(plain, custom);
}

#[test]
fn test_project_only_filters_entries() {
    let log = "\
LaTeX Warning: Unattributed.
(./main.tex
(/usr/local/tex/pkg.sty
LaTeX Warning: From a package.
)
LaTeX Warning: From the project.
)
";
    let options = ParseOptions::default();
    let result = parse_latex_log(log, &options);
    assert_eq!(result.warnings.len(), 3);

    let filtered = options.compile_base_names().unwrap().project_only(&result);
    let messages: Vec<&str> = filtered.all.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, ["Unattributed.", "From the project."]);
    assert_eq!(filtered.warnings.len(), 2);
    assert_eq!(filtered.files, result.files);
}

#[test]
fn test_invalid_base_name_pattern() {
    let options = ParseOptions::default().with_file_base_names(["ok", "("]);
    match options.compile_base_names() {
        Err(OptionsError::InvalidPattern { pattern, .. }) => assert_eq!(pattern, "("),
        other => panic!("expected InvalidPattern, got {other:?}"),
    }
}

#[test]
fn test_options_from_json() {
    let options: ParseOptions =
        serde_json::from_str(r#"{"ignoreDuplicates": true}"#).unwrap();
    assert!(options.ignore_duplicates);
    assert_eq!(options.file_base_names, ParseOptions::default().file_base_names);

    let options: ParseOptions =
        serde_json::from_str(r#"{"fileBaseNames": ["sandbox"]}"#).unwrap();
    assert!(!options.ignore_duplicates);
    assert_eq!(options.file_base_names, ["sandbox"]);
}

#[test]
fn test_space_in_path() {
    let log = "(./My Thesis/chapter one.tex\nLaTeX Warning: W.\n)";
    let result = parse_latex_log(log, &ParseOptions::default());
    assert_eq!(result.files[0].path, "./My Thesis/chapter one.tex");
    assert_eq!(
        result.warnings[0].file.as_deref(),
        Some("./My Thesis/chapter one.tex")
    );
}

#[test]
fn test_page_marker_after_path() {
    let log = "(./dir/noext [1] (./dir/other.tex))\nLaTeX Warning: W.\n";
    let result = parse_latex_log(log, &ParseOptions::default());
    assert_eq!(result.files[0].path, "./dir/noext");
    assert_eq!(result.files[0].files[0].path, "./dir/other.tex");
    assert_eq!(result.warnings[0].file.as_deref(), Some("./dir/noext"));
}
