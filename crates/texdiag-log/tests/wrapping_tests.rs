use texdiag_log::text::{LOG_WRAP_LIMIT, LogText, normalize};
use texdiag_log::{ParseOptions, parse_latex_log};

fn full_width(prefix: &str) -> String {
    let mut line = prefix.to_string();
    while line.chars().count() < LOG_WRAP_LIMIT {
        line.push('x');
    }
    line
}

#[test]
fn test_wrapped_filename() {
    // TeX wraps at 79 characters, splitting a path over two lines.
    let first = full_width("(./some/very/long/path/to/a/file/that/gets/wrapp");
    let input = format!("{first}\ned/here.tex\n)");

    let result = parse_latex_log(&input, &ParseOptions::default());
    assert_eq!(result.files.len(), 1);
    assert_eq!(result.files[0].path, format!("{}ed/here.tex", &first[1..]));
}

#[test]
fn test_short_line_is_not_joined() {
    let input = "(./some/dir/\ned/here.tex\n)";
    let result = parse_latex_log(input, &ParseOptions::default());
    assert_eq!(result.files[0].path, "./some/dir/");
}

#[test]
fn test_join_conditions() {
    let full = full_width("abc");
    assert_eq!(LogText::new(&format!("{full}\ndef")).lines().len(), 1);
    assert_eq!(LogText::new(&format!("{full}\n!def")).lines().len(), 2);

    let ellipsis = format!("{}...", &full[..LOG_WRAP_LIMIT - 3]);
    assert_eq!(ellipsis.len(), LOG_WRAP_LIMIT);
    assert_eq!(LogText::new(&format!("{ellipsis}\ndef")).lines().len(), 2);

    let short = &full[..LOG_WRAP_LIMIT - 1];
    assert_eq!(LogText::new(&format!("{short}\ndef")).lines().len(), 2);
}

#[test]
fn test_normalize_twice() {
    let input = format!(
        "{}\r\ncontinued\r{}\n! stop\n\n{}\n\nend",
        full_width("a"),
        full_width("b"),
        full_width("c")
    );
    let once = normalize(&input);
    assert_eq!(normalize(&once), once);
    assert!(!once.contains('\r'));
}
