use sheet_filter::{
    sheet::Sheet,
    table::{render_sheet, render_table},
};

#[test]
fn columns_are_padded_to_widest_cell() {
    let headers = vec!["优先级".to_string(), "count".to_string()];
    let rows = vec![
        vec!["高".to_string(), "3".to_string()],
        vec!["中".to_string(), "12".to_string()],
    ];

    let rendered = render_table(&headers, &rows);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(
        lines,
        vec!["优先级  count", "------  -----", "高      3", "中      12"]
    );
}

#[test]
fn multi_line_descriptions_render_on_one_line() {
    let headers = vec!["描述".to_string()];
    let rows = vec![vec!["无法登录\n请检查\t日志".to_string()]];

    let rendered = render_table(&headers, &rows);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[2], "无法登录 请检查 日志");
}

#[test]
fn narrow_columns_keep_a_three_dash_rule() {
    let headers = vec!["id".to_string(), "状态".to_string()];
    let rows = vec![vec!["1".to_string(), "定位分发".to_string()]];

    let rendered = render_table(&headers, &rows);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines, vec!["id  状态", "---  --------", "1   定位分发"]);
}

#[test]
fn render_table_counts_cjk_as_double_width() {
    let headers = vec!["问题ID".to_string(), "x".to_string()];
    let rows = vec![vec!["DTS-1".to_string(), "y".to_string()]];

    let rendered = render_table(&headers, &rows);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines, vec!["问题ID  x", "------  ---", "DTS-1   y"]);
}

#[test]
fn render_sheet_limits_preview_rows() {
    let sheet = Sheet::new(
        "DTS",
        vec!["id".to_string()],
        (1..=7).map(|i| vec![i.to_string()]).collect(),
    );

    assert_eq!(render_sheet(&sheet, 5).lines().count(), 7);
    assert_eq!(render_sheet(&sheet, 0).lines().count(), 9);
}
