use crate::types::report::{CaseReport, Evaluation};

pub fn to_markdown(evaluation: &Evaluation) -> String {
    let mut output = String::new();
    output.push_str("# Aggregated Dependency Score\n\n");
    output.push_str(&format!("Package: `{}`\n\n", evaluation.package));
    output.push_str(&format!(
        "- score: {:.3} ({:.1}/10)\n- aggregated trustworthiness: {:.6}\n- evaluated at: {}\n",
        evaluation.score,
        evaluation.score * 10.0,
        evaluation.trustworthiness,
        evaluation.evaluated_at.to_rfc3339()
    ));
    output
}

/// Escapes `|` so a value stays inside its table cell.
fn table_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

pub fn cases_to_markdown(cases: &[CaseReport]) -> String {
    let mut output = String::new();
    output.push_str("# Aggregated Dependency Scores\n\n");
    if cases.is_empty() {
        output.push_str("- none\n");
        return output;
    }

    output.push_str("| case | package | score | trustworthiness |\n");
    output.push_str("|------|---------|-------|-----------------|\n");
    for case in cases {
        output.push_str(&format!(
            "| {} | `{}` | {:.3} | {:.6} |\n",
            table_cell(&case.name),
            table_cell(&case.evaluation.package.to_string()),
            case.evaluation.score,
            case.evaluation.trustworthiness
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::Package;

    #[test]
    fn markdown_report_contains_sections() {
        let evaluation = Evaluation::new(Package::new("pypi", "requests", "2.28.1"), 1.0);

        let rendered = to_markdown(&evaluation);
        assert!(rendered.contains("# Aggregated Dependency Score"));
        assert!(rendered.contains("`pkg:pypi/requests@2.28.1`"));
        assert!(rendered.contains("score: 1.000 (10.0/10)"));
    }

    #[test]
    fn markdown_cases_render_a_table_row_per_case() {
        let cases = vec![
            CaseReport {
                name: "a".to_string(),
                evaluation: Evaluation::new(Package::new("npm", "a", "1"), 0.95),
            },
            CaseReport {
                name: "b".to_string(),
                evaluation: Evaluation::new(Package::new("npm", "b", "1"), 0.5),
            },
        ];
        let rendered = cases_to_markdown(&cases);
        assert_eq!(rendered.matches("| `pkg:npm/").count(), 2);
        assert!(cases_to_markdown(&[]).contains("- none"));
    }

    #[test]
    fn markdown_cases_escape_pipes_in_case_names() {
        let cases = vec![CaseReport {
            name: "left|right".to_string(),
            evaluation: Evaluation::new(Package::new("npm", "a", "1"), 0.95),
        }];
        let rendered = cases_to_markdown(&cases);
        let row = rendered
            .lines()
            .find(|line| line.contains("left"))
            .expect("case row should render");

        assert!(row.starts_with("| left\\|right | "), "unexpected row: {row}");
        assert_eq!(row.replace("\\|", "").matches('|').count(), 5);
    }
}
