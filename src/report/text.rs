use crate::types::report::{CaseReport, Evaluation};

pub fn to_text(evaluation: &Evaluation) -> String {
    format!(
        "{}\nscore: {:.1}/10 ({})\ntrustworthiness: {}",
        evaluation.package,
        evaluation.score * 10.0,
        evaluation.score,
        evaluation.trustworthiness
    )
}

pub fn cases_to_text(cases: &[CaseReport]) -> String {
    let mut output = cases
        .iter()
        .map(|case| {
            format!(
                "{}: {} score {:.1}/10",
                case.name,
                case.evaluation.package,
                case.evaluation.score * 10.0
            )
        })
        .collect::<Vec<_>>();
    output.push(format!("All {} test cases passed", cases.len()));
    output.join("\n")
}
