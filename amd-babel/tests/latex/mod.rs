//! LaTeX rendering of complete memos

use crate::common::{memo_with_body, parse, parse_fixture};
use amd_babel::{render, RenderOptions};

#[test]
fn test_memo_for_record() {
    let doc = parse_fixture("basic_mfr.Amd");
    insta::assert_snapshot!(render(&doc, &RenderOptions::default()).trim_end(), @r"
    \documentclass{armymemo-notikz}
    \address{4th Engineer Battalion}
    \address{588 Wetzel Road}
    \address{Colorado Springs, CO 80904}
    \author{Joseph C. Schlessinger}\rank{1LT}\branch{EN}
    \officesymbol{ABC-DEF-GH}
    \signaturedate{13 June 2022}
    \subject{Army markdown}
    \memoline{MEMORANDUM FOR RECORD}
    \title{Maintenance Platoon Leader}
    \begin{document}
    \begin{enumerate}
    \item This memo is a demo.
    \item This item contains sub items.
    \begin{enumerate}
    \item Thing one.
    \item Thing two.
    \begin{enumerate}
    \item Here is a sub sub item.
    \end{enumerate}
    \end{enumerate}
    \item Point of contact is the undersigned at (719) 555-0100 or jcs@example.mil.
    \end{enumerate}
    \end{document}
    ");
}

#[test]
fn test_thru_and_for_blocks() {
    let latex = render(&parse_fixture("for_thru.Amd"), &RenderOptions::default());
    let expected = "\\addmemoline{MEMORANDUM THRU 4th Infantry Division, 6105 Wetzel Avenue, Fort Carson, CO 80913}\n\
                    \\memoline{FOR III Armored Corps, 761st Tank Battalion Avenue, Fort Cavazos, TX 76544}\n\
                    \\addencl{Threat summary}\n\
                    \\addencl{Collection plan}\n\
                    \\adddistro{S3}\n\
                    \\addcf{Division G2}\n\
                    \\title{Brigade S2}\n\
                    \\suspensedate{01 March 2024}\n";
    assert!(latex.contains(expected), "unexpected preamble:\n{latex}");
    assert!(latex.contains("\\subject{Request for \\textit{additional} collection assets}\n"));
    assert!(latex.contains("\\item Weather degrades \\uline{rotary wing} support.\n"));
    assert!(!latex.contains("FOR RECORD"));
}

#[test]
fn test_table_is_centered_between_items() {
    let latex = render(&parse_fixture("budget_table.Amd"), &RenderOptions::default());
    let table = latex.find("\\begin{center}\n\\begin{tabular}{|l|c|r|}").unwrap();
    let before = latex.find("\\item The company requests").unwrap();
    let after = latex.find("\\item Funds are available").unwrap();
    assert!(before < table && table < after);
    assert!(latex.contains("\\end{tabular}\n\\end{center}\n"));
}

#[test]
fn test_explicit_for_without_recipients_falls_back_to_record() {
    let source = memo_with_body("- a\n").replace(
        "SUBJECT=Test Subject",
        "MEMO_TYPE=MEMORANDUM FOR\nSUBJECT=Test Subject",
    );
    let latex = render(&parse(&source), &RenderOptions::default());
    assert!(latex.contains("\\memoline{MEMORANDUM FOR RECORD}\n"));
}

#[test]
fn test_document_class_is_configurable() {
    let options = RenderOptions {
        document_class: "armymemo".to_string(),
    };
    let latex = render(&parse(&memo_with_body("- a\n")), &options);
    assert!(latex.starts_with("\\documentclass{armymemo}\n"));
}
