//! Builds the LaTeX source of a memorandum, one line at a time.

use tracing::debug;

use super::RenderOptions;
use crate::model::{Document, Header, MemoType, Node, RecipientBlock};

pub struct LatexRenderer<'a> {
    options: &'a RenderOptions,
    lines: Vec<String>,
}

impl<'a> LatexRenderer<'a> {
    pub fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            lines: Vec::new(),
        }
    }

    pub fn render(mut self, doc: &Document) -> String {
        self.push(format!("\\documentclass{{{}}}", self.options.document_class));
        self.write_preamble(&doc.header);
        self.push("\\begin{document}");
        self.push("\\begin{enumerate}");
        self.write_nodes(&doc.body);
        self.push("\\end{enumerate}");
        self.push("\\end{document}");
        debug!(lines = self.lines.len(), "rendered memo");

        let mut output = self.lines.join("\n");
        output.push('\n');
        output
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn command(&mut self, name: &str, value: &str) {
        self.push(format!("\\{name}{{{value}}}"));
    }

    fn optional(&mut self, name: &str, value: Option<&String>) {
        if let Some(value) = value {
            self.command(name, value);
        }
    }

    fn write_preamble(&mut self, header: &Header) {
        self.command("address", &header.unit_name);
        self.optional("address", header.unit_street_address.as_ref());
        self.optional("address", header.unit_city_state_zip.as_ref());
        self.push(format!(
            "\\author{{{}}}\\rank{{{}}}\\branch{{{}}}",
            header.author_name, header.author_rank, header.author_branch
        ));
        self.optional("officesymbol", header.office_symbol.as_ref());
        self.command("signaturedate", &header.date);
        self.command("subject", &header.subject);

        let memo_type = header.effective_memo_type();
        let thru = match (memo_type, &header.thru_recipients) {
            (MemoType::Thru, Some(block)) => {
                self.write_thru(block);
                true
            }
            _ => false,
        };
        match (memo_type, &header.for_recipients) {
            (MemoType::ForRecord, _) | (_, None) => {
                self.command("memoline", MemoType::ForRecord.as_str())
            }
            (_, Some(block)) => self.write_for(block, thru),
        }

        for enclosure in &header.enclosures {
            self.command("addencl", enclosure);
        }
        for distro in &header.distros {
            self.command("adddistro", distro);
        }
        for cf in &header.cfs {
            self.command("addcf", cf);
        }
        self.optional("authority", header.authority.as_ref());
        self.optional("title", header.author_title.as_ref());
        self.optional("suspensedate", header.suspense_date.as_ref());
    }

    fn write_thru(&mut self, block: &RecipientBlock) {
        if block.is_single() {
            for recipient in block.recipients() {
                let line = format!("{} {}", MemoType::Thru.as_str(), recipient.address_line());
                self.command("addmemoline", &line);
            }
        } else {
            for recipient in block.recipients() {
                self.command("multimemothru", &recipient.address_line());
            }
        }
    }

    fn write_for(&mut self, block: &RecipientBlock, after_thru: bool) {
        if block.is_single() {
            let prefix = if after_thru {
                "FOR"
            } else {
                MemoType::For.as_str()
            };
            for recipient in block.recipients() {
                let line = format!("{prefix} {}", recipient.address_line());
                self.command("memoline", &line);
            }
        } else {
            for recipient in block.recipients() {
                self.command("multimemofor", &recipient.address_line());
            }
        }
    }

    fn write_nodes(&mut self, nodes: &[Node]) {
        for node in nodes {
            match node {
                Node::Item(text) => self.push(format!("\\item {text}")),
                Node::Group(children) => {
                    self.push("\\begin{enumerate}");
                    self.write_nodes(children);
                    self.push("\\end{enumerate}");
                }
                Node::Table(table) => {
                    self.push("");
                    self.push("\\begin{center}");
                    self.push(table.rendered.as_str());
                    self.push("\\end{center}");
                }
            }
        }
    }
}
