//! Block Kit layout for reports.
//!
//! Summaries render as a two-column `*Ticker*` / `*Share Delta*` table built
//! from section fields. Slack caps a field at 2000 characters, so long
//! tables continue in further sections.

use serde::Serialize;

use fundwatch_core::report::Report;

/// Slack's limit on the text of a single section field.
pub const FIELD_TEXT_LIMIT: usize = 2000;

/// Slack's limit on blocks in one message.
pub const MAX_BLOCKS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextObject {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

impl TextObject {
    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self {
            kind: "mrkdwn",
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Section {
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<TextObject>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        fields: Vec<TextObject>,
    },
    Context {
        elements: Vec<TextObject>,
    },
}

/// Lays `report` out as Block Kit blocks.
///
/// The body, cash and context blocks are always kept. When the table needs
/// more sections than fit under [`MAX_BLOCKS`], the tail is replaced by a
/// note counting the rows left out.
pub fn report_blocks(report: &Report) -> Vec<Block> {
    let mut trailing: Vec<Block> = [&report.body, &report.cash_line]
        .into_iter()
        .flatten()
        .map(|line| text_section(line.clone()))
        .collect();
    trailing.push(Block::Context {
        elements: vec![TextObject::mrkdwn(report.context.clone())],
    });

    let mut columns = column_chunks(report).into_iter();
    let mut first_fields = Vec::new();
    if let Some((tickers, changes)) = columns.next() {
        first_fields = vec![
            TextObject::mrkdwn("*Ticker*"),
            TextObject::mrkdwn("*Share Delta*"),
            TextObject::mrkdwn(tickers),
            TextObject::mrkdwn(changes),
        ];
    }
    let mut blocks = vec![Block::Section {
        text: Some(TextObject::mrkdwn(report.header.clone())),
        fields: first_fields,
    }];

    let rest: Vec<(String, String)> = columns.collect();
    let room = MAX_BLOCKS - blocks.len() - trailing.len();
    let kept = if rest.len() > room { room - 1 } else { rest.len() };

    let mut rest = rest.into_iter();
    for (tickers, changes) in rest.by_ref().take(kept) {
        blocks.push(Block::Section {
            text: None,
            fields: vec![TextObject::mrkdwn(tickers), TextObject::mrkdwn(changes)],
        });
    }
    let omitted: usize = rest.map(|(tickers, _)| tickers.lines().count()).sum();
    if omitted > 0 {
        blocks.push(text_section(format!("_{} more rows not shown_", omitted)));
    }

    blocks.extend(trailing);
    blocks
}

fn text_section(text: String) -> Block {
    Block::Section {
        text: Some(TextObject::mrkdwn(text)),
        fields: Vec::new(),
    }
}

/// Splits the rows into newline-joined (ticker, change) column pairs that
/// each fit in a field.
fn column_chunks(report: &Report) -> Vec<(String, String)> {
    let mut chunks = Vec::new();
    let mut tickers = String::new();
    let mut changes = String::new();

    for row in &report.rows {
        let fits = tickers.len() + row.ticker.len() < FIELD_TEXT_LIMIT
            && changes.len() + row.change.len() < FIELD_TEXT_LIMIT;
        if !fits && !tickers.is_empty() {
            chunks.push((
                std::mem::take(&mut tickers),
                std::mem::take(&mut changes),
            ));
        }
        tickers.push_str(&row.ticker);
        tickers.push('\n');
        changes.push_str(&row.change);
        changes.push('\n');
    }
    if !tickers.is_empty() {
        chunks.push((tickers, changes));
    }
    chunks
}
