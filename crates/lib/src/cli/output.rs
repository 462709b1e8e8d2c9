use core::fmt;
use std::io::{self, Write};

use serde::Serialize;

use crate::cli::{Answer, Report};

pub(crate) struct Output<O> {
    out: O,
    kind: OutputKind,
}

pub(crate) enum OutputKind {
    Json,
    Normal,
}

impl<O> Output<O>
where
    O: Write,
{
    pub(crate) fn new(out: O, kind: OutputKind) -> Self {
        Self { out, kind }
    }

    pub(crate) fn info(&mut self, m: impl fmt::Display) -> io::Result<()> {
        self.message(MessageKind::Info, m)
    }

    pub(crate) fn error(&mut self, m: impl fmt::Display) -> io::Result<()> {
        self.message(MessageKind::Error, m)
    }

    /// Write every part of an answer, one per line.
    pub(crate) fn answer(&mut self, answer: &dyn Answer) -> io::Result<()> {
        let mut part = 0usize;
        let mut result = Ok(());

        answer.parts(&mut |value| {
            if result.is_err() {
                return;
            }

            part += 1;

            result = match &self.kind {
                OutputKind::Json => {
                    let data = Part {
                        part,
                        value: DisplayString(value),
                    };

                    self.json(&Line {
                        ty: LineType::Answer,
                        data,
                    })
                }
                OutputKind::Normal => writeln!(self.out, "{value}"),
            };
        });

        result
    }

    pub(crate) fn report(&mut self, report: &Report) -> io::Result<()> {
        match &self.kind {
            OutputKind::Json => self.json(&Line {
                ty: LineType::Report,
                data: report,
            }),
            OutputKind::Normal => writeln!(self.out, "{report}"),
        }
    }

    fn message(&mut self, kind: MessageKind, m: impl fmt::Display) -> io::Result<()> {
        match &self.kind {
            OutputKind::Json => self.json(&Line {
                ty: LineType::Message,
                data: Message {
                    kind,
                    output: DisplayString(m),
                },
            }),
            OutputKind::Normal => writeln!(self.out, "{kind}: {m}"),
        }
    }

    /// Write a single JSON line.
    fn json<T>(&mut self, line: &Line<T>) -> io::Result<()>
    where
        T: Serialize,
    {
        serde_json::to_writer(&mut self.out, line)?;
        self.out.write_all(b"\n")
    }
}

#[derive(Serialize)]
struct Line<T> {
    #[serde(rename = "type")]
    ty: LineType,
    data: T,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
enum LineType {
    Message,
    Answer,
    Report,
}

#[derive(Serialize)]
struct Part<T> {
    part: usize,
    value: T,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
enum MessageKind {
    Info,
    Error,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::Info => write!(f, "info"),
            MessageKind::Error => write!(f, "error"),
        }
    }
}

#[derive(Serialize)]
#[serde(bound = "T: fmt::Display")]
struct Message<T> {
    kind: MessageKind,
    output: DisplayString<T>,
}

struct DisplayString<T>(T);

impl<T> Serialize for DisplayString<T>
where
    T: fmt::Display,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{Output, OutputKind};

    fn answer(kind: OutputKind) -> String {
        let mut out = Vec::new();
        Output::new(&mut out, kind).answer(&(8u32, 2286u64)).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_answer_normal() {
        assert_eq!(answer(OutputKind::Normal), "8\n2286\n");
    }

    #[test]
    fn test_answer_json() {
        assert_eq!(
            answer(OutputKind::Json),
            concat!(
                r#"{"type":"answer","data":{"part":1,"value":"8"}}"#,
                "\n",
                r#"{"type":"answer","data":{"part":2,"value":"2286"}}"#,
                "\n",
            )
        );
    }
}
