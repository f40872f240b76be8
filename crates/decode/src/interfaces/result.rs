use colored::Colorize;
use serde_json::json;

use crate::{error::Error, sequence::SequenceDecode, utils::Dex2Call, SequenceError};

#[derive(Debug, Clone)]
/// Result of a decode operation
///
/// Holds the decoded call and, for `exeSequence`, the decoded operation sequence. A malformed
/// sequence does not fail the decode: its partial trace and error are kept here.
pub struct DecodeResult {
    /// The decoded contract call
    pub call: Dex2Call,
    /// One-line description of the call
    pub summary: String,
    /// The decoded operation sequence, for `exeSequence` calls
    pub sequence: Option<SequenceDecode>,
}

impl DecodeResult {
    /// The error that stopped sequence decoding, if any.
    pub fn error(&self) -> Option<&SequenceError> {
        self.sequence.as_ref().and_then(|sequence| sequence.error.as_ref())
    }

    /// The plain text rendering: the call name, the summary, then the sequence trace.
    pub fn text(&self) -> String {
        let mut text = format!("{}\n{}\n", self.call.name(), self.summary);
        if let Some(sequence) = &self.sequence {
            text.push_str(&sequence.text());
        }
        text
    }

    /// Displays the decoded call and sequence trace
    pub fn display(&self) {
        println!("{}", self.call.name().bold());
        println!("{}", self.summary);
        if let Some(sequence) = &self.sequence {
            sequence.trace.display();
        }
    }

    /// Converts the decode result to JSON
    pub fn to_json(&self) -> Result<String, Error> {
        let mut result = json!({
            "method": self.call.name(),
            "summary": self.summary,
            "call": self.call,
        });

        if let Some(sequence) = &self.sequence {
            result["sequence"] = json!({
                "header": sequence.header,
                "operations": sequence.operations,
                "trace": sequence.text(),
                "error": sequence.error.as_ref().map(|e| e.to_string()),
            });
        }

        Ok(serde_json::to_string_pretty(&result)?)
    }
}
