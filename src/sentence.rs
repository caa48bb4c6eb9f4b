//! Sentence tokenizer
use crate::{error::ParsingError, talker::Talker};

/// Returns true if this line is a comment and should be dropped
pub fn is_comment(line: &str) -> bool {
    line.starts_with('*')
}

/// [Sentence] is one tokenized line: its tag, its raw fields and
/// its possible checksum. Fields are kept as is, empty strings included:
/// they are interpreted by the decoders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    tag: String,
    fields: Vec<String>,
    checksum: Option<String>,
    computed_checksum: u8,
}

impl Sentence {
    /// Returns complete tag, like "GPGGA"
    pub fn tag(&self) -> &str {
        &self.tag
    }
    /// Returns sentence identifier, like "GGA"
    pub fn sentence_id(&self) -> &str {
        let len = self.tag.len();
        self.tag.get(len.saturating_sub(3)..).unwrap_or(&self.tag)
    }
    /// Returns [Talker] that emitted this sentence.
    /// Proprietary sentences (`$P...`) are reported as is.
    pub fn talker(&self) -> Talker {
        if self.tag.starts_with('P') || self.tag.len() < 5 {
            return Talker::Other(self.tag.clone());
        }
        match self.tag.get(..self.tag.len() - 3) {
            Some(prefix) => Talker::from(prefix),
            None => Talker::Other(self.tag.clone()),
        }
    }
    /// Returns raw fields, tag excluded
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
    /// Returns checksum suffix, as found
    pub fn checksum(&self) -> Option<&str> {
        self.checksum.as_deref()
    }
    /// Returns checksum computed over this sentence
    pub fn computed_checksum(&self) -> u8 {
        self.computed_checksum
    }
    /// Verifies the checksum suffix, when present.
    /// Returns None when this sentence has no checksum.
    pub fn checksum_ok(&self) -> Option<bool> {
        let checksum = self.checksum.as_deref()?;
        match u8::from_str_radix(checksum.trim(), 16) {
            Ok(value) => Some(value == self.computed_checksum),
            Err(_) => Some(false),
        }
    }
    /// Verifies checksum suffix, returning [ParsingError::ChecksumMismatch]
    /// on mismatch. Sentences without checksum are accepted.
    pub fn verify_checksum(&self) -> Result<(), ParsingError> {
        match self.checksum_ok() {
            Some(false) => Err(ParsingError::ChecksumMismatch {
                computed: self.computed_checksum,
                found: self.checksum.clone().unwrap_or_default(),
            }),
            _ => Ok(()),
        }
    }
}

impl std::str::FromStr for Sentence {
    type Err = ParsingError;
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_end_matches(|c| c == '\r' || c == '\n');

        let (body, checksum) = match line.split_once('*') {
            Some((body, checksum)) => (body, Some(checksum.to_string())),
            None => (line, None),
        };

        if body.is_empty() || !body.contains(',') {
            return Err(ParsingError::MalformedLine);
        }

        let body = body
            .strip_prefix('$')
            .or_else(|| body.strip_prefix('!'))
            .unwrap_or(body);

        let computed_checksum = body.bytes().fold(0_u8, |acc, b| acc ^ b);

        let mut items = body.split(',');
        let tag = items.next().ok_or(ParsingError::MalformedLine)?;
        if tag.is_empty() {
            return Err(ParsingError::MalformedLine);
        }

        Ok(Self {
            tag: tag.to_string(),
            fields: items.map(|s| s.to_string()).collect(),
            checksum,
            computed_checksum,
        })
    }
}
