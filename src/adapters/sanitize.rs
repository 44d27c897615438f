//! Log sanitization for secrets returned by the record service.
//!
//! Registration returns a participant's private key in the clear. The key is
//! displayed on screen but must never reach a log sink. This module redacts:
//! - `privateKey` / `private_key` values (JSON or `key=value` form)
//! - Bearer tokens and JWTs
//! - PEM private key blocks
//! - Long hex runs that look like key material
//!
//! Structured redaction comes first (`Identity` never prints its key via
//! `Debug`); this writer is the fallback for anything formatted by hand.
//!
//! Input is capped per line (see `MEDIBLOCK_SANITIZE_MAX_BYTES`) so a huge
//! response body echoed into a log line stays cheap to scan.

use std::sync::OnceLock;

use regex::{Regex, RegexSet};
use tracing_subscriber::fmt::MakeWriter;

static SECRET_PATTERNS: OnceLock<SecretPatterns> = OnceLock::new();
static PEM_MARKERS: OnceLock<PemMarkers> = OnceLock::new();

const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

struct SecretPattern {
    regex: Regex,
    replacement: &'static str,
}

struct SecretPatterns {
    set: RegexSet,
    patterns: Vec<SecretPattern>,
}

struct PemMarkers {
    begin: Regex,
    end: Regex,
}

fn pem_markers() -> &'static PemMarkers {
    PEM_MARKERS.get_or_init(|| PemMarkers {
        begin: Regex::new(r"-----BEGIN [A-Z ]{0,40}PRIVATE KEY-----").expect("Valid regex"),
        end: Regex::new(r"-----END [A-Z ]{0,40}PRIVATE KEY-----").expect("Valid regex"),
    })
}

/// True if the last PEM private key block in `text` has no END marker yet.
fn has_open_pem_block(text: &str) -> bool {
    let markers = pem_markers();
    match markers.begin.find_iter(text).last() {
        Some(begin) => !markers.end.is_match(&text[begin.end()..]),
        None => false,
    }
}

fn max_sanitize_bytes() -> usize {
    std::env::var("MEDIBLOCK_SANITIZE_MAX_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }
    let mut end = max_bytes;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

fn patterns() -> &'static SecretPatterns {
    SECRET_PATTERNS.get_or_init(|| {
        // Order matters: the specific private-key rules run before the
        // generic hex rule so the label survives in the output.
        let rules: [(&'static str, &'static str); 6] = [
            (
                r#"(?i)("private_?key"\s*:\s*)"[^"]*""#,
                r#"$1"[REDACTED-PRIVATE-KEY]""#,
            ),
            (
                r"(?i)\b(private[_ -]?key\s*[:=]\s*)[^\s,;}]+",
                "${1}[REDACTED-PRIVATE-KEY]",
            ),
            (
                r"(?s)-----BEGIN [A-Z ]{0,40}PRIVATE KEY-----.*?-----END [A-Z ]{0,40}PRIVATE KEY-----",
                "[REDACTED-PEM-PRIVATE-KEY]",
            ),
            // A block cut off before its END marker.
            (
                r"(?s)-----BEGIN [A-Z ]{0,40}PRIVATE KEY-----.*",
                "[REDACTED-PEM-PRIVATE-KEY]",
            ),
            (
                r"\b(?:[Bb]earer\s+)?eyJ[a-zA-Z0-9_-]{10,}\.[a-zA-Z0-9_-]{10,}\.[a-zA-Z0-9_-]{10,}",
                "[REDACTED-TOKEN]",
            ),
            (r"\b[0-9a-fA-F]{32,}\b", "[REDACTED-KEY]"),
        ];

        let set = RegexSet::new(rules.iter().map(|(p, _)| *p)).expect("Valid regex set");
        let patterns = rules
            .into_iter()
            .map(|(pattern, replacement)| SecretPattern {
                regex: Regex::new(pattern).expect("Valid regex"),
                replacement,
            })
            .collect();

        SecretPatterns { set, patterns }
    })
}

/// Redact secrets from a string.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_sanitize_bytes())
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let compiled = patterns();
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let mut result = prefix.to_string();
    for idx in compiled.set.matches(prefix).into_iter() {
        let pattern = &compiled.patterns[idx];
        result = pattern
            .regex
            .replace_all(&result, pattern.replacement)
            .into_owned();
    }

    if truncated {
        result.push_str(" [TRUNCATED]");
        if input.ends_with('\n') {
            result.push('\n');
        }
    }
    result
}

/// A `tracing_subscriber` writer wrapper that sanitizes each formatted log
/// line before it reaches the underlying sink.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

pub struct SanitizingWriter<W: std::io::Write> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W: std::io::Write> SanitizingWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
        }
    }

    /// Write out every complete line. Lines inside a PEM private key block
    /// are held back until the END marker arrives, so the block is redacted
    /// as a whole.
    fn flush_lines(&mut self) -> std::io::Result<()> {
        let mut scanned = 0;
        while let Some(offset) = self.buffer[scanned..].iter().position(|&b| b == b'\n') {
            let end = scanned + offset + 1;
            if has_open_pem_block(&String::from_utf8_lossy(&self.buffer[..end])) {
                scanned = end;
                continue;
            }
            let chunk: Vec<u8> = self.buffer.drain(..end).collect();
            let sanitized = sanitize(&String::from_utf8_lossy(&chunk));
            self.inner.write_all(sanitized.as_bytes())?;
            scanned = 0;
        }
        Ok(())
    }
}

impl<W: std::io::Write> std::io::Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        // A line with no newline in sight: flush what we have, capped.
        let hard_cap = max_sanitize_bytes().saturating_mul(2);
        if self.buffer.len() > hard_cap {
            let sanitized = sanitize(&String::from_utf8_lossy(&self.buffer));
            self.inner.write_all(sanitized.as_bytes())?;
            if !sanitized.ends_with('\n') {
                self.inner.write_all(b"\n")?;
            }
            self.buffer.clear();
            return Ok(buf.len());
        }

        self.flush_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;
        if !self.buffer.is_empty() {
            let sanitized = sanitize(&String::from_utf8_lossy(&self.buffer));
            self.inner.write_all(sanitized.as_bytes())?;
            self.buffer.clear();
        }
        self.inner.flush()
    }
}

impl<W: std::io::Write> Drop for SanitizingWriter<W> {
    fn drop(&mut self) {
        let _ = std::io::Write::flush(self);
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter::new(self.inner.make_writer())
    }
}
