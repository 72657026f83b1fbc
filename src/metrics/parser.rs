//! Log Parser - blank-line-delimited epoch blocks to a [`MetricsTable`]
//!
//! A training log is a sequence of blocks separated by blank lines. Each
//! block that mentions all four fields anywhere in its text becomes one
//! [`LogRecord`]:
//!
//! ```text
//! [epoch: 12] train_loss: 0.4123 lr: 0.00095
//! dice coefficient: 0.7831
//!
//! [epoch: 13] train_loss: 0.3987 lr: 0.0009
//! dice coefficient: 0.7902
//! ```
//!
//! Blocks missing any field, or holding a value too large for `f64`, are
//! skipped without error.

use std::borrow::Cow;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{LogRecord, MetricsTable};
use crate::{Error, Result};

static EPOCH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[epoch:\s*(\d+)\]").expect("epoch pattern is valid"));
static LOSS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"train_loss:\s*([0-9]*\.?[0-9]+)").expect("train_loss pattern is valid")
});
static LR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"lr:\s*([0-9]*\.?[0-9]+)").expect("lr pattern is valid"));
static DICE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"dice coefficient:\s*([0-9]*\.?[0-9]+)").expect("dice pattern is valid")
});

/// Hint appended to every zero-row parse error.
const EXPECTED_PATTERNS: &str =
    "Expected patterns like: [epoch: k], train_loss:, lr:, dice coefficient:";

/// Counters describing one parse pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Non-empty blocks seen
    pub blocks: usize,
    /// Blocks that carried all four fields
    pub accepted: usize,
    /// Blocks dropped for a missing or unreadable field
    pub skipped: usize,
    /// Accepted blocks that overrode an earlier block for the same epoch
    pub duplicates: usize,
}

/// Parse log text into a [`MetricsTable`].
///
/// # Errors
///
/// Returns [`Error::Parse`] if no block carries all four fields.
pub fn parse_log(text: &str) -> Result<MetricsTable> {
    parse_log_with_stats(text).map(|(table, _)| table)
}

/// Parse log bytes, dropping invalid UTF-8 sequences instead of failing.
///
/// # Errors
///
/// Returns [`Error::Parse`] if no block carries all four fields.
pub fn parse_log_bytes(bytes: &[u8]) -> Result<MetricsTable> {
    parse_log(&decode_dropping_invalid(bytes))
}

/// Read and parse a results file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, or [`Error::Parse`]
/// if it contains no complete epoch block.
pub fn parse_results_file<P: AsRef<Path>>(path: P) -> Result<MetricsTable> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let text = decode_dropping_invalid(&bytes);

    let (table, stats) = parse_text(&text).map_err(|stats| {
        Error::Parse(format!(
            "Parsed 0 rows from {} ({} blocks). {EXPECTED_PATTERNS}",
            path.display(),
            stats.blocks
        ))
    })?;

    tracing::info!(
        "Parsed {} epochs from {} ({} blocks skipped)",
        table.len(),
        path.display(),
        stats.skipped
    );
    Ok(table)
}

/// Parse log text and report what the parser kept and dropped.
///
/// # Errors
///
/// Returns [`Error::Parse`] if no block carries all four fields.
pub fn parse_log_with_stats(text: &str) -> Result<(MetricsTable, ParseStats)> {
    parse_text(text).map_err(|stats| {
        Error::Parse(format!(
            "Parsed 0 rows from log text ({} blocks). {EXPECTED_PATTERNS}",
            stats.blocks
        ))
    })
}

fn parse_text(text: &str) -> std::result::Result<(MetricsTable, ParseStats), ParseStats> {
    let mut table = MetricsTable::new();
    let mut stats = ParseStats::default();

    for block in split_blocks(text) {
        stats.blocks += 1;
        match parse_block(block) {
            Some(record) => {
                stats.accepted += 1;
                if table.insert(record).is_some() {
                    stats.duplicates += 1;
                }
            }
            None => {
                stats.skipped += 1;
                tracing::trace!("Skipping incomplete block #{}", stats.blocks);
            }
        }
    }

    tracing::debug!(
        "Parse stats: blocks={} accepted={} skipped={} duplicates={}",
        stats.blocks,
        stats.accepted,
        stats.skipped,
        stats.duplicates
    );

    if table.is_empty() {
        Err(stats)
    } else {
        Ok((table, stats))
    }
}

/// Decode UTF-8, leaving out invalid byte sequences entirely.
fn decode_dropping_invalid(bytes: &[u8]) -> Cow<'_, str> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(bytes.utf8_chunks().map(|chunk| chunk.valid()).collect())
}

/// Split on blank (empty or whitespace-only) lines, trim, drop empties.
fn split_blocks(text: &str) -> impl Iterator<Item = &str> {
    let mut blocks = Vec::new();
    let mut start = 0;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        if line.trim().is_empty() {
            blocks.push(&text[start..offset]);
            start = offset + line.len();
        }
        offset += line.len();
    }
    blocks.push(&text[start..]);

    blocks
        .into_iter()
        .map(str::trim)
        .filter(|block| !block.is_empty())
}

/// Extract one record from a block, or `None` if any field is missing.
fn parse_block(block: &str) -> Option<LogRecord> {
    let epoch = capture(&EPOCH_RE, block)?.parse::<u64>().ok()?;
    let train_loss = capture_value(&LOSS_RE, block)?;
    let lr = capture_value(&LR_RE, block)?;
    let dice = capture_value(&DICE_RE, block)?;

    Some(LogRecord::new(epoch, train_loss, lr, dice))
}

/// Digit runs past `f64::MAX` parse to infinity and count as missing.
fn capture_value(re: &Regex, block: &str) -> Option<f64> {
    capture(re, block)?
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn capture<'t>(re: &Regex, block: &'t str) -> Option<&'t str> {
    re.captures(block)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_blocks_blank_lines() {
        let text = "a\nb\n\n\nc\n  \t\nd\n";
        let blocks: Vec<&str> = split_blocks(text).collect();
        assert_eq!(blocks, vec!["a\nb", "c", "d"]);
    }

    #[test]
    fn test_split_blocks_crlf() {
        let text = "a\r\n\r\nb\r\n";
        let blocks: Vec<&str> = split_blocks(text).collect();
        assert_eq!(blocks, vec!["a", "b"]);
    }

    #[test]
    fn test_split_blocks_empty() {
        assert_eq!(split_blocks("").count(), 0);
        assert_eq!(split_blocks("\n\n   \n").count(), 0);
    }

    #[test]
    fn test_parse_block_any_order() {
        let block = "dice coefficient: 0.75\nlr: .001 train_loss: 1.5 [epoch: 7]";
        let record = parse_block(block).unwrap();
        assert_eq!(record, LogRecord::new(7, 1.5, 0.001, 0.75));
    }

    #[test]
    fn test_parse_block_allows_space_after_colon() {
        let record = parse_block("[epoch:   4] train_loss:0.2 lr:   0.01 dice coefficient:1").unwrap();
        assert_eq!(record, LogRecord::new(4, 0.2, 0.01, 1.0));
    }

    #[test]
    fn test_parse_block_missing_field() {
        assert!(parse_block("[epoch: 1] train_loss: 0.5 lr: 0.01").is_none());
        assert!(parse_block("train_loss: 0.5 lr: 0.01 dice coefficient: 0.2").is_none());
        assert!(parse_block("epoch 1 no fields").is_none());
    }

    #[test]
    fn test_parse_block_epoch_overflow_is_skipped() {
        let block = "[epoch: 99999999999999999999999] train_loss: 0.5 lr: 0.01 dice coefficient: 0.2";
        assert!(parse_block(block).is_none());
    }

    #[test]
    fn test_signed_and_exponent_values_not_matched() {
        // No sign: a negative value leaves the field unmatched.
        let record = parse_block("[epoch: 1] train_loss: -0.5 lr: 0.01 dice coefficient: 0.2");
        assert!(record.is_none());

        // No exponent: only the mantissa is captured.
        let record =
            parse_block("[epoch: 1] train_loss: 0.5 lr: 1e-4 dice coefficient: 0.2").unwrap();
        assert!((record.lr() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stats_counts() {
        let text = "[epoch: 1] train_loss: 0.5 lr: 0.01 dice coefficient: 0.2\n\n\
                    garbage\n\n\
                    [epoch: 1] train_loss: 0.4 lr: 0.01 dice coefficient: 0.3\n";
        let (table, stats) = parse_log_with_stats(text).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(
            stats,
            ParseStats {
                blocks: 3,
                accepted: 2,
                skipped: 1,
                duplicates: 1,
            }
        );
    }

    #[test]
    fn test_parse_log_bytes_invalid_utf8() {
        let mut bytes = b"[epoch: 2] train_loss: 0.3 lr: 0.009 ".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        bytes.extend_from_slice(b" dice coefficient: 0.4");
        let table = parse_log_bytes(&bytes).unwrap();
        assert_eq!(table.records(), &[LogRecord::new(2, 0.3, 0.009, 0.4)]);
    }

    #[test]
    fn test_invalid_bytes_are_dropped_not_replaced() {
        let bytes = b"[epoch: 5] train_loss: 0.3 lr:\xff0.01 dice coefficient: 0\xfe.4";
        let table = parse_log_bytes(bytes).unwrap();
        assert_eq!(table.records(), &[LogRecord::new(5, 0.3, 0.01, 0.4)]);
    }

    #[test]
    fn test_decode_keeps_valid_text_borrowed() {
        assert!(matches!(decode_dropping_invalid(b"lr: 0.1"), Cow::Borrowed("lr: 0.1")));
        assert_eq!(decode_dropping_invalid(b"a\xc3b\xffc"), "abc");
    }

    #[test]
    fn test_overflowing_value_skips_block() {
        let huge = "9".repeat(400);
        let text = format!(
            "[epoch: 1] train_loss: {huge} lr: 0.01 dice coefficient: 0.2\n\n\
             [epoch: 2] train_loss: 0.3 lr: 0.009 dice coefficient: 0.4\n"
        );
        let (table, stats) = parse_log_with_stats(&text).unwrap();
        assert_eq!(table.records(), &[LogRecord::new(2, 0.3, 0.009, 0.4)]);
        assert_eq!(stats.skipped, 1);
        assert!(table.records().iter().all(LogRecord::is_finite));
    }
}
