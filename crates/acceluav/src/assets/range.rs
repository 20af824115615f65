//! HTTP `Range` header handling for video streaming.
//!
//! Only single `bytes=` ranges are understood. Anything else is ignored and
//! the whole file is sent.

use std::sync::OnceLock;

use regex::Regex;

fn range_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^bytes=(\d*)-(\d*)$").expect("range pattern is a valid regex")
    })
}

/// An inclusive byte span within a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// First byte offset.
    pub start: u64,
    /// Last byte offset, inclusive.
    pub end: u64,
}

impl ByteRange {
    /// Number of bytes covered.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Always `false`; a byte range covers at least one byte.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// `Content-Range` value for a file of `size` bytes.
    #[must_use]
    pub fn content_range(&self, size: u64) -> String {
        format!("bytes {}-{}/{size}", self.start, self.end)
    }
}

/// How a request's `Range` header applies to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeRequest {
    /// No usable range; send the whole file.
    Full,
    /// Send the given slice with 206.
    Partial(ByteRange),
    /// The range lies outside the file; answer 416.
    Unsatisfiable,
}

impl RangeRequest {
    /// Interpret `header` against a file of `size` bytes.
    ///
    /// `bytes=start-` runs to the end of the file, `bytes=-n` is the last `n`
    /// bytes, and an end past the file is clamped to the last byte.
    #[must_use]
    pub fn parse(header: Option<&str>, size: u64) -> Self {
        let Some(caps) = header.and_then(|h| range_pattern().captures(h.trim())) else {
            return Self::Full;
        };
        let start = &caps[1];
        let end = &caps[2];

        let parse = |digits: &str| digits.parse::<u64>().ok();

        let (start, end) = match (start.is_empty(), end.is_empty()) {
            (true, true) => return Self::Full,
            (true, false) => {
                let Some(suffix) = parse(end) else {
                    return Self::Full;
                };
                if suffix == 0 || size == 0 {
                    return Self::Unsatisfiable;
                }
                (size.saturating_sub(suffix), size - 1)
            }
            (false, open_end) => {
                let Some(start) = parse(start) else {
                    return Self::Full;
                };
                let end = if open_end {
                    size.saturating_sub(1)
                } else {
                    match parse(end) {
                        Some(end) => end.min(size.saturating_sub(1)),
                        None => return Self::Full,
                    }
                };
                (start, end)
            }
        };

        if start >= size || end < start {
            Self::Unsatisfiable
        } else {
            Self::Partial(ByteRange { start, end })
        }
    }
}
