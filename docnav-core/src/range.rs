//! Line range arguments (`START-END`)

use std::str::FromStr;

use crate::error::Error;

/// An inclusive, 1-indexed line range as written by a user
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Get the range as (start, end) inclusive
    pub fn bounds(&self) -> (usize, usize) {
        (self.start, self.end)
    }
}

impl FromStr for LineRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = |reason: &str| Error::MalformedRange {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let (start, end) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| malformed("use format START-END (e.g., 119-164)"))?;

        let start: usize = start
            .trim()
            .parse()
            .map_err(|_| malformed("start is not a line number"))?;
        let end: usize = end
            .trim()
            .parse()
            .map_err(|_| malformed("end is not a line number"))?;

        if end < start {
            return Err(malformed("end is before start"));
        }

        Ok(Self { start, end })
    }
}
