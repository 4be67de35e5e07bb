use std::fmt;

/// One entry of an array selector list: a single index or a `start:end:step` range.
///
/// Negative indices and bounds count from the end of the array.
///
/// # Examples
/// ```text
/// [2]        Index(2)
/// [-1]       Index(-1)
/// [1:3]      Range { start: Some(1), end: Some(3), step: None }
/// [::2]      Range { start: None, end: None, step: Some(2) }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slice {
    Index(i64),
    Range {
        start: Option<i64>,
        end: Option<i64>,
        step: Option<i64>,
    },
}

impl Slice {
    pub fn index(index: i64) -> Self {
        Slice::Index(index)
    }

    pub fn range(start: Option<i64>, end: Option<i64>) -> Self {
        Slice::Range {
            start,
            end,
            step: None,
        }
    }

    pub fn stepped(start: Option<i64>, end: Option<i64>, step: i64) -> Self {
        Slice::Range {
            start,
            end,
            step: Some(step),
        }
    }

    /// Positions selected in an array of `len` elements, in selection order.
    pub fn resolve(&self, len: usize) -> Vec<usize> {
        let len = len as i64;
        match *self {
            Slice::Index(index) => {
                let index = if index < 0 { index + len } else { index };
                if (0..len).contains(&index) {
                    vec![index as usize]
                } else {
                    vec![]
                }
            }
            Slice::Range { start, end, step } => {
                let step = step.unwrap_or(1);
                if step > 0 {
                    let start = normalize(start.unwrap_or(0), len).max(0);
                    let end = normalize(end.unwrap_or(len), len).min(len);
                    if end <= start {
                        return vec![];
                    }
                    (start..end).step_by(step as usize).map(|i| i as usize).collect()
                } else if step < 0 {
                    let start = start
                        .map(|s| normalize(s, len))
                        .unwrap_or(len - 1)
                        .min(len - 1);
                    let end = end.map(|e| normalize(e, len)).unwrap_or(-1).max(-1);
                    let mut positions = vec![];
                    let mut i = start;
                    while i > end {
                        positions.push(i as usize);
                        i += step;
                    }
                    positions
                } else {
                    vec![]
                }
            }
        }
    }
}

fn normalize(bound: i64, len: i64) -> i64 {
    if bound < 0 { bound + len } else { bound }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slice::Index(index) => write!(f, "{}", index),
            Slice::Range { start, end, step } => {
                if let Some(start) = start {
                    write!(f, "{}", start)?;
                }
                f.write_str(":")?;
                if let Some(end) = end {
                    write!(f, "{}", end)?;
                }
                if let Some(step) = step {
                    write!(f, ":{}", step)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_from_end() {
        assert_eq!(Slice::index(-1).resolve(5), vec![4]);
        assert_eq!(Slice::index(-6).resolve(5), Vec::<usize>::new());
        assert_eq!(Slice::index(5).resolve(5), Vec::<usize>::new());
    }

    #[test]
    fn test_range_defaults_and_clamping() {
        assert_eq!(Slice::range(Some(-1), None).resolve(5), vec![4]);
        assert_eq!(Slice::range(None, Some(2)).resolve(5), vec![0, 1]);
        assert_eq!(Slice::range(Some(5), Some(7)).resolve(5), Vec::<usize>::new());
        assert_eq!(Slice::range(Some(-10), Some(10)).resolve(3), vec![0, 1, 2]);
        assert_eq!(Slice::range(Some(3), Some(1)).resolve(5), Vec::<usize>::new());
    }

    #[test]
    fn test_stepped_ranges() {
        assert_eq!(Slice::stepped(None, None, 2).resolve(5), vec![0, 2, 4]);
        assert_eq!(Slice::stepped(None, None, -1).resolve(3), vec![2, 1, 0]);
        assert_eq!(Slice::stepped(Some(1), None, 0).resolve(3), Vec::<usize>::new());
    }

    #[test]
    fn test_display() {
        assert_eq!(Slice::index(-1).to_string(), "-1");
        assert_eq!(Slice::range(Some(1), None).to_string(), "1:");
        assert_eq!(Slice::stepped(None, None, 2).to_string(), "::2");
    }
}
