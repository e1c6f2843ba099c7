//! Gap filling along the year axis.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// What to do with missing values before the first or after the last known year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EdgeFill {
    /// Carry the nearest known value outward
    #[default]
    Hold,
    /// Leave edge gaps missing
    Missing,
}

impl FromStr for EdgeFill {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hold" => Ok(Self::Hold),
            "missing" | "none" => Ok(Self::Missing),
            other => Err(Error::config(
                format!("unknown edge fill '{other}'"),
                "Use 'hold' or 'missing'",
            )),
        }
    }
}

impl fmt::Display for EdgeFill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hold => write!(f, "hold"),
            Self::Missing => write!(f, "missing"),
        }
    }
}

/// Fill gaps in evenly spaced values by linear interpolation.
///
/// Interior gaps are interpolated between the nearest known neighbors.
/// Edge gaps follow `edge`. A series with no known value is left untouched.
pub fn interpolate(values: &mut [Option<f64>], edge: EdgeFill) {
    let known: Vec<usize> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|_| i))
        .collect();
    let (Some(&first), Some(&last)) = (known.first(), known.last()) else {
        return;
    };

    for pair in known.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if hi - lo < 2 {
            continue;
        }
        let (Some(a), Some(b)) = (values[lo], values[hi]) else {
            continue;
        };
        let span = (hi - lo) as f64;
        for (step, slot) in values[lo + 1..hi].iter_mut().enumerate() {
            let t = (step + 1) as f64 / span;
            *slot = Some(a + (b - a) * t);
        }
    }

    if edge == EdgeFill::Hold {
        let head = values[first];
        let tail = values[last];
        values[..first].iter_mut().for_each(|v| *v = head);
        values[last + 1..].iter_mut().for_each(|v| *v = tail);
    }
}
