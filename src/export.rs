//! CSV export of sampled solutions for external plotting tools.
//!
//! Two layouts are offered:
//!
//! - [`write_csv`] / [`write_series_csv`]: one `time` column followed by one
//!   column per state component.
//! - [`write_samples_csv`]: `time,value` rows of [`Sample`] for a single
//!   component, serialized with serde.
//!
//! ```csv
//! time,amount
//! 0,0.05
//! 0.1,0.04900993...
//! ```

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::{Error, Float, solve::Solution};

/// One `(time, value)` point of a single state component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: Float,
    pub value: Float,
}

/// Samples of `component` at every stored step endpoint.
pub fn samples(solution: &Solution, component: usize) -> Result<Vec<Sample>, Error> {
    let values = solution.component(component)?;
    Ok(solution
        .times()
        .iter()
        .zip(values)
        .map(|(&time, value)| Sample { time, value })
        .collect())
}

/// Write the stored samples of `solution`. `headers` names the state
/// components; when empty they are called `y0`, `y1`, ...
pub fn write_csv<W: Write>(solution: &Solution, headers: &[&str], writer: W) -> Result<(), Error> {
    write_series_csv(solution.times(), solution.states(), headers, writer)
}

/// Write arbitrary parallel `times` / `states` series, such as the output of
/// [`Solution::resample`].
pub fn write_series_csv<W: Write>(
    times: &[Float],
    states: &[Vec<Float>],
    headers: &[&str],
    writer: W,
) -> Result<(), Error> {
    if times.len() != states.len() {
        return Err(Error::Export(format!(
            "{} times but {} states",
            times.len(),
            states.len()
        )));
    }
    let dim = states.first().map_or(headers.len(), Vec::len);
    if !headers.is_empty() && headers.len() != dim {
        return Err(Error::Export(format!(
            "{} headers for a state of dimension {dim}",
            headers.len()
        )));
    }

    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["time".to_string()];
    if headers.is_empty() {
        header.extend((0..dim).map(|i| format!("y{i}")));
    } else {
        header.extend(headers.iter().map(|h| h.to_string()));
    }
    wtr.write_record(&header)?;

    for (t, y) in times.iter().zip(states) {
        let mut record = Vec::with_capacity(dim + 1);
        record.push(t.to_string());
        record.extend(y.iter().map(|v| v.to_string()));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write `time,value` rows.
pub fn write_samples_csv<W: Write>(samples: &[Sample], writer: W) -> Result<(), Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for sample in samples {
        wtr.serialize(sample)?;
    }
    wtr.flush()?;
    Ok(())
}
