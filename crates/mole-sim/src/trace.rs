//! Accelerometer traces: one `t_ms,x,y,z` sample per line.

use anyhow::{anyhow, bail, Context};
use std::io::BufRead;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub t_ms: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

fn parse_line(line: &str) -> anyhow::Result<Option<Sample>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let fields: Vec<f64> = line
        .split(',')
        .map(|f| {
            f.trim()
                .parse::<f64>()
                .map_err(|e| anyhow!("bad number {:?}: {}", f.trim(), e))
        })
        .collect::<anyhow::Result<_>>()?;
    let [t_ms, x, y, z] = fields[..] else {
        bail!("expected 4 fields, found {}", fields.len());
    };
    if !t_ms.is_finite() {
        bail!("timestamp must be finite");
    }
    Ok(Some(Sample { t_ms, x, y, z }))
}

/// Parse a whole trace. Timestamps must not go backwards.
pub fn read_trace(reader: impl BufRead) -> anyhow::Result<Vec<Sample>> {
    let mut samples: Vec<Sample> = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("reading line {}", i + 1))?;
        let Some(sample) = parse_line(&line).with_context(|| format!("line {}", i + 1))? else {
            continue;
        };
        if let Some(prev) = samples.last() {
            if sample.t_ms < prev.t_ms {
                bail!(
                    "line {}: timestamp {} goes back from {}",
                    i + 1,
                    sample.t_ms,
                    prev.t_ms
                );
            }
        }
        samples.push(sample);
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_comments_and_blank_lines() {
        let text = "# t,x,y,z\n\n0,0,0,9.8\n16.5, 1.0 ,2,30\n";
        let samples = read_trace(text.as_bytes()).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(
            samples[1],
            Sample {
                t_ms: 16.5,
                x: 1.0,
                y: 2.0,
                z: 30.0
            }
        );
    }

    #[test]
    fn rejects_wrong_field_count() {
        let err = read_trace("0,1,2\n".as_bytes()).unwrap_err();
        assert!(format!("{:#}", err).contains("expected 4 fields"));
    }

    #[test]
    fn rejects_time_going_backwards() {
        let err = read_trace("10,0,0,0\n5,0,0,0\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn reports_bad_numbers_with_line() {
        let err = read_trace("0,0,0,0\n1,x,0,0\n".as_bytes()).unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("line 2"), "{}", msg);
        assert!(msg.contains("bad number"), "{}", msg);
    }
}
