use crate::error::{CaseMkError, Result};
use crate::model::Item;

fn split_dims(s: &str) -> Result<Vec<f64>> {
    let cleaned: String = s
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    let mut dims = Vec::new();
    for part in cleaned.split('x') {
        let v: f64 = part
            .parse()
            .map_err(|_| CaseMkError::InvalidInput(format!("not a number '{}' in: {}", part, s)))?;
        dims.push(v);
    }
    Ok(dims)
}

fn ensure_positive(dims: &[f64], s: &str) -> Result<()> {
    if dims.iter().any(|d| !(*d > 0.0 && d.is_finite())) {
        return Err(CaseMkError::InvalidInput(format!(
            "Dimensions must be positive, got: {}",
            s
        )));
    }
    Ok(())
}

/// Parse `WxLxH` or `WxL` into (width, length, height). Height defaults to width.
pub fn parse_dimensions(s: &str) -> Result<(f64, f64, f64)> {
    let dims = split_dims(s)?;
    if dims.len() < 2 || dims.len() > 3 {
        return Err(CaseMkError::InvalidInput(format!(
            "Expected format WxLxH or WxL, got: {}",
            s
        )));
    }
    ensure_positive(&dims, s)?;
    let height = dims.get(2).copied().unwrap_or(dims[0]);
    Ok((dims[0], dims[1], height))
}

/// Parse `WxL` into (width, length).
pub fn parse_footprint(s: &str) -> Result<(f64, f64)> {
    let dims = split_dims(s)?;
    if dims.len() != 2 {
        return Err(CaseMkError::InvalidInput(format!(
            "Expected format WxL, got: {}",
            s
        )));
    }
    ensure_positive(&dims, s)?;
    Ok((dims[0], dims[1]))
}

/// Parse a comma-separated item list such as `30x20x15:4, 40x30x20:2(70123-SD-1)`.
///
/// Each entry is `dims[:count[(label)]]`; count defaults to 1 and a blank label
/// is treated as no label.
pub fn parse_items(s: &str) -> Result<Vec<Item>> {
    let mut items = Vec::new();
    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (dims_str, count, label) = match part.rsplit_once(':') {
            Some((dims_str, rest)) => {
                let rest = rest.trim();
                let (count_str, label) = match rest.split_once('(') {
                    Some((c, l)) => {
                        let l = l.trim_end().trim_end_matches(')').trim();
                        (c.trim(), (!l.is_empty()).then(|| l.to_string()))
                    }
                    None => (rest, None),
                };
                let count: usize = count_str.parse().map_err(|_| {
                    CaseMkError::InvalidInput(format!("bad count '{}' in: {}", count_str, part))
                })?;
                (dims_str, count, label)
            }
            None => (part, 1, None),
        };
        let (width, length, height) = parse_dimensions(dims_str.trim())?;
        items.push(Item {
            width,
            length,
            height,
            count,
            label,
        });
    }
    if items.is_empty() {
        return Err(CaseMkError::Empty);
    }
    Ok(items)
}
