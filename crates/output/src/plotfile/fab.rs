//! Binary `Cell_D_*` payload decoding.
//!
//! A payload starts with one ASCII line
//!
//! ```text
//! FAB ((8, (64 11 52 0 1 12 0 1023)),(8, (8 7 6 5 4 3 2 1)))((0,0,0) (9,7,4) (0,0,0)) 2
//! ```
//!
//! giving the element width, the byte order, the index box and the
//! component count, followed by the raw values with `x` varying fastest
//! and the component slowest.

use std::path::Path;

use ndarray::Array4;

use super::header::int_tuples;
use crate::error::OutputError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ByteOrder {
    Little,
    Big,
}

/// Parsed FAB sub-header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FabHeader {
    /// Bytes per element, 4 or 8.
    pub(crate) width: usize,
    pub(crate) order: ByteOrder,
    pub(crate) box_lo: Vec<i64>,
    pub(crate) box_hi: Vec<i64>,
    pub(crate) ncomp: usize,
}

impl FabHeader {
    /// Cell counts `[nx, ny, nz]`.
    pub(crate) fn n_cell(&self) -> [usize; 3] {
        let mut n = [1usize; 3];
        for (axis, slot) in n.iter_mut().enumerate().take(self.box_lo.len()) {
            let len = self.box_hi[axis]
                .saturating_sub(self.box_lo[axis])
                .saturating_add(1);
            *slot = usize::try_from(len).unwrap_or(0);
        }
        n
    }

    fn parse(line: &str, path: &Path) -> Result<Self, OutputError> {
        let malformed = |reason: String| OutputError::MalformedPayload {
            path: path.to_path_buf(),
            reason,
        };

        let rest = line
            .strip_prefix("FAB")
            .ok_or_else(|| malformed(format!("expected 'FAB' sub-header, got '{line}'")))?;

        let width: usize = rest
            .trim_start()
            .trim_start_matches('(')
            .split(',')
            .next()
            .and_then(|t| t.trim().parse().ok())
            .ok_or_else(|| malformed("missing element width".into()))?;
        if width != 4 && width != 8 {
            return Err(malformed(format!("unsupported element width {width}")));
        }

        // The last three groups are the box corners and the index type.
        // Before them sit the real descriptor and, usually, the byte order.
        let groups = int_tuples(rest);
        if groups.len() < 3 {
            return Err(malformed(format!("cannot read sub-header '{line}'")));
        }
        let box_at = groups.len() - 3;

        let descending: Vec<i64> = (1..=width as i64).rev().collect();
        let ascending: Vec<i64> = (1..=width as i64).collect();
        let order = match groups[..box_at].get(1) {
            Some(g) if g.len() == width && *g == descending => ByteOrder::Little,
            Some(g) if g.len() == width && *g == ascending => ByteOrder::Big,
            Some(g) if g.len() == width => {
                return Err(malformed(format!("unsupported byte order {g:?}")));
            }
            _ => ByteOrder::Little,
        };

        let box_lo = groups[box_at].clone();
        let box_hi = groups[box_at + 1].clone();
        if box_lo.len() != box_hi.len() || !(2..=3).contains(&box_lo.len()) {
            return Err(malformed(format!("bad index box in '{line}'")));
        }

        let ncomp: usize = rest
            .rsplit(')')
            .next()
            .and_then(|t| t.trim().parse().ok())
            .ok_or_else(|| malformed("missing component count".into()))?;

        Ok(Self {
            width,
            order,
            box_lo,
            box_hi,
            ncomp,
        })
    }
}

/// Decode a whole payload into a `(component, z, y, x)` array.
pub(crate) fn decode(bytes: &[u8], path: &Path) -> Result<(FabHeader, Array4<f64>), OutputError> {
    let newline = bytes.iter().position(|&b| b == b'\n').ok_or_else(|| {
        OutputError::MalformedPayload {
            path: path.to_path_buf(),
            reason: "no sub-header line".into(),
        }
    })?;
    let line = std::str::from_utf8(&bytes[..newline]).map_err(|_| OutputError::MalformedPayload {
        path: path.to_path_buf(),
        reason: "sub-header is not ASCII".into(),
    })?;
    let header = FabHeader::parse(line.trim_end_matches('\r'), path)?;

    let [nx, ny, nz] = header.n_cell();
    let sizes = [nz, ny, nx, header.width];
    let Some((count, needed)) = [nz, ny, nx]
        .iter()
        .try_fold(header.ncomp, |acc, &n| acc.checked_mul(n))
        .and_then(|count| Some((count, count.checked_mul(header.width)?)))
    else {
        return Err(OutputError::MalformedPayload {
            path: path.to_path_buf(),
            reason: format!(
                "{} components of {sizes:?} (z, y, x, bytes) overflow the payload size",
                header.ncomp
            ),
        });
    };
    let data = &bytes[newline + 1..];
    if data.len() < needed {
        return Err(OutputError::MalformedPayload {
            path: path.to_path_buf(),
            reason: format!(
                "expected {count} values ({needed} bytes), found {} bytes",
                data.len()
            ),
        });
    }

    let values: Vec<f64> = data[..needed]
        .chunks_exact(header.width)
        .map(|chunk| read_value(chunk, header.order))
        .collect();

    // x fastest, component slowest is C order for (ncomp, nz, ny, nx).
    let array = Array4::from_shape_vec((header.ncomp, nz, ny, nx), values).map_err(|e| {
        OutputError::MalformedPayload {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    })?;
    Ok((header, array))
}

fn read_value(chunk: &[u8], order: ByteOrder) -> f64 {
    match (chunk.len(), order) {
        (4, order) => {
            let buf = [chunk[0], chunk[1], chunk[2], chunk[3]];
            f64::from(match order {
                ByteOrder::Little => f32::from_le_bytes(buf),
                ByteOrder::Big => f32::from_be_bytes(buf),
            })
        }
        (_, order) => {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(&chunk[..8]);
            match order {
                ByteOrder::Little => f64::from_le_bytes(buf),
                ByteOrder::Big => f64::from_be_bytes(buf),
            }
        }
    }
}
