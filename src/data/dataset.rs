//! Dataset normalization.
//!
//! The raw table is loaded once, then [`RawDataset::normalize`] consumes it and produces the
//! [`NormalizedDataset`] every renderer reads through a shared reference.

use std::path::Path;

use crate::foundation::error::{CrossPlotError, CrossPlotResult};

/// Mix ratio step between adjacent layers: layer `zeta` mixes with `z = zeta * MIX_STEP`.
pub const MIX_STEP: f32 = 0.1;

/// Reference table: time stamp followed by three temperature series.
pub const BUILTIN_ROWS: [[f32; 4]; 50] = [
    [133600.0, 7.06, 3.4, 14.76],
    [137200.0, 6.99, 3.74, 16.15],
    [140800.0, 7.34, 4.12, 17.33],
    [144400.0, 9.49, 4.32, 18.39],
    [148000.0, 10.99, 4.53, 19.25],
    [151600.0, 10.81, 4.69, 19.71],
    [155200.0, 10.5, 4.91, 19.71],
    [158800.0, 9.99, 5.08, 19.19],
    [162400.0, 9.49, 5.51, 18.31],
    [166000.0, 8.92, 5.99, 17.52],
    [169600.0, 8.24, 6.16, 16.86],
    [173200.0, 7.02, 6.15, 16.39],
    [176800.0, 5.73, 5.95, 16.08],
    [180400.0, 4.79, 5.63, 15.93],
    [184000.0, 4.72, 5.3, 15.54],
    [187600.0, 4.85, 4.64, 15.45],
    [191200.0, 5.18, 4.17, 15.13],
    [194800.0, 5.85, 4.03, 14.73],
    [198400.0, 6.48, 4.23, 14.29],
    [202000.0, 6.48, 4.23, 13.97],
    [205600.0, 5.89, 4.07, 13.79],
    [209200.0, 5.04, 3.85, 13.72],
    [212800.0, 4.58, 3.65, 14.39],
    [216400.0, 4.5, 3.68, 15.84],
    [220000.0, 4.67, 3.68, 17.47],
    [223600.0, 4.92, 3.64, 18.96],
    [227200.0, 5.15, 3.52, 20.04],
    [230800.0, 5.25, 3.47, 20.88],
    [234400.0, 5.09, 3.31, 21.4],
    [238000.0, 4.81, 3.18, 21.65],
    [241600.0, 4.38, 3.05, 21.38],
    [245200.0, 3.86, 3.1, 20.76],
    [248800.0, 3.13, 3.45, 19.83],
    [252400.0, 2.39, 4.17, 19.06],
    [256000.0, 1.8, 4.75, 18.4],
    [259600.0, 1.75, 5.17, 18.03],
    [263200.0, 2.14, 5.23, 17.76],
    [266800.0, 2.71, 5.02, 17.57],
    [270400.0, 3.48, 4.46, 17.43],
    [274000.0, 4.23, 3.92, 17.27],
    [277600.0, 4.6, 3.4, 17.02],
    [281200.0, 4.41, 3.11, 16.85],
    [284800.0, 3.99, 2.89, 16.79],
    [288400.0, 3.49, 2.68, 16.75],
    [292000.0, 3.03, 2.32, 16.77],
    [295600.0, 2.48, 2.06, 16.85],
    [299200.0, 2.23, 1.88, 17.4],
    [302800.0, 2.27, 1.72, 18.44],
    [306400.0, 2.49, 1.44, 19.62],
    [310000.0, 5.06, 2.4, 17.76],
];

/// Raw 4-column rows as loaded: `[time, c1, c2, c3]`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct RawDataset {
    rows: Vec<[f32; 4]>,
}

/// Which raw column feeds each amplitude channel. Column 0 is always the time column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnRoles {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

/// Load-time multipliers: `x = index * kx`, `A *= ky`, `B *= 1.5 ky`, `C *= 2 ky`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetScale {
    pub kx: f32,
    pub ky: f32,
}

/// One normalized row.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct DataRow {
    /// Horizontal diagram position.
    pub x: f32,
    pub channel_a: f32,
    pub channel_b: f32,
    pub channel_c: f32,
}

/// Rows after the one-time normalization. Immutable from here on.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct NormalizedDataset {
    rows: Vec<DataRow>,
}

impl Default for ColumnRoles {
    fn default() -> Self {
        Self { a: 3, b: 1, c: 2 }
    }
}

impl ColumnRoles {
    pub fn validate(self) -> CrossPlotResult<()> {
        for (name, idx) in [("a", self.a), ("b", self.b), ("c", self.c)] {
            if !(1..=3).contains(&idx) {
                return Err(CrossPlotError::validation(format!(
                    "column role {name} must be in 1..=3, got {idx}"
                )));
            }
        }
        if self.a == self.b || self.a == self.c || self.b == self.c {
            return Err(CrossPlotError::validation(format!(
                "column roles must be distinct, got a={} b={} c={}",
                self.a, self.b, self.c
            )));
        }
        Ok(())
    }
}

impl Default for DatasetScale {
    fn default() -> Self {
        Self { kx: 15.0, ky: 10.0 }
    }
}

impl DatasetScale {
    pub fn validate(self) -> CrossPlotResult<()> {
        if !self.kx.is_finite() || !self.ky.is_finite() {
            return Err(CrossPlotError::validation("dataset scale must be finite"));
        }
        Ok(())
    }
}

impl RawDataset {
    /// Wrap rows, rejecting tables with fewer than two rows or non-finite values.
    pub fn new(rows: Vec<[f32; 4]>) -> CrossPlotResult<Self> {
        if rows.len() < 2 {
            return Err(CrossPlotError::validation(format!(
                "dataset needs at least 2 rows, got {}",
                rows.len()
            )));
        }
        if let Some(i) = rows.iter().position(|r| r.iter().any(|v| !v.is_finite())) {
            return Err(CrossPlotError::validation(format!(
                "dataset row {i} contains a non-finite value"
            )));
        }
        Ok(Self { rows })
    }

    pub fn builtin() -> Self {
        Self {
            rows: BUILTIN_ROWS.to_vec(),
        }
    }

    /// Read a JSON array of `[time, c1, c2, c3]` rows.
    pub fn from_json_file(path: &Path) -> CrossPlotResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| CrossPlotError::io(path, e))?;
        let rows: Vec<[f32; 4]> = serde_json::from_str(&text).map_err(|e| {
            CrossPlotError::serde(format!("parse dataset '{}': {e}", path.display()))
        })?;
        Self::new(rows)
    }

    pub fn rows(&self) -> &[[f32; 4]] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Ensure the crossing position addresses a row.
    pub fn check_position(&self, position: usize) -> CrossPlotResult<()> {
        if position >= self.rows.len() {
            return Err(CrossPlotError::validation(format!(
                "position {position} is outside the dataset ({} rows)",
                self.rows.len()
            )));
        }
        Ok(())
    }

    /// Apply the load-time scaling. Consumes the raw table so it cannot be scaled twice.
    pub fn normalize(
        self,
        roles: ColumnRoles,
        scale: DatasetScale,
    ) -> CrossPlotResult<NormalizedDataset> {
        roles.validate()?;
        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| DataRow {
                x: i as f32 * scale.kx,
                channel_a: row[roles.a] * scale.ky,
                channel_b: row[roles.b] * (scale.ky * 1.5),
                channel_c: row[roles.c] * (scale.ky * 2.0),
            })
            .collect();
        Ok(NormalizedDataset { rows })
    }
}

impl DataRow {
    /// Value plotted for this row on layer `zeta`: `A + B*z - C*(1-z) + jitter`.
    pub fn mix(&self, zeta: u32, jitter: u32) -> f32 {
        let z = zeta as f32 * MIX_STEP;
        self.channel_a + self.channel_b * z - self.channel_c * (1.0 - z) + jitter as f32
    }
}

impl NormalizedDataset {
    pub fn rows(&self) -> &[DataRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row shown at on-screen `index` on frame `tau`.
    pub fn rotated_index(&self, index: usize, tau: u64) -> usize {
        let n = self.rows.len() as u64;
        ((index as u64 + tau % n) % n) as usize
    }

    /// Value plotted at on-screen `index` for frame `tau` and layer `zeta`.
    pub fn sample(&self, index: usize, tau: u64, zeta: u32, jitter: u32) -> f32 {
        self.rows[self.rotated_index(index, tau)].mix(zeta, jitter)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/dataset.rs"]
mod tests;
