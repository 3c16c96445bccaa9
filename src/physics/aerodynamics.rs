use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use interp::{interp, InterpMode};
use nalgebra::Vector3;
use tracing::{info, warn};

use crate::error::TableLoadError;

pub const FALLBACK_CD: f64 = 0.67;
pub const FALLBACK_CL_ALPHA: f64 = 2.0; // per rad

// ---------------------------------------------------------------------------
// Coefficient source
// ---------------------------------------------------------------------------

/// Drag coefficient and lift-curve slope at one Mach number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AeroCoefficients {
    pub cd: f64,
    pub cl_alpha: f64, // per rad
}

/// Mach-indexed coefficient lookup. Both functions are total: any finite
/// Mach, including zero and negative values, yields a value.
pub trait AeroModel {
    fn cd(&self, mach: f64) -> f64;
    fn cl_alpha(&self, mach: f64) -> f64;

    fn coefficients(&self, mach: f64) -> AeroCoefficients {
        AeroCoefficients {
            cd: self.cd(mach),
            cl_alpha: self.cl_alpha(mach),
        }
    }
}

/// Same pair at every Mach.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantAero {
    pub cd: f64,
    pub cl_alpha: f64,
}

impl ConstantAero {
    pub fn new(cd: f64, cl_alpha: f64) -> Self {
        Self { cd, cl_alpha }
    }

    /// Hardcoded estimates used when no table can be loaded.
    pub fn fallback() -> Self {
        Self::new(FALLBACK_CD, FALLBACK_CL_ALPHA)
    }
}

impl AeroModel for ConstantAero {
    fn cd(&self, _mach: f64) -> f64 {
        self.cd
    }

    fn cl_alpha(&self, _mach: f64) -> f64 {
        self.cl_alpha
    }
}

// ---------------------------------------------------------------------------
// Interpolating table
// ---------------------------------------------------------------------------

/// Piecewise-linear Mach -> (Cd, Cl_alpha) curves, linearly extrapolated
/// past both ends.
///
/// Source rows are `mach, alpha, cd, cl_alpha` with a header line. The alpha
/// column is read but does not enter the curves; rows sharing a Mach value
/// are averaged into a single breakpoint.
#[derive(Debug, Clone)]
pub struct AeroTable {
    mach: Vec<f64>,
    cd: Vec<f64>,
    cl_alpha: Vec<f64>,
}

/// One parsed table row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AeroSample {
    pub mach: f64,
    pub alpha: f64,
    pub cd: f64,
    pub cl_alpha: f64,
}

impl AeroTable {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TableLoadError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TableLoadError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);

        let mut samples = Vec::new();
        for (idx, record) in rdr.records().enumerate() {
            let record = record?;
            let row = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + 2);

            if record.len() != 4 {
                return Err(TableLoadError::MalformedRow {
                    row,
                    reason: format!("expected 4 columns, found {}", record.len()),
                });
            }

            let mut values = [0.0; 4];
            for (slot, field) in values.iter_mut().zip(record.iter()) {
                let v: f64 = field.parse().map_err(|_| TableLoadError::MalformedRow {
                    row,
                    reason: format!("'{field}' is not a number"),
                })?;
                if !v.is_finite() {
                    return Err(TableLoadError::MalformedRow {
                        row,
                        reason: format!("'{field}' is not finite"),
                    });
                }
                *slot = v;
            }

            samples.push(AeroSample {
                mach: values[0],
                alpha: values[1],
                cd: values[2],
                cl_alpha: values[3],
            });
        }

        Self::from_samples(&samples)
    }

    /// Build from in-memory rows, in any order.
    pub fn from_samples(samples: &[AeroSample]) -> Result<Self, TableLoadError> {
        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.mach.total_cmp(&b.mach));

        let mut mach: Vec<f64> = Vec::with_capacity(sorted.len());
        let mut cd = Vec::with_capacity(sorted.len());
        let mut cl_alpha = Vec::with_capacity(sorted.len());
        let mut counts: Vec<f64> = Vec::with_capacity(sorted.len());

        for s in &sorted {
            match mach.last() {
                Some(&m) if m == s.mach => {
                    let i = mach.len() - 1;
                    cd[i] += s.cd;
                    cl_alpha[i] += s.cl_alpha;
                    counts[i] += 1.0;
                }
                _ => {
                    mach.push(s.mach);
                    cd.push(s.cd);
                    cl_alpha.push(s.cl_alpha);
                    counts.push(1.0);
                }
            }
        }
        for ((c, l), n) in cd.iter_mut().zip(cl_alpha.iter_mut()).zip(&counts) {
            *c /= n;
            *l /= n;
        }

        if mach.len() < 2 {
            return Err(TableLoadError::TooFewPoints { found: mach.len() });
        }

        Ok(Self { mach, cd, cl_alpha })
    }

    /// Mach breakpoints, ascending.
    pub fn breakpoints(&self) -> &[f64] {
        &self.mach
    }
}

impl AeroModel for AeroTable {
    fn cd(&self, mach: f64) -> f64 {
        interp(&self.mach, &self.cd, mach, &InterpMode::Extrapolate)
    }

    fn cl_alpha(&self, mach: f64) -> f64 {
        interp(&self.mach, &self.cl_alpha, mach, &InterpMode::Extrapolate)
    }
}

// ---------------------------------------------------------------------------
// Database: table if it loads, constants otherwise
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum AeroDatabase {
    Table(AeroTable),
    Fallback(ConstantAero),
}

impl AeroDatabase {
    /// Load a table, substituting the constant estimates on any failure.
    /// The failure is logged, never returned.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::from_result(AeroTable::from_path(path), &path.display().to_string())
    }

    pub fn from_reader<R: Read>(reader: R) -> Self {
        Self::from_result(AeroTable::from_reader(reader), "reader")
    }

    fn from_result(result: Result<AeroTable, TableLoadError>, source: &str) -> Self {
        match result {
            Ok(table) => {
                info!(
                    source,
                    breakpoints = table.breakpoints().len(),
                    "loaded aerodynamic table"
                );
                AeroDatabase::Table(table)
            }
            Err(err) => {
                warn!(
                    source,
                    error = %err,
                    cd = FALLBACK_CD,
                    cl_alpha = FALLBACK_CL_ALPHA,
                    "aerodynamic table unavailable, using constant estimates"
                );
                AeroDatabase::Fallback(ConstantAero::fallback())
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, AeroDatabase::Fallback(_))
    }
}

impl Default for AeroDatabase {
    fn default() -> Self {
        AeroDatabase::Fallback(ConstantAero::fallback())
    }
}

impl AeroModel for AeroDatabase {
    fn cd(&self, mach: f64) -> f64 {
        match self {
            AeroDatabase::Table(t) => t.cd(mach),
            AeroDatabase::Fallback(c) => c.cd(mach),
        }
    }

    fn cl_alpha(&self, mach: f64) -> f64 {
        match self {
            AeroDatabase::Table(t) => t.cl_alpha(mach),
            AeroDatabase::Fallback(c) => c.cl_alpha(mach),
        }
    }
}

// ---------------------------------------------------------------------------
// Wind frame -> inertial frame
// ---------------------------------------------------------------------------

/// Planar resolution of drag (along -V) and lift (V rotated +90 deg) at
/// flight-path angle `gamma`. The crossrange component is always zero.
pub fn resolve_wind_forces(drag: f64, lift: f64, gamma: f64) -> Vector3<f64> {
    let (sin_g, cos_g) = gamma.sin_cos();
    Vector3::new(
        -drag * cos_g - lift * sin_g,
        -drag * sin_g + lift * cos_g,
        0.0,
    )
}
