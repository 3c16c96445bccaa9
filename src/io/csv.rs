use std::io::Write;
use std::path::Path;

use crate::sim::Trajectory;

/// Write trajectory samples as CSV.
///
/// Columns: time, downrange_m, altitude_m, mach
pub fn write_trajectory<W: Write>(writer: W, trajectory: &Trajectory) -> ::csv::Result<()> {
    let mut wtr = ::csv::Writer::from_writer(writer);
    wtr.write_record(["time", "downrange_m", "altitude_m", "mach"])?;

    for s in trajectory {
        wtr.write_record(&[
            format!("{:.4}", s.time),
            format!("{:.3}", s.downrange),
            format!("{:.3}", s.altitude),
            format!("{:.5}", s.mach),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write trajectory to a CSV file at the given path.
pub fn write_trajectory_file(path: impl AsRef<Path>, trajectory: &Trajectory) -> ::csv::Result<()> {
    let file = std::fs::File::create(path)?;
    write_trajectory(file, trajectory)
}
