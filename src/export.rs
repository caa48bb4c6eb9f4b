//! Latitude / longitude extract, as consumed by heatmap renderers.
use crate::{error::Error, timeseries::Table};

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

#[cfg(feature = "log")]
use log::debug;

impl Table {
    /// Keeps one row every `ratio` rows (0 is treated as 1) and writes
    /// one `"<lat> <lon>"` line (decimal degrees, space delimited, no header)
    /// for each retained row that has both decimal coordinates,
    /// in chronological order. Returns the number of lines written.
    pub fn write_latlon<W: Write>(&self, writer: &mut W, ratio: usize) -> Result<usize, Error> {
        let ratio = ratio.max(1);
        let mut written = 0;
        for (_, row) in self.iter().step_by(ratio) {
            let fix = match row.position_fix.as_ref() {
                Some(fix) => fix,
                None => continue,
            };
            if let (Some(lat), Some(lon)) = (fix.latitude_ddeg, fix.longitude_ddeg) {
                writeln!(writer, "{} {}", lat, lon)?;
                written += 1;
            }
        }
        Ok(written)
    }

    /// Creates (or truncates) the file at `path` and fills it with
    /// [Self::write_latlon].
    pub fn write_latlon_file<P: AsRef<Path>>(&self, path: P, ratio: usize) -> Result<usize, Error> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        let written = self.write_latlon(&mut writer, ratio)?;
        writer.flush()?;

        #[cfg(feature = "log")]
        debug!("{}: {} coordinates written", path.display(), written);

        Ok(written)
    }
}
