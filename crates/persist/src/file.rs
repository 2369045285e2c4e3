use std::{
    fs::{self, File, OpenOptions},
    io::{self, BufReader, BufWriter},
    path::Path,
};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::PersistResult;

/// Create parents of the path if they dont exist
pub fn create_parent_all(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Read a json file, or the default value when the file does not exist.
pub(crate) fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> PersistResult<T> {
    let data = if path.exists() {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)?
    } else {
        Default::default()
    };

    Ok(data)
}

pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> PersistResult<()> {
    create_parent_all(path)?;

    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;

    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value)?;

    Ok(())
}
