use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read};

use camino::Utf8Path;
use flate2::read::MultiGzDecoder;

use crate::error::CoordError;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Opens `path` for reading, transparently decompressing gzip content.
pub fn open_input(path: &Utf8Path) -> Result<Box<dyn Read>, CoordError> {
    let file = File::open(path.as_std_path()).map_err(|err| CoordError::OpenInput {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    let mut reader = BufReader::new(file);
    let gzipped = is_gzip(&mut reader).map_err(|err| CoordError::OpenInput {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    if gzipped {
        Ok(Box::new(MultiGzDecoder::new(reader)))
    } else {
        Ok(Box::new(reader))
    }
}

pub fn create_output(path: &Utf8Path) -> Result<BufWriter<File>, CoordError> {
    let file = File::create(path.as_std_path()).map_err(|err| CoordError::OpenOutput {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    Ok(BufWriter::new(file))
}

fn is_gzip<R: BufRead>(reader: &mut R) -> io::Result<bool> {
    let head = reader.fill_buf()?;
    Ok(head.len() >= GZIP_MAGIC.len() && head[..GZIP_MAGIC.len()] == GZIP_MAGIC)
}
