use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};
use memmap2::Mmap;

use crate::consts::{LUT_FORMAT_VERSION, LUT_MAGIC};
use crate::error::{Result, SphereError};
use crate::geometry::{FaceId, Uv};

use super::{LutEntry, ProjectionTable, TableKey};

/// Magic, version, template id, width, height, antialias, entry count.
pub const LUT_HEADER_SIZE: usize = 13 + 4 + 4 + 4 + 4 + 4 + 8;

/// Face code (u8) followed by u and v (f32).
pub const LUT_RECORD_SIZE: usize = 1 + 4 + 4;

/// Cache file header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LutHeader {
    pub version: u32,
    pub key: TableKey,
    pub entry_count: u64,
}

/// Read a cached table, checking it was written for `key`.
///
/// The file is memory mapped and decoded record by record. Any mismatch in
/// header, key or length is reported as a cache error so the caller can
/// rebuild.
pub fn load_table(path: &Path, key: &TableKey) -> Result<ProjectionTable> {
    let file = File::open(path)?;
    let mmap = unsafe { Mmap::map(&file)? };

    if mmap.len() < LUT_HEADER_SIZE {
        return Err(SphereError::Cache("file too small for header".into()));
    }
    if &mmap[..LUT_MAGIC.len()] != LUT_MAGIC {
        return Err(SphereError::Cache("missing MAXSPHERE-LUT magic".into()));
    }

    let header = parse_header(&mmap[..LUT_HEADER_SIZE])?;
    if header.version != LUT_FORMAT_VERSION {
        return Err(SphereError::Cache(format!(
            "format version {} (expected {})",
            header.version, LUT_FORMAT_VERSION
        )));
    }
    if header.key != *key {
        return Err(SphereError::Cache(format!(
            "written for {:?}, wanted {:?}",
            header.key, key
        )));
    }

    let expected = key.entry_count();
    if header.entry_count != expected as u64 {
        return Err(SphereError::Cache(format!(
            "header declares {} entries, expected {}",
            header.entry_count, expected
        )));
    }
    let data = &mmap[LUT_HEADER_SIZE..];
    if data.len() != expected * LUT_RECORD_SIZE {
        return Err(SphereError::Cache(format!(
            "read {} bytes of entries, expected {}",
            data.len(),
            expected * LUT_RECORD_SIZE
        )));
    }

    let mut entries = Vec::with_capacity(expected);
    for record in data.chunks_exact(LUT_RECORD_SIZE) {
        let face = FaceId::from_code(record[0])
            .ok_or_else(|| SphereError::Cache(format!("bad face code {}", record[0])))?;
        let u = LittleEndian::read_f32(&record[1..5]);
        let v = LittleEndian::read_f32(&record[5..9]);
        entries.push(LutEntry {
            face,
            uv: Uv::new(u, v),
        });
    }

    ProjectionTable::from_entries(*key, entries)
}

/// Write a table to `path`.
///
/// Data goes to a sibling temporary file first and is renamed into place, so
/// a concurrent reader never sees a half-written table.
pub fn save_table(path: &Path, table: &ProjectionTable) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = path.with_extension("data.tmp");
    {
        let file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        write_header(
            &mut writer,
            &LutHeader {
                version: LUT_FORMAT_VERSION,
                key: *table.key(),
                entry_count: table.len() as u64,
            },
        )?;
        for entry in table.entries() {
            writer.write_u8(entry.face.code())?;
            writer.write_f32::<LittleEndian>(entry.uv.u)?;
            writer.write_f32::<LittleEndian>(entry.uv.v)?;
        }
        writer.flush()?;
    }
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Read just the header of a cache file.
pub fn read_header(path: &Path) -> Result<LutHeader> {
    let file = File::open(path)?;
    let mmap = unsafe { Mmap::map(&file)? };
    if mmap.len() < LUT_HEADER_SIZE || &mmap[..LUT_MAGIC.len()] != LUT_MAGIC {
        return Err(SphereError::Cache("not a projection table".into()));
    }
    parse_header(&mmap[..LUT_HEADER_SIZE])
}

fn parse_header(buf: &[u8]) -> Result<LutHeader> {
    let mut cursor = std::io::Cursor::new(&buf[LUT_MAGIC.len()..]);

    let version = cursor.read_u32::<LittleEndian>()?;
    let template_id = cursor.read_u32::<LittleEndian>()?;
    let width = cursor.read_u32::<LittleEndian>()? as usize;
    let height = cursor.read_u32::<LittleEndian>()? as usize;
    let antialias = cursor.read_u32::<LittleEndian>()? as usize;
    let entry_count = cursor.read_u64::<LittleEndian>()?;

    Ok(LutHeader {
        version,
        key: TableKey {
            template_id,
            width,
            height,
            antialias,
        },
        entry_count,
    })
}

fn write_header(w: &mut impl Write, header: &LutHeader) -> Result<()> {
    w.write_all(LUT_MAGIC)?;
    w.write_u32::<LittleEndian>(header.version)?;
    w.write_u32::<LittleEndian>(header.key.template_id)?;
    w.write_u32::<LittleEndian>(header.key.width as u32)?;
    w.write_u32::<LittleEndian>(header.key.height as u32)?;
    w.write_u32::<LittleEndian>(header.key.antialias as u32)?;
    w.write_u64::<LittleEndian>(header.entry_count)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_roundtrip() {
        let header = LutHeader {
            version: LUT_FORMAT_VERSION,
            key: TableKey {
                template_id: 3,
                width: 64,
                height: 32,
                antialias: 2,
            },
            entry_count: 64 * 32 * 4,
        };
        let mut buf = Vec::new();
        write_header(&mut buf, &header).unwrap();
        assert_eq!(buf.len(), LUT_HEADER_SIZE);
        assert_eq!(parse_header(&buf).unwrap(), header);
    }
}
