use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use flate2::write::ZlibEncoder;
use orion_hash::{Hasher, ObjectId};
use orion_object::Object;

use crate::{ObjectDatabase, Result};

impl ObjectDatabase {
    /// Stores an object and returns its id.
    ///
    /// The id is computed over the encoded form, header included, so the
    /// same logical object always lands on the same path. If that path is
    /// already occupied the write is skipped entirely.
    pub fn write(&self, object: &Object) -> Result<ObjectId> {
        let content = object.serialize_content();
        self.write_raw(object.object_type().as_str(), &content)
    }

    /// Stores raw content under the given object type.
    pub fn write_raw(&self, obj_type: &str, content: &[u8]) -> Result<ObjectId> {
        let mut data = Vec::with_capacity(content.len() + 32);
        data.extend_from_slice(obj_type.as_bytes());
        data.push(b' ');
        data.extend_from_slice(content.len().to_string().as_bytes());
        data.push(0);
        data.extend_from_slice(content);

        let mut hasher = Hasher::new();
        hasher.update(&data);
        let oid = hasher.finalize();

        if self.contains(&oid) {
            return Ok(oid);
        }

        let path = self.object_path(&oid);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.write_to_temp(&data)?;
        finalize_object(&tmp, &path)?;

        Ok(oid)
    }

    /// Compresses `data` into a uniquely named temporary file next to the
    /// final location, so the rename in `finalize_object` stays on one
    /// filesystem.
    fn write_to_temp(&self, data: &[u8]) -> Result<PathBuf> {
        let pid = process::id() as u128;
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let tmp = self.objects_dir.join(format!("tmp_obj_{:x}", pid ^ nanos));

        let file = File::create(&tmp)?;
        let mut encoder = ZlibEncoder::new(file, self.compression_level);
        encoder.write_all(data)?;
        let file = encoder.finish()?;
        file.sync_all()?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp, fs::Permissions::from_mode(0o444))?;
        }

        Ok(tmp)
    }
}

/// Moves a finished temporary file onto its final name.
///
/// Losing a rename race to a concurrent writer is fine: the content under
/// a given id is identical by construction, so the temp file is simply
/// discarded.
fn finalize_object(tmp: &Path, path: &Path) -> Result<()> {
    match fs::rename(tmp, path) {
        Ok(()) => Ok(()),
        Err(err) => {
            if path.exists() {
                let _ = fs::remove_file(tmp);
                Ok(())
            } else {
                let _ = fs::remove_file(tmp);
                Err(err.into())
            }
        }
    }
}
