//! Read-only union of two filesystems

use crate::{DirEntry, Error, FileStat, ReadFs, RelPath, Result};

/// Layers an `upper` filesystem over a `lower` one.
///
/// Listings merge both layers by name, with the upper entry shadowing a
/// lower entry of the same name. Reads and stats try the upper layer first
/// and fall back to the lower one when the upper reports `NotFound`.
#[derive(Debug, Clone)]
pub struct OverlayFs<U, L> {
    upper: U,
    lower: L,
}

impl<U: ReadFs, L: ReadFs> OverlayFs<U, L> {
    pub fn new(upper: U, lower: L) -> Self {
        Self { upper, lower }
    }

    pub fn upper(&self) -> &U {
        &self.upper
    }

    pub fn lower(&self) -> &L {
        &self.lower
    }
}

fn or_not_found<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

impl<U: ReadFs, L: ReadFs> ReadFs for OverlayFs<U, L> {
    fn read_dir(&self, path: &RelPath) -> Result<Vec<DirEntry>> {
        let upper = or_not_found(self.upper.read_dir(path))?;
        let lower = or_not_found(self.lower.read_dir(path))?;
        let (mut merged, lower) = match (upper, lower) {
            (None, None) => return Err(Error::not_found(path.as_str())),
            (Some(upper), None) => return Ok(upper),
            (None, Some(lower)) => return Ok(lower),
            (Some(upper), Some(lower)) => (upper, lower),
        };
        for entry in lower {
            if !merged.iter().any(|e| e.name == entry.name) {
                merged.push(entry);
            }
        }
        merged.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(merged)
    }

    fn read_file(&self, path: &RelPath) -> Result<Vec<u8>> {
        match or_not_found(self.upper.read_file(path))? {
            Some(data) => Ok(data),
            None => self.lower.read_file(path),
        }
    }

    fn stat(&self, path: &RelPath) -> Result<FileStat> {
        match or_not_found(self.upper.stat(path))? {
            Some(stat) => Ok(stat),
            None => self.lower.stat(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemFs;

    #[test]
    fn upper_shadows_lower() {
        let upper = MemFs::from_files([("a.txt", "upper")]);
        let lower = MemFs::from_files([("a.txt", "lower"), ("b.txt", "lower")]);
        let overlay = OverlayFs::new(&upper, &lower);

        assert_eq!(overlay.read_file(&RelPath::new("a.txt")).unwrap(), b"upper");
        assert_eq!(overlay.read_file(&RelPath::new("b.txt")).unwrap(), b"lower");

        let names: Vec<_> = overlay
            .read_dir(&RelPath::root())
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn missing_in_both_layers_is_not_found() {
        let overlay = OverlayFs::new(MemFs::new(), MemFs::new());
        assert!(overlay.read_dir(&RelPath::new("nope")).unwrap_err().is_not_found());
        assert!(overlay.stat(&RelPath::new("nope")).unwrap_err().is_not_found());
    }
}
