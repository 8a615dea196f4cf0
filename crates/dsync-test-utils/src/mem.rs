//! In-memory tree helpers.

use std::collections::BTreeMap;

use dsync_fs::MemFs;

/// Build a [`MemFs`] holding `files`, creating every directory on the way.
///
/// ```rust
/// use dsync_test_utils::mem_tree;
///
/// let fs = mem_tree(&[("a.txt", "hi"), ("sub/b.txt", "there")]);
/// assert_eq!(fs.contents("sub/b.txt"), Some(b"there".to_vec()));
/// ```
pub fn mem_tree(files: &[(&str, &str)]) -> MemFs {
    MemFs::from_files(files.iter().copied())
}

/// Every file in `fs` as a `path -> utf8 content` map, for comparing trees.
///
/// # Panics
/// Panics if a file is not valid UTF-8.
pub fn file_map(fs: &MemFs) -> BTreeMap<String, String> {
    fs.files()
        .into_iter()
        .map(|(path, data)| {
            let text = String::from_utf8(data)
                .unwrap_or_else(|e| panic!("file_map: {path} is not UTF-8: {e}"));
            (path.as_str().to_string(), text)
        })
        .collect()
}
