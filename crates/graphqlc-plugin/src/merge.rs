use crate::protocol::CodeGeneratorResponse;
use std::{
    fs,
    io::{self, Write},
    path::{Component, Path, PathBuf},
};
use thiserror::Error;

/// Marks a place in a generated file where later plugins can inject content, written as
/// `@@graphqlc_insertion_point(<name>)`.
pub const INSERTION_POINT_MARKER: &str = "@@graphqlc_insertion_point";

#[derive(Debug, Error)]
pub enum MergeError {
    #[error("file #{index} of the response has insertion point `{insertion_point}` but no file name")]
    MissingName { index: usize, insertion_point: String },
    #[error("file #{index} of the response appends to the previous file, but there is none")]
    MissingPredecessor { index: usize },
    #[error("file #{index} of the response is named `{name}`, which is not a relative path inside the output directory")]
    OutsideOutputDir { index: usize, name: String },
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Writes the files of one plugin response below the plugin's output directory.
///
/// Operations are applied one by one. When one fails, the ones before it stay on disk.
#[derive(Debug, Clone)]
pub struct ResponseMerger {
    output_dir: PathBuf,
}

impl ResponseMerger {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        ResponseMerger {
            output_dir: output_dir.into(),
        }
    }

    pub fn apply(&self, response: &CodeGeneratorResponse) -> Result<(), MergeError> {
        let mut previous: Option<PathBuf> = None;

        for (index, file) in response.file.iter().enumerate() {
            let path = match (file.name.is_empty(), file.insertion_point.is_empty()) {
                (true, true) => {
                    let path = previous.take().ok_or(MergeError::MissingPredecessor { index })?;
                    tracing::trace!(path = %path.display(), "appending to file");
                    append(&path, &file.content)?;
                    path
                }
                (false, true) => {
                    let path = self.target(index, &file.name)?;
                    tracing::trace!(path = %path.display(), "writing file");
                    write_new(&path, &file.content)?;
                    path
                }
                (false, false) => {
                    let path = self.target(index, &file.name)?;
                    tracing::trace!(
                        path = %path.display(),
                        insertion_point = %file.insertion_point,
                        "inserting into file"
                    );
                    insert(&path, &file.insertion_point, &file.content)?;
                    path
                }
                (true, false) => {
                    return Err(MergeError::MissingName {
                        index,
                        insertion_point: file.insertion_point.clone(),
                    })
                }
            };

            previous = Some(path);
        }

        Ok(())
    }

    /// Resolves a file name against the output directory. Absolute names and names with `..`
    /// components are rejected.
    fn target(&self, index: usize, name: &str) -> Result<PathBuf, MergeError> {
        let stays_inside = Path::new(name)
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));

        if !stays_inside {
            return Err(MergeError::OutsideOutputDir {
                index,
                name: name.to_owned(),
            });
        }

        Ok(self.output_dir.join(name))
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> MergeError + '_ {
    move |source| MergeError::Io {
        path: path.to_owned(),
        source,
    }
}

fn write_new(path: &Path, content: &str) -> Result<(), MergeError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }

    fs::write(path, content).map_err(io_error(path))
}

fn append(path: &Path, content: &str) -> Result<(), MergeError> {
    let mut file = fs::OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(io_error(path))?;

    file.write_all(content.as_bytes()).map_err(io_error(path))
}

/// Rewrites `path` with `content` injected at the first line holding the insertion point
/// marker. The new text goes to a temporary file next to the original which then replaces it.
fn insert(path: &Path, insertion_point: &str, content: &str) -> Result<(), MergeError> {
    let original = fs::read(path).map_err(io_error(path))?;
    let merged = inject(&original, insertion_point, content);

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(io_error(dir))?;
    temp.write_all(&merged).map_err(io_error(temp.path()))?;

    let permissions = fs::metadata(path).map_err(io_error(path))?.permissions();
    fs::set_permissions(temp.path(), permissions).map_err(io_error(temp.path()))?;

    temp.persist(path).map_err(|err| MergeError::Io {
        path: path.to_owned(),
        source: err.error,
    })?;

    Ok(())
}

/// For the first line containing `@@graphqlc_insertion_point(<insertion_point>)`, emits the
/// line up to the end of the marker followed by `content` and a newline, then the line itself.
/// Everything else, a last line without a newline included, is copied as is.
fn inject(original: &[u8], insertion_point: &str, content: &str) -> Vec<u8> {
    let marker = format!("{INSERTION_POINT_MARKER}({insertion_point})");
    let marker = marker.as_bytes();

    let mut merged = Vec::with_capacity(original.len() + content.len() + 1);
    let mut inserted = false;

    for line in original.split_inclusive(|byte| *byte == b'\n') {
        if !inserted {
            if let Some(position) = find(line, marker) {
                merged.extend_from_slice(&line[..position + marker.len()]);
                merged.extend_from_slice(content.as_bytes());
                merged.push(b'\n');
                inserted = true;
            }
        }

        merged.extend_from_slice(line);
    }

    merged
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}
