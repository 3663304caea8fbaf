use std::path::PathBuf;
use std::{env, io};

mod schema;
mod settings;
mod storage;

pub use schema::SchemaManager;
pub use settings::{Auth, Database, Logger, Server, Settings, Telemetry};
pub use storage::Storage;

pub(crate) fn normalize_path(path: &str) -> io::Result<PathBuf> {
    let path_buf = PathBuf::from(path);

    Ok(if path_buf.is_absolute() {
        path_buf
    } else {
        env::current_dir()?.as_path().join(&path_buf)
    })
}
