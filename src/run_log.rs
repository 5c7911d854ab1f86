use anyhow::{anyhow, Context, Result};
use env_logger::{Builder, Env, Target};
use std::{
    fs::File,
    io::{self, Write},
    path::Path,
    sync::{Arc, Mutex},
};

/// Log sink for a run. Records always go to stderr; once a log file is
/// attached they are copied into it as well.
#[derive(Clone, Default)]
pub struct RunLog {
    file: Arc<Mutex<Option<File>>>,
}

impl RunLog {
    /// Creates (or truncates) the log file and starts copying records into it.
    pub fn attach<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file at: {:?}", path))?;

        let mut slot = self
            .file
            .lock()
            .map_err(|_| anyhow!("Run log lock poisoned"))?;
        *slot = Some(file);
        Ok(())
    }
}

impl Write for RunLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;

        let mut slot = self
            .file
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "run log lock poisoned"))?;
        if let Some(file) = slot.as_mut() {
            file.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;

        let mut slot = self
            .file
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "run log lock poisoned"))?;
        if let Some(file) = slot.as_mut() {
            file.flush()?;
        }
        Ok(())
    }
}

pub fn init_logging(run_log: &RunLog) {
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(run_log.clone())))
        .init();
}
