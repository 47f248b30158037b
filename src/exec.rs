use {
    crate::*,
    std::{
        ffi::OsStr,
        io::Read,
        path::Path,
        process::{
            Command,
            ExitStatus,
            Stdio,
        },
        thread,
        time::{
            Duration,
            Instant,
        },
    },
};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// what an external tool printed
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Run an external tool to completion and collect its output.
///
/// A non zero exit status isn't an error here: tools like smartctl
/// use it as a bit mask while still printing what we need.
/// When a timeout is given and expires, the child is killed.
pub fn run<S: AsRef<OsStr>>(
    program: &Path,
    args: &[S],
    timeout: Option<Duration>,
) -> Result<ToolOutput> {
    let exe = program.to_string_lossy().to_string();
    tracing::debug!(
        "executing {} {}",
        exe,
        args.iter()
            .map(|a| a.as_ref().to_string_lossy())
            .collect::<Vec<_>>()
            .join(" "),
    );
    let cant_execute = |source| Error::CantExecute {
        source,
        exe: exe.clone(),
    };
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(cant_execute)?;
    let Some(timeout) = timeout else {
        let output = child.wait_with_output().map_err(cant_execute)?;
        return Ok(ToolOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    };
    // pipes are drained while waiting, or a verbose tool would block
    let stdout = child.stdout.take().map(spawn_reader);
    let stderr = child.stderr.take().map(spawn_reader);
    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait().map_err(cant_execute)? {
            Some(status) => break status,
            None if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                tracing::warn!("{exe} killed after {timeout:?}");
                return Err(Error::Timeout {
                    exe: exe.clone(),
                    timeout,
                });
            }
            None => thread::sleep(POLL_INTERVAL),
        }
    };
    Ok(ToolOutput {
        status,
        stdout: join_reader(stdout),
        stderr: join_reader(stderr),
    })
}

fn spawn_reader<R: Read + Send + 'static>(mut reader: R) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = reader.read_to_end(&mut buf);
        buf
    })
}

fn join_reader(handle: Option<thread::JoinHandle<Vec<u8>>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .map(|bytes| String::from_utf8_lossy(&bytes).to_string())
        .unwrap_or_default()
}
