//! Reads graph6 lines from a file (or every file in a directory, non
//! recursively) and hands each to a pool of worker threads that compute its
//! cop number.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::sync::mpsc::{sync_channel, Receiver};
use std::sync::{Arc, Mutex};
use std::thread;

use crate::error::AppError;
use crate::graph6;
use crate::search::cop_number;

/// Parameters that shape how a single graph6 source is processed.
#[derive(Debug, Clone)]
pub struct DispatchOptions {
    pub k_max: u32,
    pub workers: usize,
    pub aggregate: bool,
}

/// Serializes concurrent writes to stdout.
///
/// The original design lets workers print `k` under the same lock used for
/// task handoff, serializing output with scheduling (see [`crate::dispatch`]
/// module docs, open question on a dedicated output lock). This sink gives
/// output its own lock instead, so printing never blocks task handoff.
#[derive(Debug, Clone)]
pub struct OutputSink {
    stdout: Arc<Mutex<io::Stdout>>,
}

impl OutputSink {
    pub fn new() -> Self {
        Self {
            stdout: Arc::new(Mutex::new(io::stdout())),
        }
    }

    pub fn print_line(&self, line: &str) {
        let mut out = self.stdout.lock().expect("stdout lock poisoned");
        let _ = writeln!(out, "{line}");
    }

    pub fn print(&self, text: &str) {
        let mut out = self.stdout.lock().expect("stdout lock poisoned");
        let _ = write!(out, "{text}");
    }
}

/// Shared aggregation histogram, indexed by `k - 1` for `k` in `[1, k_max]`.
///
/// A cop number of `k_max + 1` ("over-bound") is never counted here: the
/// original C breakdown array has exactly `max_cop` slots, so writing
/// `breakdown[k - 1]` for that case is an out-of-bounds write there. This
/// port simply omits over-bound graphs from the histogram and logs them
/// instead, rather than reproducing that bug.
#[derive(Debug)]
struct AggregationTable {
    counts: Mutex<Vec<u32>>,
}

impl AggregationTable {
    fn new(k_max: u32) -> Self {
        Self {
            counts: Mutex::new(vec![0; k_max as usize]),
        }
    }

    fn record(&self, k: u32, k_max: u32) {
        if k >= 1 && k <= k_max {
            let mut counts = self.counts.lock().expect("aggregation lock poisoned");
            counts[(k - 1) as usize] += 1;
        } else {
            tracing::debug!(k, k_max, "over-bound graph excluded from aggregate histogram");
        }
    }

    fn render(&self) -> String {
        let counts = self.counts.lock().expect("aggregation lock poisoned");
        let mut line = String::new();
        for c in counts.iter() {
            line.push_str(&c.to_string());
            line.push(' ');
        }
        line
    }
}

/// A single line of graph6 text paired with the parameters its worker needs.
struct Task {
    line: String,
}

fn spawn_workers(
    options: &DispatchOptions,
    receiver: Arc<Mutex<Receiver<Task>>>,
    sink: OutputSink,
    table: Option<Arc<AggregationTable>>,
) -> Vec<thread::JoinHandle<()>> {
    let mut handles = Vec::with_capacity(options.workers);
    for worker_id in 0..options.workers {
        let receiver = Arc::clone(&receiver);
        let sink = sink.clone();
        let table = table.clone();
        let k_max = options.k_max;
        handles.push(thread::spawn(move || {
            tracing::debug!(worker_id, "worker started");
            loop {
                let task = {
                    let guard = receiver.lock().expect("task channel lock poisoned");
                    guard.recv()
                };
                let Ok(task) = task else {
                    break;
                };
                process_line(&task.line, k_max, &sink, table.as_deref());
            }
            tracing::debug!(worker_id, "worker stopped");
        }));
    }
    handles
}

fn process_line(line: &str, k_max: u32, sink: &OutputSink, table: Option<&AggregationTable>) {
    let trimmed = line.trim_end_matches(['\n', '\r']);
    if trimmed.is_empty() {
        return;
    }

    let graph = match graph6::decode(trimmed) {
        Ok(g) => g,
        Err(err) => {
            tracing::warn!(%err, "skipping malformed graph6 line");
            return;
        }
    };

    let k = match cop_number(&graph, k_max) {
        Ok(k) => k,
        Err(err) => {
            tracing::warn!(%err, "skipping graph that failed decision");
            return;
        }
    };

    match table {
        Some(table) => table.record(k, k_max),
        None => sink.print_line(&k.to_string()),
    }
}

/// Runs the full producer/worker pipeline over every nonempty line of
/// `lines`, returning the rendered aggregate histogram when `aggregate` is
/// set.
pub fn run_lines(
    lines: impl Iterator<Item = io::Result<String>>,
    options: &DispatchOptions,
    sink: OutputSink,
) -> Result<Option<String>, AppError> {
    let (sender, receiver) = sync_channel::<Task>(0);
    let receiver = Arc::new(Mutex::new(receiver));
    let table = options.aggregate.then(|| Arc::new(AggregationTable::new(options.k_max)));

    let handles = spawn_workers(options, receiver, sink, table.clone());

    let mut first = true;
    for line in lines {
        let mut line = line.map_err(|source| AppError::UnreadablePath {
            path: Path::new("<stream>").to_path_buf(),
            source,
        })?;
        if first {
            first = false;
            if let Some(rest) = line.strip_prefix(graph6::G6_HEADER) {
                line = rest.to_string();
            }
        }
        if line.trim().is_empty() {
            continue;
        }
        // Blocks until a worker takes the line: the rendezvous that lets the
        // caller's line buffer be reused on the next iteration.
        if sender.send(Task { line }).is_err() {
            break;
        }
    }
    drop(sender);

    for handle in handles {
        let _ = handle.join();
    }

    Ok(table.map(|t| t.render()))
}

/// Processes a single graph6 file.
pub fn run_file(path: &Path, options: &DispatchOptions, sink: OutputSink) -> Result<Option<String>, AppError> {
    let file = File::open(path).map_err(|source| AppError::UnreadablePath {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    run_lines(reader.lines(), options, sink)
}

/// Processes every entry of a directory as an independent graph6 file.
///
/// Mirrors the original non-recursive traversal: subdirectories are not
/// descended into, `.` and `..` are never yielded by [`std::fs::read_dir`]
/// so no explicit skip is needed.
pub fn run_folder(path: &Path, options: &DispatchOptions, sink: OutputSink) -> Result<(), AppError> {
    let entries = std::fs::read_dir(path).map_err(|source| AppError::UnreadablePath {
        path: path.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                tracing::warn!(%err, "skipping unreadable directory entry");
                continue;
            }
        };
        let entry_path = entry.path();
        if entry_path.is_dir() {
            continue;
        }

        let name = entry.file_name();
        let name = name.to_string_lossy();
        if options.aggregate {
            sink.print(&format!("{name} "));
        } else {
            sink.print_line(&name);
        }

        match run_file(&entry_path, options, sink.clone()) {
            Ok(Some(histogram)) => sink.print_line(histogram.trim_end()),
            Ok(None) => {}
            Err(err) => tracing::warn!(%err, path = %entry_path.display(), "skipping unreadable file"),
        }
    }

    Ok(())
}
