use std::fs::File;
use std::io::prelude::*;
use std::io::{self, BufReader, BufRead, BufWriter, Error, ErrorKind, Result};
use std::process::{Command, Stdio, Child, ChildStdout, ExitStatus};
use std::path::{Path, PathBuf};
use std::ffi::OsStr;

use crate::find_exec_path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressType {
	GZIP,
	COMPRESS,
	BZIP2,
	XZ,
	UNCOMPRESSED,
}

impl CompressType {
	// Program used to decompress (with -d)
	fn filter_prog(&self) -> Option<&'static str> {
		match self {
			CompressType::GZIP | CompressType::COMPRESS => Some("gzip"),
			CompressType::BZIP2 => Some("bzip2"),
			CompressType::XZ => Some("xz"),
			CompressType::UNCOMPRESSED => None,
		}
	}
}

fn check_exit(prog: &Path, status: ExitStatus) -> Result<()> {
	if status.success() { Ok(()) }
	else { Err(Error::new(ErrorKind::InvalidData, format!("Filter command '{}' failed: {}", prog.display(), status))) }
}

/// Output of an external decompression filter.  When the pipe reaches EOF the
/// child is reaped, and a non-zero exit status is returned as a read error.
pub struct FilterReader {
	stdout: ChildStdout,
	child: Child,
	prog: PathBuf,
	done: bool,
}

impl Read for FilterReader {
	fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
		let n = self.stdout.read(buf)?;
		if n == 0 && !buf.is_empty() && !self.done {
			self.done = true;
			let status = self.child.wait()?;
			check_exit(&self.prog, status)?;
		}
		Ok(n)
	}
}

impl Drop for FilterReader {
	fn drop(&mut self) {
		// Reader abandoned before EOF
		if !self.done {
			let _ = self.child.kill();
			let _ = self.child.wait();
		}
	}
}

pub enum ReadType {
	Pipe(FilterReader),
	File(File),
}

fn get_prog_path(prog: &str) -> Result<PathBuf> {
	find_exec_path(prog).ok_or_else(|| Error::new(ErrorKind::NotFound, format!("Could not find executable {} in PATH", prog)))
}

fn new_read_filter_from_pipe(prog: &str, pipe: Stdio) -> Result<FilterReader> {
	let path = get_prog_path(prog)?;
	debug!("Opening read filter {} -d", path.display());
	let mut child = Command::new(&path).arg("-d")
		.stdin(pipe)
		.stdout(Stdio::piped())
		.spawn()
		.map_err(|error| Error::new(ErrorKind::Other, format!("Error executing pipe command '{} -d': {}", path.display(), error)))?;
	match child.stdout.take() {
		Some(stdout) => Ok(FilterReader { stdout, child, prog: path, done: false }),
		None => Err(Error::new(ErrorKind::Other, "pipe problem")),
	}
}

/// Output sink, optionally passed through an external compression filter.
/// `finish()` must be called to flush the output and, for a filter, wait for it
/// and check its exit status.
pub struct CompressWriter {
	wrt: Option<Box<dyn Write>>,
	filter: Option<(Child, PathBuf)>,
}

impl CompressWriter {
	fn plain(wrt: Box<dyn Write>) -> Self { Self { wrt: Some(wrt), filter: None } }

	fn open_filter<I, S>(out: Stdio, prog: &str, args: I) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<OsStr>,
	{
		let path = get_prog_path(prog)?;
		debug!("Opening write filter {}", path.display());
		let mut child = Command::new(&path).args(args).stdout(out).stdin(Stdio::piped()).spawn()
			.map_err(|error| Error::new(ErrorKind::Other, format!("Error executing pipe command '{}': {}", path.display(), error)))?;
		match child.stdin.take() {
			Some(stdin) => Ok(Self { wrt: Some(Box::new(BufWriter::new(stdin))), filter: Some((child, path)) }),
			None => Err(Error::new(ErrorKind::Other, "pipe problem")),
		}
	}

	fn inner(&mut self) -> Result<&mut Box<dyn Write>> {
		self.wrt.as_mut().ok_or_else(|| Error::new(ErrorKind::BrokenPipe, "write after output was closed"))
	}

	pub fn is_filtered(&self) -> bool { self.filter.is_some() }

	pub fn finish(mut self) -> Result<()> {
		if let Some(mut w) = self.wrt.take() { w.flush()? }
		// stdin of the filter is closed at this point
		if let Some((mut child, prog)) = self.filter.take() {
			let status = child.wait()?;
			check_exit(&prog, status)?;
		}
		Ok(())
	}
}

impl Write for CompressWriter {
	fn write(&mut self, buf: &[u8]) -> Result<usize> { self.inner()?.write(buf) }
	fn flush(&mut self) -> Result<()> { self.inner()?.flush() }
}

impl Drop for CompressWriter {
	fn drop(&mut self) {
		drop(self.wrt.take());
		if let Some((mut child, _)) = self.filter.take() { let _ = child.wait(); }
	}
}

// The original error kind is kept so callers can tell a missing file from other failures
fn test_open_file(path: &Path) -> Result<File> {
	File::open(path).map_err(|error| Error::new(error.kind(), format!("Error opening {} for input: {}", path.display(), error)))
}

fn create_file(path: &Path) -> Result<File> {
	File::create(path).map_err(|error| Error::new(error.kind(), format!("Error opening {} for output: {}", path.display(), error)))
}

pub fn get_compress_type<P: AsRef<Path>>(path: P) -> Result<CompressType> {
	let path = path.as_ref();
	let mut f = test_open_file(path)?;
	let mut buf = [0; 6];
	let n = f.read(&mut buf).map_err(|error| Error::new(ErrorKind::Other, format!("Error reading from {}: {}", path.display(), error)))?;
	let mut ctype = CompressType::UNCOMPRESSED;
	if n == 6 {
		if buf[0] == 0x1f {
			if buf[1] == 0x9d {
				ctype = CompressType::COMPRESS;
			} else if buf[1] == 0x8b && buf[2] == 0x08 {
				ctype = CompressType::GZIP;
			}
		} else if buf[0] == b'B' && buf[1] == b'Z' && buf[2] == b'h' && buf[3] >= b'0' && buf[3] <= b'9' {
			ctype = CompressType::BZIP2;
		} else if buf[0] == 0xfd && buf[1] == b'7' && buf[2] == b'z' && buf[3] == b'X' && buf[4] == b'Z' && buf[5] == 0x00 {
			ctype = CompressType::XZ;
		}
	}
	Ok(ctype)
}

pub fn open_reader<P: AsRef<Path>>(name: P) -> Result<ReadType> {
	let ctype = get_compress_type(name.as_ref())?;
	let f = test_open_file(name.as_ref())?;
	match ctype.filter_prog() {
		None => Ok(ReadType::File(f)),
		Some(prog) => {
			debug!("Input {} is compressed ({:?})", name.as_ref().display(), ctype);
			new_read_filter_from_pipe(prog, Stdio::from(f)).map(ReadType::Pipe)
		},
	}
}

pub fn open_bufreader<P: AsRef<Path>>(name: P) -> Result<Box<dyn BufRead>> {
	match open_reader(name)? {
		ReadType::File(file) => Ok(Box::new(BufReader::new(file))),
		ReadType::Pipe(pipe) => Ok(Box::new(BufReader::new(pipe))),
	}
}

/// Open input for reading. `None` or "-" reads from stdin
pub fn get_reader(name: Option<&str>) -> Result<Box<dyn BufRead>> {
	match name {
		None | Some("-") => Ok(Box::new(BufReader::new(io::stdin()))),
		Some(s) => open_bufreader(s),
	}
}

pub fn open_bufwriter<P: AsRef<Path>>(path: P) -> Result<Box<dyn Write>> {
	let file = create_file(path.as_ref())?;
	Ok(Box::new(BufWriter::new(file)))
}

pub fn open_pipe_writer<P: AsRef<Path>, I, S>(path: P, prog: &str, args: I) -> Result<CompressWriter>
where
	I: IntoIterator<Item = S>,
	S: AsRef<OsStr>,
{
	let file = create_file(path.as_ref())?;
	CompressWriter::open_filter(Stdio::from(file), prog, args)
}

/// Open output for writing. `None` or "-" writes to stdout.
/// If `compress` is set output is passed through gzip
pub fn get_writer(name: Option<&str>, compress: bool) -> Result<CompressWriter> {
	match (name, compress) {
		(None, false) | (Some("-"), false) => Ok(CompressWriter::plain(Box::new(BufWriter::new(io::stdout())))),
		(None, true) | (Some("-"), true) => CompressWriter::open_filter(Stdio::inherit(), "gzip", &["-c"]),
		(Some(s), false) => open_bufwriter(s).map(CompressWriter::plain),
		(Some(s), true) => open_pipe_writer(s, "gzip", &["-c"]),
	}
}
