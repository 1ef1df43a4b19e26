use std::fs;
use std::io::{self, Write};
use std::os::fd::{AsRawFd, OwnedFd};

use nix::fcntl::OFlag;
use nix::sys::signal::{self, SigHandler, Signal};
use nix::unistd;

use crate::error::ExecError;
use crate::global;
use crate::job::{self, JobStatus};
use crate::search::Launch;
use crate::types::*;

fn apply_redirect(redirect: &Redirect) -> Result<(), ExecError> {
	let mut oopt = fs::OpenOptions::new();
	let (oopt, slot) = match redirect.kind {
		RedirectKind::Input => (oopt.read(true), libc::STDIN_FILENO),
		RedirectKind::Output => (oopt.write(true).create(true).truncate(true), libc::STDOUT_FILENO),
		RedirectKind::Append => (oopt.append(true).create(true), libc::STDOUT_FILENO),
	};
	let file = oopt.open(&redirect.target)
		.map_err(|source| ExecError::Redirect { path: redirect.target.clone(), source })?;
	unistd::dup2(file.as_raw_fd(), slot)?;
	drop(file);
	Ok(())
}

/// Installs the pipe ends on the standard slots, closes every pipe
/// descriptor this process holds, then applies the stage's own redirection.
fn setup_stage(stage: &Stage, input: Option<OwnedFd>, output: Option<OwnedFd>,
               unused: Option<OwnedFd>) -> Result<(), ExecError> {
	// the Rust runtime ignores SIGPIPE and an ignored signal survives execv
	unsafe { signal::signal(Signal::SIGPIPE, SigHandler::SigDfl) }?;
	drop(unused);
	if let Some(fd) = input {
		unistd::dup2(fd.as_raw_fd(), libc::STDIN_FILENO)?;
		drop(fd);
	}
	if let Some(fd) = output {
		unistd::dup2(fd.as_raw_fd(), libc::STDOUT_FILENO)?;
		drop(fd);
	}
	if let Some(ref redirect) = stage.redirect {
		apply_redirect(redirect)?;
	}
	Ok(())
}

fn exec_stage(stage: &Stage, launch: &Launch, input: Option<OwnedFd>, output: Option<OwnedFd>,
              unused: Option<OwnedFd>) -> ! {
	let e = match setup_stage(stage, input, output, unused) {
		Ok(()) => launch.exec(),
		Err(e) => e,
	};
	let _ = writeln!(io::stderr(), "rsh: {}", e);
	unsafe { libc::_exit(e.exit_code()) }
}

/// Spawns one process per stage, connecting stage i's stdout to stage i+1's
/// stdin. The shell keeps at most one pipe read end open between iterations.
fn spawn_stages(state: &global::State, pipeline: &Pipeline,
                job_builder: &mut job::JobBuilder) -> Result<(), ExecError> {
	let launches = pipeline.stages.iter()
		.map(|stage| Launch::prepare(&state.search_path, stage))
		.collect::<Result<Vec<Launch>, ExecError>>()?;
	let last = pipeline.stages.len() - 1;

	let mut input: Option<OwnedFd> = None;
	for (i, (stage, launch)) in pipeline.stages.iter().zip(&launches).enumerate() {
		let (next_input, output) = if i < last {
			let (pipe_read, pipe_write) = unistd::pipe2(OFlag::O_CLOEXEC)?;
			(Some(pipe_read), Some(pipe_write))
		} else {
			(None, None)
		};
		match job_builder.push_fork(i)? {
			unistd::ForkResult::Parent { .. } => {
				drop(input);
				drop(output);
				input = next_input;
			},
			unistd::ForkResult::Child => {
				exec_stage(stage, launch, input, output, next_input);
			},
		}
	}
	Ok(())
}

/// Runs a pipeline and reaps all of its processes.
///
/// Processes that were already spawned are waited for even when spawning a
/// later stage fails; the error is returned after they are gone.
///
/// `pipeline` must have at least one stage; `parser::parse` never yields an
/// empty one.
pub fn eval(state: &global::State, pipeline: &Pipeline) -> Result<JobStatus, ExecError> {
	assert!(!pipeline.stages.is_empty());
	log::debug!("dispatching {:?}", pipeline);

	let mut job_builder = job::JobBuilder::new(pipeline.stages.len());
	let spawned = spawn_stages(state, pipeline, &mut job_builder);
	let status = job_builder.build().wait();
	spawned.map(|()| status)
}
