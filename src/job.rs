use std::fmt;

use nix::errno::Errno;
use nix::sys::signal::Signal;
use nix::sys::wait::{self, WaitStatus};
use nix::unistd::{self, Pid};

/// How a waited-for process ended.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ExitStatus {
	Exited(i32),
	Signaled(Signal),
}

impl ExitStatus {
	pub fn from_wait_status(status: WaitStatus) -> Option<ExitStatus> {
		match status {
			WaitStatus::Exited(_, code) => Some(ExitStatus::Exited(code)),
			WaitStatus::Signaled(_, sig, _) => Some(ExitStatus::Signaled(sig)),
			_ => None,
		}
	}

	/// Exit code, or `128 + signal number` for a killed process.
	pub fn code(self) -> i32 {
		match self {
			ExitStatus::Exited(code) => code,
			ExitStatus::Signaled(sig) => 128 + sig as i32,
		}
	}

	pub fn success(self) -> bool {
		self == ExitStatus::Exited(0)
	}
}

impl fmt::Display for ExitStatus {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.code())
	}
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ProcessHandle {
	pub pid: Pid,
	pub stage: usize,
}

/// The processes spawned for one pipeline, in stage order.
#[derive(Debug)]
pub struct Job {
	pub processes: Vec<ProcessHandle>,
}

#[derive(Debug)]
pub struct JobBuilder {
	imp: Job,
}

impl JobBuilder {
	pub fn new(size_hint: usize) -> JobBuilder {
		JobBuilder {
			imp: Job { processes: Vec::with_capacity(size_hint) }
		}
	}

	/// Forks; in the parent the child is recorded as the process for `stage`.
	pub fn push_fork(&mut self, stage: usize) -> nix::Result<unistd::ForkResult> {
		// the child must end in exec or _exit. rsh forks from its only
		// thread; threaded callers (the test harness) rely on libc keeping
		// malloc and stdio usable in the child
		let r = unsafe { unistd::fork() }?;
		if let unistd::ForkResult::Parent { child } = r {
			log::debug!("stage {} running as pid {}", stage, child);
			self.imp.processes.push(ProcessHandle { pid: child, stage });
		}
		Ok(r)
	}

	pub fn build(self) -> Job {
		self.imp
	}
}

fn wait_one(pid: Pid) -> nix::Result<ExitStatus> {
	loop {
		match wait::waitpid(pid, None) {
			Err(Errno::EINTR) => continue,
			Err(e) => return Err(e),
			Ok(status) => if let Some(s) = ExitStatus::from_wait_status(status) {
				return Ok(s);
			},
		}
	}
}

/// Per-stage outcome of a waited job.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct JobStatus {
	pub statuses: Vec<(ProcessHandle, ExitStatus)>,
}

impl JobStatus {
	/// Status of the pipeline head, which is what the session reports.
	/// `None` when stage 0 was never spawned or could not be waited for.
	pub fn head(&self) -> Option<ExitStatus> {
		self.statuses.first()
			.filter(|&&(pr, _)| pr.stage == 0)
			.map(|&(_, s)| s)
	}
}

impl Job {
	/// Reaps every process of the job, head first.
	pub fn wait(self) -> JobStatus {
		let mut statuses = Vec::with_capacity(self.processes.len());
		for pr in self.processes {
			match wait_one(pr.pid) {
				Ok(status) => {
					log::debug!("stage {} (pid {}) exited with {}", pr.stage, pr.pid, status);
					statuses.push((pr, status));
				},
				Err(e) => log::warn!("waiting for pid {}: {}", pr.pid, e),
			}
		}
		JobStatus { statuses }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn exit_status_codes() {
		let pid = Pid::from_raw(42);
		assert_eq!(ExitStatus::from_wait_status(WaitStatus::Exited(pid, 3)), Some(ExitStatus::Exited(3)));
		let killed = ExitStatus::from_wait_status(WaitStatus::Signaled(pid, Signal::SIGKILL, false)).unwrap();
		assert_eq!(killed.code(), 137);
		assert!(!killed.success());
		assert_eq!(ExitStatus::from_wait_status(WaitStatus::Continued(pid)), None);
	}

	#[test]
	fn head_is_first_stage() {
		let h = |stage: usize| ProcessHandle { pid: Pid::from_raw(100 + stage as i32), stage };
		let status = JobStatus { statuses: vec![(h(0), ExitStatus::Exited(1)), (h(1), ExitStatus::Exited(0))] };
		assert_eq!(status.head(), Some(ExitStatus::Exited(1)));
		assert_eq!(JobStatus { statuses: vec![] }.head(), None);
	}

	#[test]
	fn head_missing_when_first_stage_was_not_reaped() {
		let h = |stage: usize| ProcessHandle { pid: Pid::from_raw(200 + stage as i32), stage };
		let status = JobStatus { statuses: vec![(h(1), ExitStatus::Exited(0)), (h(2), ExitStatus::Exited(3))] };
		assert_eq!(status.head(), None);
	}

	#[test]
	fn wait_collects_child_status() {
		let mut builder = JobBuilder::new(1);
		match builder.push_fork(0).unwrap() {
			unistd::ForkResult::Child => unsafe { libc::_exit(7) },
			unistd::ForkResult::Parent { .. } => {},
		}
		let status = builder.build().wait();
		assert_eq!(status.head(), Some(ExitStatus::Exited(7)));
	}
}
