use std::fs;
use std::path::Path;

/// Short executable name of a process, as the kernel reports it in `/proc/<pid>/comm`.
pub fn process_name_for_pid(pid: u32) -> Option<String> {
    process_name_in(Path::new("/proc"), pid)
}

fn process_name_in(proc_root: &Path, pid: u32) -> Option<String> {
    if pid == 0 {
        return None;
    }

    let comm = fs::read_to_string(proc_root.join(pid.to_string()).join("comm")).ok()?;
    let name = comm.trim();
    (!name.is_empty()).then(|| name.to_string())
}
