//! Starting a prepared launch.
//!
//! On Windows the stored command line goes to CreateProcessW as is. Elsewhere
//! it is split back into arguments with the C runtime rule, so the child sees
//! exactly what a Windows child would. The child is not waited on.

use std::fs::{File, OpenOptions};
use std::path::Path;

use tracing::debug;

use crate::error::LaunchError;
use crate::launch::{Prepared, Stdio};

#[derive(Debug, Clone, Copy)]
enum Stream {
    Input,
    Output,
}

/// Start the process described by `prepared` and return its process id.
pub fn spawn(prepared: &Prepared) -> Result<u32, LaunchError> {
    if prepared.argstring().is_empty() {
        return Err(LaunchError::EmptyCommandLine);
    }

    debug!(
        name = prepared.name(),
        cmdline = prepared.argstring(),
        detached = prepared.is_detached(),
        "spawning"
    );
    let pid = imp::spawn(prepared)?;
    debug!(pid, name = prepared.name(), "spawned");
    Ok(pid)
}

fn open_file(path: &Path, stream: Stream) -> Result<File, LaunchError> {
    let opened = match stream {
        Stream::Input => File::open(path),
        Stream::Output => OpenOptions::new().create(true).append(true).open(path),
    };
    opened.map_err(|source| LaunchError::OpenStream {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(windows)]
mod imp {
    use super::*;

    use std::marker::PhantomData;
    use std::os::windows::io::{AsRawHandle, FromRawHandle, OwnedHandle};

    use windows::core::{HSTRING, PCWSTR, PWSTR};
    use windows::Win32::Foundation::{CloseHandle, DuplicateHandle, DUPLICATE_SAME_ACCESS, HANDLE};
    use windows::Win32::System::Console::{
        GetStdHandle, STD_ERROR_HANDLE, STD_HANDLE, STD_INPUT_HANDLE, STD_OUTPUT_HANDLE,
    };
    use windows::Win32::System::Threading::{
        CreateProcessW, DeleteProcThreadAttributeList, GetCurrentProcess,
        InitializeProcThreadAttributeList, UpdateProcThreadAttribute,
        EXTENDED_STARTUPINFO_PRESENT, LPPROC_THREAD_ATTRIBUTE_LIST, PROCESS_CREATION_FLAGS,
        PROCESS_INFORMATION, STARTF_USESTDHANDLES, STARTUPINFOEXW, STARTUPINFOW,
    };

    /// `PROC_THREAD_ATTRIBUTE_HANDLE_LIST`
    const PROC_THREAD_ATTRIBUTE_HANDLE_LIST: usize = 0x0002_0002;

    /// An inheritable duplicate of a standard stream, closed once the child
    /// holds its own copy.
    pub(super) struct ChildHandle(OwnedHandle);

    impl ChildHandle {
        pub(super) fn open(stdio: &Stdio, which: STD_HANDLE, stream: Stream) -> Result<Self, LaunchError> {
            match stdio {
                Stdio::Inherit => match unsafe { GetStdHandle(which) } {
                    Ok(handle) if !handle.is_invalid() => Self::duplicate(handle),
                    // The parent has no such stream, e.g. under a GUI subsystem.
                    _ => Self::from_file(open_null()?),
                },
                Stdio::Null => Self::from_file(open_null()?),
                Stdio::File(path) => Self::from_file(open_file(path, stream)?),
            }
        }

        fn from_file(file: File) -> Result<Self, LaunchError> {
            Self::duplicate(HANDLE(file.as_raw_handle()))
        }

        fn duplicate(source: HANDLE) -> Result<Self, LaunchError> {
            let mut target = HANDLE::default();
            unsafe {
                let process = GetCurrentProcess();
                DuplicateHandle(
                    process,
                    source,
                    process,
                    &mut target,
                    0,
                    true,
                    DUPLICATE_SAME_ACCESS,
                )?;
                Ok(ChildHandle(OwnedHandle::from_raw_handle(target.0)))
            }
        }

        pub(super) fn raw(&self) -> HANDLE {
            HANDLE(self.0.as_raw_handle())
        }
    }

    fn open_null() -> Result<File, LaunchError> {
        OpenOptions::new()
            .read(true)
            .write(true)
            .open("NUL")
            .map_err(|source| LaunchError::OpenStream {
                path: "NUL".into(),
                source,
            })
    }

    /// A `PROC_THREAD_ATTRIBUTE_LIST` that limits inheritance to `handles`.
    struct HandleList<'a> {
        buf: Vec<usize>,
        _handles: PhantomData<&'a [HANDLE]>,
    }

    impl<'a> HandleList<'a> {
        fn new(handles: &'a [HANDLE]) -> Result<Self, LaunchError> {
            let mut size = 0;
            // Sizing call: fails with ERROR_INSUFFICIENT_BUFFER and fills in `size`.
            let _ = unsafe { InitializeProcThreadAttributeList(None, 1, None, &mut size) };

            let mut buf = vec![0usize; size.div_ceil(std::mem::size_of::<usize>())];
            let raw = LPPROC_THREAD_ATTRIBUTE_LIST(buf.as_mut_ptr().cast());
            unsafe { InitializeProcThreadAttributeList(Some(raw), 1, None, &mut size) }?;

            let mut list = HandleList {
                buf,
                _handles: PhantomData,
            };
            unsafe {
                UpdateProcThreadAttribute(
                    list.as_raw(),
                    0,
                    PROC_THREAD_ATTRIBUTE_HANDLE_LIST,
                    Some(handles.as_ptr().cast()),
                    std::mem::size_of_val(handles),
                    None,
                    None,
                )
            }?;
            Ok(list)
        }

        fn as_raw(&mut self) -> LPPROC_THREAD_ATTRIBUTE_LIST {
            LPPROC_THREAD_ATTRIBUTE_LIST(self.buf.as_mut_ptr().cast())
        }
    }

    impl Drop for HandleList<'_> {
        fn drop(&mut self) {
            unsafe { DeleteProcThreadAttributeList(self.as_raw()) };
        }
    }

    pub(super) fn spawn(prepared: &Prepared) -> Result<u32, LaunchError> {
        let mut cmd_wide: Vec<u16> = prepared
            .argstring()
            .encode_utf16()
            .chain(std::iter::once(0))
            .collect();

        let streams = [
            ChildHandle::open(prepared.stdin(), STD_INPUT_HANDLE, Stream::Input)?,
            ChildHandle::open(prepared.stdout(), STD_OUTPUT_HANDLE, Stream::Output)?,
            ChildHandle::open(prepared.stderr(), STD_ERROR_HANDLE, Stream::Output)?,
        ];
        let handles = streams.each_ref().map(ChildHandle::raw);
        let mut inherit = HandleList::new(&handles)?;

        let mut si = STARTUPINFOEXW::default();
        si.StartupInfo.cb = std::mem::size_of::<STARTUPINFOEXW>() as u32;
        si.StartupInfo.dwFlags = STARTF_USESTDHANDLES;
        si.StartupInfo.hStdInput = handles[0];
        si.StartupInfo.hStdOutput = handles[1];
        si.StartupInfo.hStdError = handles[2];
        si.lpAttributeList = inherit.as_raw();

        let cwd = prepared.cwd().map(|dir| HSTRING::from(dir.as_os_str()));
        let cwd_ptr = cwd
            .as_ref()
            .map_or(PCWSTR::null(), |dir| PCWSTR(dir.as_ptr()));

        let mut pi = PROCESS_INFORMATION::default();

        unsafe {
            CreateProcessW(
                None,
                Some(PWSTR(cmd_wide.as_mut_ptr())),
                None,
                None,
                true,
                PROCESS_CREATION_FLAGS(prepared.creation_flags()) | EXTENDED_STARTUPINFO_PRESENT,
                None,
                cwd_ptr,
                (&si as *const STARTUPINFOEXW).cast::<STARTUPINFOW>(),
                &mut pi,
            )
        }?;

        unsafe {
            let _ = CloseHandle(pi.hProcess);
            let _ = CloseHandle(pi.hThread);
        }
        Ok(pi.dwProcessId)
    }
}

#[cfg(not(windows))]
mod imp {
    use super::*;

    use std::process::Command;

    use tracing::warn;

    use crate::launch::DETACHED_PROCESS;
    use crate::split::split;

    pub(super) fn spawn(prepared: &Prepared) -> Result<u32, LaunchError> {
        let mut argv = split(prepared.argstring()).into_iter();
        let program = argv.next().ok_or(LaunchError::EmptyCommandLine)?;
        let ignored = prepared.creation_flags() & !DETACHED_PROCESS;
        if ignored != 0 {
            warn!(
                creation_flags = ignored,
                "creation flags have no effect on this platform"
            );
        }

        let mut cmd = Command::new(program);
        cmd.args(argv)
            .stdin(child_stdio(prepared.stdin(), Stream::Input)?)
            .stdout(child_stdio(prepared.stdout(), Stream::Output)?)
            .stderr(child_stdio(prepared.stderr(), Stream::Output)?);
        if let Some(dir) = prepared.cwd() {
            cmd.current_dir(dir);
        }

        let child = cmd.spawn().map_err(LaunchError::Spawn)?;
        Ok(child.id())
    }

    fn child_stdio(stdio: &Stdio, stream: Stream) -> Result<std::process::Stdio, LaunchError> {
        Ok(match stdio {
            Stdio::Inherit => std::process::Stdio::inherit(),
            Stdio::Null => std::process::Stdio::null(),
            Stdio::File(path) => open_file(path, stream)?.into(),
        })
    }
}
