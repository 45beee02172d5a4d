//! Platform paths for config and data files.

use std::path::PathBuf;

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(temp_dir)
        .join("showcase")
}

pub fn data_dir() -> PathBuf {
    dirs::data_dir().unwrap_or_else(temp_dir).join("showcase")
}

pub fn temp_dir() -> PathBuf {
    std::env::temp_dir()
}

/// Locate the mpv binary used by the front-end's audio sink.
pub fn find_mpv_binary() -> Option<PathBuf> {
    let candidates: &[&str] = if cfg!(windows) {
        &["mpv.exe"]
    } else {
        &["/usr/bin/mpv", "/usr/local/bin/mpv", "/opt/homebrew/bin/mpv"]
    };
    for cand in candidates {
        let path = PathBuf::from(cand);
        if path.exists() {
            return Some(path);
        }
    }
    // Fall back to PATH lookup
    std::env::var_os("PATH").and_then(|paths| {
        std::env::split_paths(&paths)
            .map(|dir| dir.join(if cfg!(windows) { "mpv.exe" } else { "mpv" }))
            .find(|p| p.exists())
    })
}

pub fn mpv_socket_name() -> String {
    if cfg!(windows) {
        format!("showcase-mpv-{}", std::process::id())
    } else {
        temp_dir()
            .join(format!("showcase-mpv-{}.sock", std::process::id()))
            .to_string_lossy()
            .into_owned()
    }
}

pub fn mpv_socket_arg() -> String {
    if cfg!(windows) {
        format!(r"--input-ipc-server=\\.\pipe\{}", mpv_socket_name())
    } else {
        format!("--input-ipc-server={}", mpv_socket_name())
    }
}
