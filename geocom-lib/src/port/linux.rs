use glob::glob;
use std::fs;
use std::path::Path;

/// True when some process holds `port_name` open, judged by the symlinks
/// under `/proc/<pid>/fd`.
pub fn is_port_open(port_name: &str) -> bool {
    let target = fs::canonicalize(port_name).unwrap_or_else(|_| Path::new(port_name).into());

    match glob("/proc/[0-9]*/fd/*") {
        Ok(paths) => paths
            .filter_map(|p| p.ok())
            .filter_map(|path| fs::read_link(path).ok())
            .any(|link| link == target),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_port_is_not_open() {
        assert!(!is_port_open("/dev/does-not-exist-geocom"));
    }
}
