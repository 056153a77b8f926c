//! Plotter log parsing: plot id, k, working directories and phase progress.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ProbeError;
use crate::types::Phase;

static RE_TMP_DIRS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Starting plotting progress into temporary dirs: (\S+) and (\S+)").unwrap()
});
static RE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ID: ([0-9a-fA-F]+)").unwrap());
static RE_SIZE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Plot size is: (\d+)").unwrap());
static RE_PHASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Starting phase (\d)").unwrap());
static RE_COMPUTING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Computing table (\d)").unwrap());
static RE_BACKPROP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Backpropagating on table (\d)").unwrap());
static RE_COMPRESSING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Compressing tables (\d) and (\d)").unwrap());
static RE_FINAL_DIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^Starting phase 3/4: Compression from tmp files into "([^"]+)""#).unwrap());

/// Everything the dashboard can learn about a job from its log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogInfo {
    pub plot_id: Option<String>,
    pub k: Option<u32>,
    pub tmp_dir: Option<PathBuf>,
    pub tmp2_dir: Option<PathBuf>,
    pub dst_dir: Option<PathBuf>,
    pub phase: Phase,
}

pub fn read_log(path: &Path) -> Result<LogInfo, ProbeError> {
    let text = fs::read_to_string(path).map_err(|source| ProbeError::LogRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_log(&text))
}

pub fn parse_log(text: &str) -> LogInfo {
    let mut info = LogInfo::default();
    // phase -> furthest sub-step seen in that phase
    let mut subphases: BTreeMap<u32, u32> = BTreeMap::new();

    for line in text.lines() {
        let line = line.trim_start();
        if let Some(c) = RE_TMP_DIRS.captures(line) {
            info.tmp_dir = Some(PathBuf::from(&c[1]));
            info.tmp2_dir = Some(PathBuf::from(&c[2]));
        } else if let Some(c) = RE_ID.captures(line) {
            info.plot_id = Some(c[1].to_string());
        } else if let Some(c) = RE_SIZE.captures(line) {
            info.k = c[1].parse().ok();
        } else if let Some(c) = RE_PHASE.captures(line) {
            if let Ok(p) = c[1].parse::<u32>() {
                subphases.insert(p, 0);
            }
            if let Some(d) = RE_FINAL_DIR.captures(line) {
                let dst = PathBuf::from(&d[1]);
                info.dst_dir = dst.parent().map(Path::to_path_buf).or(Some(dst));
            }
        } else if let Some(c) = RE_COMPUTING.captures(line) {
            bump(&mut subphases, 1, digit(&c[1]));
        } else if let Some(c) = RE_BACKPROP.captures(line) {
            bump(&mut subphases, 2, 7u32.saturating_sub(digit(&c[1])));
        } else if let Some(c) = RE_COMPRESSING.captures(line) {
            bump(&mut subphases, 3, digit(&c[1]));
        }
    }

    info.phase = match subphases.iter().next_back() {
        Some((&major, &minor)) => Phase::new(major, minor),
        None => Phase::new(0, 0),
    };
    info
}

fn digit(s: &str) -> u32 {
    s.parse().unwrap_or(0)
}

fn bump(subphases: &mut BTreeMap<u32, u32>, phase: u32, value: u32) {
    let slot = subphases.entry(phase).or_insert(0);
    *slot = (*slot).max(value);
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "\
Starting plotting progress into temporary dirs: /mnt/tmp/00 and /mnt/tmp/00
ID: 3eb8a37981de1cc76187a36ed947ab4307943cf92967a7e166841186c7899e24
Plot size is: 32
Buffer size is: 4000MiB
Starting phase 1/4: Forward Propagation into tmp files... Sat Oct 24 15:19:39 2020
Computing table 1
Computing table 2
Computing table 3
Starting phase 2/4: Backpropagation into tmp files... Sat Oct 24 21:49:21 2020
Backpropagating on table 7
Backpropagating on table 6
Backpropagating on table 5
";

    #[test]
    fn parses_header_fields() {
        let info = parse_log(LOG);
        assert_eq!(
            info.plot_id.as_deref(),
            Some("3eb8a37981de1cc76187a36ed947ab4307943cf92967a7e166841186c7899e24")
        );
        assert_eq!(info.k, Some(32));
        assert_eq!(info.tmp_dir, Some(PathBuf::from("/mnt/tmp/00")));
    }

    #[test]
    fn backpropagation_counts_down_from_table_seven() {
        assert_eq!(parse_log(LOG).phase, Phase::new(2, 2));
    }

    #[test]
    fn phase_one_tracks_highest_table() {
        let info = parse_log("Starting phase 1/4: x\nComputing table 4\nComputing table 2\n");
        assert_eq!(info.phase, Phase::new(1, 4));
    }

    #[test]
    fn compression_phase_records_destination() {
        let text = "Starting phase 3/4: Compression from tmp files into \"/mnt/dst/01/plot-k32.plot.2.tmp\" Sun Oct 25 2020\nCompressing tables 3 and 4\n";
        let info = parse_log(text);
        assert_eq!(info.phase, Phase::new(3, 3));
        assert_eq!(info.dst_dir, Some(PathBuf::from("/mnt/dst/01")));
    }

    #[test]
    fn empty_log_is_phase_zero() {
        assert_eq!(parse_log("").phase, Phase::new(0, 0));
    }
}
