//! Small formatting helpers: durations, decimal sizes, path abbreviation and
//! phase lists.

use std::path::{Component, Path, PathBuf};

use plotdash_probe::Phase;

/// `3h:07m`; `--` for values that are not a duration.
pub fn format_duration(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return "--".into();
    }
    let total = secs as u64;
    format!("{}h:{:02}m", total / 3600, (total % 3600) / 60)
}

/// Decimal (powers of 1000) human size with `precision` fraction digits.
pub fn format_bytes(value: u64, precision: usize) -> String {
    const UNITS: [&str; 6] = ["", "K", "M", "G", "T", "P"];
    let mut v = value as f64;
    let mut unit = 0;
    while v >= 1000.0 && unit < UNITS.len() - 1 {
        v /= 1000.0;
        unit += 1;
    }
    format!("{v:.precision$}{}", UNITS[unit])
}

/// Component-wise common ancestor of `paths`; `None` when empty or nothing is
/// shared.
pub fn common_prefix(paths: &[PathBuf]) -> Option<PathBuf> {
    let (first, rest) = paths.split_first()?;
    let mut shared: Vec<Component<'_>> = first.components().collect();
    for p in rest {
        let n = shared
            .iter()
            .zip(p.components())
            .take_while(|(a, b)| *a == b)
            .count();
        shared.truncate(n);
    }
    if shared.is_empty() {
        None
    } else {
        Some(shared.iter().collect())
    }
}

/// `path` relative to `prefix` when it lies under it, otherwise unchanged.
/// The prefix itself abbreviates to `.`. Only absolute prefixes abbreviate,
/// since a relative result could otherwise lie under the prefix again.
/// Applying it twice is a no-op.
pub fn abbreviate_path(path: &Path, prefix: Option<&Path>) -> String {
    match prefix
        .filter(|pre| pre.is_absolute())
        .map(|pre| path.strip_prefix(pre))
    {
        Some(Ok(rest)) if rest.as_os_str().is_empty() => ".".into(),
        Some(Ok(rest)) => rest.display().to_string(),
        _ => path.display().to_string(),
    }
}

pub fn format_phase(phase: &Phase) -> String {
    if phase.known {
        format!("{}:{}", phase.major, phase.minor)
    } else {
        "?:?".into()
    }
}

/// Space separated phases; longer lists keep both ends and elide the middle
/// as `[+n]`.
pub fn format_phase_list(phases: &[Phase], max_count: usize) -> String {
    let join = |ps: &[Phase]| ps.iter().map(format_phase).collect::<Vec<_>>().join(" ");
    if max_count == 0 || phases.len() <= max_count {
        return join(phases);
    }
    let n_first = max_count / 2;
    let n_last = max_count - n_first;
    let elided = phases.len() - max_count;
    format!(
        "{} [+{elided}] {}",
        join(&phases[..n_first]),
        join(&phases[phases.len() - n_last..])
    )
    .trim()
    .to_string()
}

/// Leading `n` characters of `s`.
pub fn prefix_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}
