use serde::Deserialize;
use std::{fs, path::Path};

pub const DEFAULT_TARGETS_PATH: &str = "samples/targets.json";

/// Used whenever the targets document cannot be read or has the wrong shape.
pub const FALLBACK_TARGETS: [&str; 3] = [
    "0x0000000000000000000000000000000000000000",
    "0x1111111111111111111111111111111111111111",
    "0x2222222222222222222222222222222222222222",
];

#[derive(Deserialize)]
struct TargetsFile {
    targets: Vec<String>,
}

/// Outcome of a best-effort targets load. Both variants carry a usable list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetLoad {
    Configured(Vec<String>),
    Defaulted { targets: Vec<String>, reason: String },
}

impl TargetLoad {
    pub fn targets(&self) -> &[String] {
        match self {
            TargetLoad::Configured(targets) => targets,
            TargetLoad::Defaulted { targets, .. } => targets,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, TargetLoad::Defaulted { .. })
    }
}

pub fn fallback_targets() -> Vec<String> {
    FALLBACK_TARGETS.iter().map(|t| (*t).to_owned()).collect()
}

/// Reads `{"targets": [...]}` from `path`. Never fails: any read or parse
/// problem yields the fallback list together with the reason.
pub fn load_targets(path: impl AsRef<Path>) -> TargetLoad {
    let path = path.as_ref();
    let parsed = fs::read_to_string(path)
        .map_err(|e| format!("could not read {}: {e}", path.display()))
        .and_then(|raw| {
            serde_json::from_str::<TargetsFile>(&raw)
                .map_err(|e| format!("could not parse {}: {e}", path.display()))
        });

    match parsed {
        Ok(file) => TargetLoad::Configured(file.targets),
        Err(reason) => {
            log::debug!("using fallback targets, {reason}");
            TargetLoad::Defaulted {
                targets: fallback_targets(),
                reason,
            }
        }
    }
}
