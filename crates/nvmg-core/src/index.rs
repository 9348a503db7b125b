//! Alias resolution against the distribution's `index.json`.

use nvmg_model::{
    AliasTarget, CanonicalVersion, LtsSelector, NamedAlias, ReleaseEntry, ResolutionError,
};

use crate::resolver::parse_explicit;

/// Pick the release an alias points at.
///
/// `Latest` selects the highest version listed, `Lts` the highest release
/// carrying an LTS codename (optionally a specific one, compared without
/// regard to case). Entries whose version does not parse are ignored.
///
/// # Errors
/// Returns [`ResolutionError::AliasNotSupported`] for aliases with no
/// installable meaning (`system`, `iojs`, ...), and
/// [`ResolutionError::AliasNotFound`] when no entry matches.
pub fn resolve_alias(
    alias: &NamedAlias,
    entries: &[ReleaseEntry],
) -> Result<CanonicalVersion, ResolutionError> {
    let selected = match alias.target() {
        AliasTarget::Unsupported => {
            return Err(ResolutionError::AliasNotSupported {
                alias: alias.name().to_string(),
            });
        }
        AliasTarget::Latest => highest(entries.iter()),
        AliasTarget::Lts(selector) => {
            highest(entries.iter().filter(|entry| lts_matches(entry, selector)))
        }
    };

    selected.ok_or_else(|| ResolutionError::AliasNotFound {
        alias: alias.name().to_string(),
    })
}

fn lts_matches(entry: &ReleaseEntry, selector: &LtsSelector) -> bool {
    match selector {
        LtsSelector::Any => entry.lts.is_some(),
        LtsSelector::Codename(codename) => entry
            .lts
            .as_deref()
            .is_some_and(|lts| lts.eq_ignore_ascii_case(codename)),
    }
}

fn highest<'a>(entries: impl Iterator<Item = &'a ReleaseEntry>) -> Option<CanonicalVersion> {
    entries
        .filter_map(|entry| {
            let version = entry.version.trim();
            let stripped = version.strip_prefix('v').unwrap_or(version);
            match parse_explicit(stripped, version) {
                Ok(parsed) => Some(parsed),
                Err(error) => {
                    log::debug!("Skipping unparseable index entry: {error}");
                    None
                }
            }
        })
        .max()
}
