//! Version specifier normalization.

use nvmg_model::{CanonicalVersion, ResolutionError, VersionSpecifier};

/// Resolve a user-supplied specifier to its canonical `v<major>.<minor>.<patch>` tag.
///
/// Named aliases are recognized but rejected here; resolving them needs the
/// release index (see [`crate::index::resolve_alias`]).
///
/// # Errors
/// Returns [`ResolutionError::Empty`] for blank input,
/// [`ResolutionError::AliasNotSupported`] for alias names, and
/// [`ResolutionError::VersionNotFound`] when the input is not a three
/// component semantic version.
pub fn resolve(specifier: &str) -> Result<CanonicalVersion, ResolutionError> {
    match VersionSpecifier::parse(specifier)? {
        VersionSpecifier::Explicit(version) => parse_explicit(&version, specifier.trim()),
        VersionSpecifier::NamedAlias(alias) => Err(ResolutionError::AliasNotSupported {
            alias: alias.name().to_string(),
        }),
    }
}

/// Parse an already `v`-stripped version. `input` is echoed in errors.
pub(crate) fn parse_explicit(
    version: &str,
    input: &str,
) -> Result<CanonicalVersion, ResolutionError> {
    let (core, suffix) = split_core_and_suffix(version);
    let mut parts = core.split('.');
    let (Some(major), Some(minor), Some(patch), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(not_found(input, "expected major.minor.patch"));
    };

    // Numeric parsing drops leading zeros that semver itself would refuse.
    let normalized = format!(
        "{}.{}.{}{suffix}",
        numeric_component(major, input)?,
        numeric_component(minor, input)?,
        numeric_component(patch, input)?,
    );

    semver::Version::parse(&normalized)
        .map(CanonicalVersion::new)
        .map_err(|error| not_found(input, error))
}

fn numeric_component(part: &str, input: &str) -> Result<u64, ResolutionError> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_found(
            input,
            format!("invalid numeric component '{part}'"),
        ));
    }
    part.parse().map_err(|error| not_found(input, error))
}

fn split_core_and_suffix(version: &str) -> (&str, &str) {
    let suffix_idx = version.find(['-', '+']).unwrap_or(version.len());
    (&version[..suffix_idx], &version[suffix_idx..])
}

fn not_found(input: &str, reason: impl std::fmt::Display) -> ResolutionError {
    ResolutionError::VersionNotFound {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use nvmg_model::ResolutionError;

    use super::resolve;

    fn canonical(input: &str) -> String {
        resolve(input)
            .unwrap_or_else(|error| panic!("{input} should resolve: {error}"))
            .to_string()
    }

    #[test]
    fn prefix_and_bare_forms_resolve_identically() {
        for (bare, prefixed) in [
            ("1.2.3", "v1.2.3"),
            ("10.0.0", "v10.0.0"),
            ("20.11.1", "v20.11.1"),
            ("0.0.1", "v0.0.1"),
        ] {
            assert_eq!(canonical(bare), prefixed);
            assert_eq!(canonical(prefixed), prefixed);
        }
    }

    #[test]
    fn canonical_form_is_renormalized() {
        assert_eq!(canonical("v01.002.0003"), "v1.2.3");
        assert_eq!(canonical("  v18.19.0 "), "v18.19.0");
    }

    #[test]
    fn prerelease_and_build_metadata_survive() {
        assert_eq!(canonical("v22.0.0-rc.1"), "v22.0.0-rc.1");
        assert_eq!(canonical("1.2.3+build.5"), "v1.2.3+build.5");
    }

    #[test]
    fn malformed_inputs_fail_with_the_offending_input() {
        for input in ["abc", "1.2", "1", "1.2.3.4", "1..3", "1.x.3", "v+1.2.3", "1.2.-3"] {
            match resolve(input) {
                Err(ResolutionError::VersionNotFound { input: echoed, .. }) => {
                    assert_eq!(echoed, input);
                }
                other => panic!("{input} should be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn empty_inputs_are_rejected() {
        assert_eq!(resolve(""), Err(ResolutionError::Empty));
        assert_eq!(resolve("v"), Err(ResolutionError::Empty));
    }

    #[test]
    fn aliases_report_not_supported() {
        for alias in ["stable", "lts", "system", "lts/iron", "node"] {
            assert_eq!(
                resolve(alias),
                Err(ResolutionError::AliasNotSupported {
                    alias: alias.to_string()
                })
            );
        }
    }
}
