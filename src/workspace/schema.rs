//! `schemaVersion` compatibility gate.

use super::RestoreError;

/// Check `version` against the supported major version and return its
/// major component.
///
/// A version is a dot-separated list of unsigned integers; anything else is
/// malformed.  Only the major component is compared.
pub fn check_schema_version(version: Option<&str>, supported_major: u64) -> Result<u64, RestoreError> {
    let version = version.ok_or(RestoreError::MissingSchemaVersion)?;
    let parts = version
        .split('.')
        .map(|part| part.trim().parse::<u64>())
        .collect::<Result<Vec<u64>, _>>()
        .map_err(|_| RestoreError::MalformedSchemaVersion(version.to_string()))?;
    let major = parts
        .first()
        .copied()
        .ok_or_else(|| RestoreError::MalformedSchemaVersion(version.to_string()))?;

    if major != supported_major {
        return Err(RestoreError::SchemaIncompatible {
            found: version.to_string(),
            supported: supported_major,
        });
    }
    Ok(major)
}
